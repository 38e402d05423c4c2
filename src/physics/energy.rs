use crate::models::State;
use nalgebra as na;

/// Specific orbital energy v²/2 - mu/r [km²/s²].
pub fn specific_energy(state: &State, mu: f64) -> f64 {
    let r = state.position.magnitude();
    let v = state.velocity.magnitude();

    v * v / 2.0 - mu / r
}

/// Specific angular momentum r × v [km²/s].
pub fn angular_momentum(state: &State) -> na::Vector3<f64> {
    state.position.cross(&state.velocity)
}

use crate::physics::dynamics::EquationsOfMotion;
use std::ops::{Add, Mul};

/// One classical fourth-order Runge-Kutta step of size `dt` from `(t, y)`.
///
/// `f(t, y)` is the derivative; the state only needs vector-space operations.
pub fn rk4_step<S, F>(t: f64, dt: f64, y: &S, f: F) -> S
where
    S: Clone + Add<Output = S> + Mul<f64, Output = S>,
    F: Fn(f64, &S) -> S,
{
    let k1 = f(t, y);

    let y2 = y.clone() + k1.clone() * (dt / 2.0);
    let k2 = f(t + dt / 2.0, &y2);

    let y3 = y.clone() + k2.clone() * (dt / 2.0);
    let k3 = f(t + dt / 2.0, &y3);

    let y4 = y.clone() + k3.clone() * dt;
    let k4 = f(t + dt, &y4);

    y.clone() + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// Fixed-step RK4 over any set of equations of motion.
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4;

impl RK4 {
    pub fn integrate<E>(&self, eom: &E, t: f64, state: &E::State, dt: f64) -> E::State
    where
        E: EquationsOfMotion,
        E::State: Clone + Add<Output = E::State> + Mul<f64, Output = E::State>,
    {
        rk4_step(t, dt, state, |tt, yy| eom.compute_derivative(tt, yy))
    }
}

use nalgebra as na;

/// Two-body derivative `[v, -mu r / |r|³]` of a Cartesian state.
pub fn two_body_acceleration(state: &na::Vector6<f64>, mu: f64) -> na::Vector6<f64> {
    let r: na::Vector3<f64> = state.fixed_rows::<3>(0).into_owned();
    let r_mag = r.magnitude();
    let a = -mu * r / (r_mag * r_mag * r_mag);

    na::Vector6::new(state[3], state[4], state[5], a.x, a.y, a.z)
}

/// J2 perturbation of an oblate body whose spin axis is the frame's z axis.
///
/// Only the acceleration half of the returned derivative is meaningful; the
/// velocity half is a copy of the input velocity and must not be summed with
/// another derivative. The central term is not included.
pub fn j2_acceleration(
    state: &na::Vector6<f64>,
    mu: f64,
    equatorial_radius: f64,
    j2: f64,
) -> na::Vector6<f64> {
    let (x, y, z) = (state[0], state[1], state[2]);
    let r2 = x * x + y * y + z * z;
    let r5 = r2 * r2 * r2.sqrt();

    let factor = 1.5 * j2 * mu * equatorial_radius * equatorial_radius / r5;
    let k = 5.0 * z * z / r2;

    na::Vector6::new(
        state[3],
        state[4],
        state[5],
        x * (k - 1.0) * factor,
        y * (k - 1.0) * factor,
        z * (k - 3.0) * factor,
    )
}

use nalgebra as na;

/// Rotation by `angle` about the x axis (v_new = C * v_old).
pub fn x_rotation(angle: f64) -> na::Rotation3<f64> {
    na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), angle)
}

/// Rotation by `angle` about the z axis (v_new = C * v_old).
pub fn z_rotation(angle: f64) -> na::Rotation3<f64> {
    na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), angle)
}

/// Perifocal to inertial direction cosine matrix for a 3-1-3 sequence
/// (RAAN about z, inclination about x, argument of periapsis about z).
pub fn perifocal_to_inertial(raan: f64, inc: f64, argp: f64) -> na::Matrix3<f64> {
    (z_rotation(raan) * x_rotation(inc) * z_rotation(argp)).into_inner()
}

// Math
pub const PI: f64 = std::f64::consts::PI;
pub const TWO_PI: f64 = 2.0 * PI;
pub const DEG2RAD: f64 = PI / 180.0;
pub const RAD2DEG: f64 = 180.0 / PI;

/// Tolerance for the equatorial and circular orbit singularity tests.
pub const SINGULARITY_TOL: f64 = 1e-6;

/// Radius (km) and angular momentum (km^2/s) below which a state is treated as degenerate.
pub const DEGENERACY_TOL: f64 = 1e-10;

// Earth (GSFC planetary fact sheet)
pub const EARTH_MU: f64 = 398600.4418; // Gravitational parameter (km³/s²)
pub const EARTH_R_MEAN: f64 = 6371.0; // Mean radius (km)
pub const EARTH_R_EQUATOR: f64 = 6378.1; // Equatorial radius (km)
pub const EARTH_R_POLE: f64 = 6356.8; // Polar radius (km)
pub const EARTH_J2: f64 = 1.08263e-3; // Oblateness coefficient

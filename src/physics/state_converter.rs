use crate::constants::{DEGENERACY_TOL, SINGULARITY_TOL, TWO_PI};
use crate::errors::{Degeneracy, SimErrors};
use crate::models::Coe;
use crate::numerics::math::{safe_acos, wrap_two_pi};
use crate::numerics::rotations::perifocal_to_inertial;
use nalgebra as na;

/// Conversions between Cartesian states `[rx, ry, rz, vx, vy, vz]`, classical
/// orbital elements and range/azimuth/declination states.
pub struct StateConverter;

impl StateConverter {
    /// Converts a Cartesian state to classical orbital elements.
    ///
    /// Equatorial orbits report a RAAN of zero, circular orbits an argument of
    /// periapsis of zero; the true anomaly slot then carries the argument of
    /// latitude (inclined) or the true longitude (equatorial). All angles are
    /// in [0, 2π). The input is not checked: a degenerate state (zero radius or
    /// angular momentum) produces meaningless numbers, see [`Self::try_cart_to_coe`].
    pub fn cart_to_coe(cart: &na::Vector6<f64>, mu: f64) -> Coe {
        let r: na::Vector3<f64> = cart.fixed_rows::<3>(0).into_owned();
        let v: na::Vector3<f64> = cart.fixed_rows::<3>(3).into_owned();

        let r_mag = r.magnitude();
        let v_mag = v.magnitude();

        // Semi-major axis from the specific energy
        let energy = v_mag * v_mag / 2.0 - mu / r_mag;
        let sma = -mu / (2.0 * energy);

        let h = r.cross(&v);
        let e_vec = v.cross(&h) / mu - r / r_mag;
        let ecc = e_vec.magnitude();

        let h_hat = h.normalize();
        let inc = safe_acos(h_hat.z);

        let n = na::Vector3::z().cross(&h_hat);
        let n_mag = n.magnitude();

        let mut raan = 0.0;
        let mut argp = 0.0;
        let mut ta;

        if n_mag > SINGULARITY_TOL {
            raan = safe_acos(n.x / n_mag);
            if n.y < 0.0 {
                raan = TWO_PI - raan;
            }

            if ecc > SINGULARITY_TOL {
                argp = safe_acos(n.dot(&e_vec) / (n_mag * ecc));
                if e_vec.z < 0.0 {
                    argp = TWO_PI - argp;
                }
                ta = Self::true_anomaly(&r, &v, &e_vec, ecc, r_mag);
            } else {
                // Argument of latitude, measured from the ascending node
                ta = safe_acos(n.dot(&r) / (n_mag * r_mag));
                if r.z < 0.0 {
                    ta = TWO_PI - ta;
                }
            }
        } else if ecc > SINGULARITY_TOL {
            // Retrograde equatorial orbits measure angles the other way round
            argp = safe_acos(e_vec.x / ecc);
            if (e_vec.y < 0.0) != (h_hat.z < 0.0) {
                argp = TWO_PI - argp;
            }
            ta = Self::true_anomaly(&r, &v, &e_vec, ecc, r_mag);
        } else {
            // True longitude, measured from the x axis
            ta = safe_acos(r.x / r_mag);
            if (r.y < 0.0) != (h_hat.z < 0.0) {
                ta = TWO_PI - ta;
            }
        }

        if (ta - TWO_PI).abs() < SINGULARITY_TOL {
            ta = 0.0;
        }

        Coe::new(sma, ecc, inc, raan, argp, ta)
    }

    fn true_anomaly(
        r: &na::Vector3<f64>,
        v: &na::Vector3<f64>,
        e_vec: &na::Vector3<f64>,
        ecc: f64,
        r_mag: f64,
    ) -> f64 {
        let ta = safe_acos(e_vec.dot(r) / (ecc * r_mag));
        // Inbound (r·v < 0) means past apoapsis
        if r.dot(v) < 0.0 {
            TWO_PI - ta
        } else {
            ta
        }
    }

    /// Same as [`Self::cart_to_coe`], but rejects states for which the
    /// elements are undefined.
    pub fn try_cart_to_coe(cart: &na::Vector6<f64>, mu: f64) -> Result<Coe, SimErrors> {
        if cart.iter().any(|x| !x.is_finite()) {
            return Err(SimErrors::DegenerateOrbit(Degeneracy::NonFinite));
        }

        let r: na::Vector3<f64> = cart.fixed_rows::<3>(0).into_owned();
        let v: na::Vector3<f64> = cart.fixed_rows::<3>(3).into_owned();
        let r_mag = r.magnitude();
        if r_mag < DEGENERACY_TOL {
            return Err(SimErrors::DegenerateOrbit(Degeneracy::ZeroRadius));
        }
        if r.cross(&v).magnitude() < DEGENERACY_TOL {
            return Err(SimErrors::DegenerateOrbit(Degeneracy::ZeroAngularMomentum));
        }

        let energy = v.magnitude_squared() / 2.0 - mu / r_mag;
        if energy.abs() < SINGULARITY_TOL * mu / r_mag {
            return Err(SimErrors::DegenerateOrbit(Degeneracy::NearParabolic));
        }

        Ok(Self::cart_to_coe(cart, mu))
    }

    /// Converts classical orbital elements to a Cartesian state.
    pub fn coe_to_cart(coe: &Coe, mu: f64) -> na::Vector6<f64> {
        let (a, e, nu) = (coe.sma, coe.ecc, coe.ta);

        // Perifocal frame
        let p = a * (1.0 - e * e);
        let r_mag = p / (1.0 + e * nu.cos());
        let r_pf = na::Vector3::new(r_mag * nu.cos(), r_mag * nu.sin(), 0.0);
        let v_pf = na::Vector3::new(-nu.sin(), e + nu.cos(), 0.0) * (mu / p).sqrt();

        let dcm = perifocal_to_inertial(coe.raan, coe.inc, coe.argp);
        let r = dcm * r_pf;
        let v = dcm * v_pf;

        na::Vector6::new(r.x, r.y, r.z, v.x, v.y, v.z)
    }

    /// Converts a Cartesian state to `[range, azimuth, declination, speed,
    /// velocity azimuth, velocity declination]`. Azimuths are in [0, 2π),
    /// declinations in [-π/2, π/2].
    pub fn cart_to_radec(cart: &na::Vector6<f64>) -> na::Vector6<f64> {
        let r: na::Vector3<f64> = cart.fixed_rows::<3>(0).into_owned();
        let v: na::Vector3<f64> = cart.fixed_rows::<3>(3).into_owned();

        let r_mag = r.magnitude();
        let v_mag = v.magnitude();

        na::Vector6::new(
            r_mag,
            wrap_two_pi(r.y.atan2(r.x)),
            (r.z / r_mag).asin(),
            v_mag,
            wrap_two_pi(v.y.atan2(v.x)),
            (v.z / v_mag).asin(),
        )
    }

    pub fn radec_to_cart(radec: &na::Vector6<f64>) -> na::Vector6<f64> {
        let (r_mag, az, dec) = (radec[0], radec[1], radec[2]);
        let (v_mag, v_az, v_dec) = (radec[3], radec[4], radec[5]);

        na::Vector6::new(
            r_mag * az.cos() * dec.cos(),
            r_mag * az.sin() * dec.cos(),
            r_mag * dec.sin(),
            v_mag * v_az.cos() * v_dec.cos(),
            v_mag * v_az.sin() * v_dec.cos(),
            v_mag * v_dec.sin(),
        )
    }

    pub fn coe_to_radec(coe: &Coe, mu: f64) -> na::Vector6<f64> {
        Self::cart_to_radec(&Self::coe_to_cart(coe, mu))
    }

    pub fn radec_to_coe(radec: &na::Vector6<f64>, mu: f64) -> Coe {
        Self::cart_to_coe(&Self::radec_to_cart(radec), mu)
    }

    pub fn orbital_period(sma: f64, mu: f64) -> f64 {
        TWO_PI * (sma.powi(3) / mu).sqrt()
    }

    pub fn mean_motion(sma: f64, mu: f64) -> f64 {
        (mu / sma.powi(3)).sqrt()
    }

    pub fn circular_velocity(r: f64, mu: f64) -> f64 {
        (mu / r).sqrt()
    }
}

//! Relative-position bookkeeping between neighboring spacecraft.
use super::state::Coe;
use crate::numerics::math::wrap_pi;
use serde::{Deserialize, Serialize};

/// Mean elements and neighbor phasing over the last reference period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingState {
    pub epoch: f64,
    /// Mean semi-major axis over the window [km]
    pub mean_sma: f64,
    /// Mean inclination over the window [rad]
    pub mean_inc: f64,
    /// Mean right ascension of the ascending node over the window [rad]
    pub mean_raan: f64,
    pub neighbor_1: String,
    /// Mean angle between this spacecraft's and neighbor 1's position vectors [rad]
    pub separation_1: f64,
    pub neighbor_2: String,
    /// Mean angle between this spacecraft's and neighbor 2's position vectors [rad]
    pub separation_2: f64,
}

/// Half-widths of the element-space box a spacecraft must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Max |Δsma| [km]
    pub d_sma: f64,
    /// Max |Δinc| [rad]
    pub d_inc: f64,
    /// Max |ΔRAAN| [rad]
    pub d_raan: f64,
    /// Max |Δ argument of latitude| [rad]
    pub d_arglat: f64,
}

impl Default for BoundingBox {
    /// An unbounded box: nothing is ever out of bounds.
    fn default() -> Self {
        Self {
            d_sma: f64::INFINITY,
            d_inc: f64::INFINITY,
            d_raan: f64::INFINITY,
            d_arglat: f64::INFINITY,
        }
    }
}

/// Which limits of a [`BoundingBox`] are exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundsViolation {
    pub sma: bool,
    pub inc: bool,
    pub raan: bool,
    pub arglat: bool,
}

impl BoundsViolation {
    pub fn any(&self) -> bool {
        self.sma || self.inc || self.raan || self.arglat
    }
}

impl BoundingBox {
    /// Compares mean elements against the reference conic. `arglat_offset` is
    /// the signed argument-of-latitude error with respect to the slot.
    pub fn check(
        &self,
        reference: &Coe,
        mean_sma: f64,
        mean_inc: f64,
        mean_raan: f64,
        arglat_offset: f64,
    ) -> BoundsViolation {
        BoundsViolation {
            sma: (mean_sma - reference.sma).abs() > self.d_sma,
            inc: (mean_inc - reference.inc).abs() > self.d_inc,
            raan: wrap_pi(mean_raan - reference.raan).abs() > self.d_raan,
            arglat: wrap_pi(arglat_offset).abs() > self.d_arglat,
        }
    }
}

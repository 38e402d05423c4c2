use super::gravity::{j2_acceleration, two_body_acceleration};
use crate::models::CentralBody;
use nalgebra as na;
use serde::{Deserialize, Serialize};

pub trait EquationsOfMotion {
    type State;

    fn compute_derivative(&self, t: f64, state: &Self::State) -> Self::State;
}

/// Two-body gravity with an optional J2 term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceModel {
    pub include_j2: bool,
}

impl Default for ForceModel {
    fn default() -> Self {
        Self { include_j2: true }
    }
}

impl ForceModel {
    pub fn new(include_j2: bool) -> Self {
        Self { include_j2 }
    }

    /// Point-mass gravity only.
    pub fn two_body() -> Self {
        Self::new(false)
    }

    pub fn set_include_j2(&mut self, include_j2: bool) {
        self.include_j2 = include_j2;
    }

    /// Derivative `[v, a]` of a Cartesian state about `body`. The time argument
    /// is unused by the current terms.
    pub fn eoms(&self, _t: f64, state: &na::Vector6<f64>, body: &CentralBody) -> na::Vector6<f64> {
        let mut derivative = two_body_acceleration(state, body.mu);

        if self.include_j2 {
            let j2 = j2_acceleration(state, body.mu, body.equatorial_radius, body.j2);
            // Only the acceleration half of the J2 derivative is summed
            for i in 3..6 {
                derivative[i] += j2[i];
            }
        }

        derivative
    }

    /// Lends this force model and `body` to an integrator for one call.
    pub fn with_body<'a>(&'a self, body: &'a CentralBody) -> OrbitalDynamics<'a> {
        OrbitalDynamics {
            force_model: self,
            body,
        }
    }
}

/// A force model paired with the central body it acts about.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalDynamics<'a> {
    force_model: &'a ForceModel,
    body: &'a CentralBody,
}

impl<'a> OrbitalDynamics<'a> {
    pub fn body(&self) -> &'a CentralBody {
        self.body
    }

    pub fn force_model(&self) -> &'a ForceModel {
        self.force_model
    }
}

impl EquationsOfMotion for OrbitalDynamics<'_> {
    type State = na::Vector6<f64>;

    fn compute_derivative(&self, t: f64, state: &Self::State) -> Self::State {
        self.force_model.eoms(t, state, self.body)
    }
}

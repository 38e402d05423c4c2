use crate::errors::SimErrors;
use crate::physics::state_converter::StateConverter;
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Classical orbital elements.
///   sma: semi-major axis [km]
///   ecc: eccentricity [-]
///   inc: inclination [rad]
///   raan: right ascension of the ascending node [rad]
///   argp: argument of periapsis [rad]
///   ta: true anomaly [rad]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coe {
    pub sma: f64,
    pub ecc: f64,
    pub inc: f64,
    pub raan: f64,
    pub argp: f64,
    pub ta: f64,
}

impl Coe {
    pub fn new(sma: f64, ecc: f64, inc: f64, raan: f64, argp: f64, ta: f64) -> Self {
        Self {
            sma,
            ecc,
            inc,
            raan,
            argp,
            ta,
        }
    }

    /// Builds elements from `[sma, ecc, inc, raan, argp, ta]`.
    pub fn from_vector(elements: &na::Vector6<f64>) -> Self {
        Self::new(
            elements[0],
            elements[1],
            elements[2],
            elements[3],
            elements[4],
            elements[5],
        )
    }

    pub fn to_vector(&self) -> na::Vector6<f64> {
        na::Vector6::new(self.sma, self.ecc, self.inc, self.raan, self.argp, self.ta)
    }

    /// Angle from the ascending node to the current position.
    pub fn argument_of_latitude(&self) -> f64 {
        crate::numerics::math::wrap_two_pi(self.argp + self.ta)
    }

    pub fn period(&self, mu: f64) -> f64 {
        StateConverter::orbital_period(self.sma, mu)
    }
}

/// Full state of a body at one epoch. The Cartesian and element halves always
/// describe the same orbit once a constructor or `update_*` call returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub epoch: f64,
    pub position: na::Vector3<f64>,
    pub velocity: na::Vector3<f64>,
    pub sma: f64,
    pub ecc: f64,
    pub inc: f64,
    pub raan: f64,
    pub argp: f64,
    pub ta: f64,
}

impl State {
    /// Fails if no orbit passes through `position` with `velocity`.
    pub fn from_cartesian(
        epoch: f64,
        position: na::Vector3<f64>,
        velocity: na::Vector3<f64>,
        mu: f64,
    ) -> Result<Self, SimErrors> {
        let mut state = State {
            epoch,
            position,
            velocity,
            ..Self::zero()
        };
        state.try_update_coes(mu)?;
        Ok(state)
    }

    pub fn from_coe(epoch: f64, coe: &Coe, mu: f64) -> Self {
        let mut state = State {
            epoch,
            ..Self::zero()
        };
        state.set_coe(coe);
        state.update_cartesian(mu);
        state
    }

    pub fn zero() -> Self {
        State {
            epoch: 0.0,
            position: na::Vector3::zeros(),
            velocity: na::Vector3::zeros(),
            sma: 0.0,
            ecc: 0.0,
            inc: 0.0,
            raan: 0.0,
            argp: 0.0,
            ta: 0.0,
        }
    }

    /// `[rx, ry, rz, vx, vy, vz]`
    pub fn cartesian(&self) -> na::Vector6<f64> {
        na::Vector6::new(
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        )
    }

    pub fn coe(&self) -> Coe {
        Coe::new(self.sma, self.ecc, self.inc, self.raan, self.argp, self.ta)
    }

    pub fn set_cartesian(&mut self, cart: &na::Vector6<f64>) {
        self.position = cart.fixed_rows::<3>(0).into_owned();
        self.velocity = cart.fixed_rows::<3>(3).into_owned();
    }

    pub fn set_coe(&mut self, coe: &Coe) {
        self.sma = coe.sma;
        self.ecc = coe.ecc;
        self.inc = coe.inc;
        self.raan = coe.raan;
        self.argp = coe.argp;
        self.ta = coe.ta;
    }

    /// Recomputes the orbital elements from position and velocity.
    pub fn update_coes(&mut self, mu: f64) {
        let coe = StateConverter::cart_to_coe(&self.cartesian(), mu);
        self.set_coe(&coe);
    }

    /// Like [`Self::update_coes`], but fails on a degenerate state instead of
    /// filling the elements with garbage.
    pub fn try_update_coes(&mut self, mu: f64) -> Result<(), SimErrors> {
        let coe = StateConverter::try_cart_to_coe(&self.cartesian(), mu)?;
        self.set_coe(&coe);
        Ok(())
    }

    /// Recomputes position and velocity from the orbital elements.
    pub fn update_cartesian(&mut self, mu: f64) {
        let cart = StateConverter::coe_to_cart(&self.coe(), mu);
        self.set_cartesian(&cart);
    }
}

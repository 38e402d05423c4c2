use super::history::StateHistory;
use super::state::{Coe, State};
use super::tracking::{BoundingBox, BoundsViolation, TrackingState};
use crate::constants::TWO_PI;
use crate::errors::SimErrors;
use crate::integrators::rk4::RK4;
use crate::numerics::math::{circular_mean, mean};
use crate::physics::dynamics::OrbitalDynamics;
use crate::physics::state_converter::StateConverter;
use log::{debug, trace, warn};
use nalgebra as na;

/// Largest epoch difference [s] at which two history entries count as simultaneous.
const EPOCH_SYNC_TOL: f64 = 1e-6;

/// One orbiting body: its current state, everything it has been through, and
/// how it sits relative to its neighbors.
#[derive(Debug, Clone)]
pub struct Spacecraft {
    name: String,
    state: State,
    history: StateHistory,
    reference: Coe,
    reference_epoch: f64,
    reference_period: f64,
    tracking: Option<TrackingState>,
}

impl Spacecraft {
    /// Creates a spacecraft from a state whose two halves already agree.
    /// Fails if the state does not describe an orbit.
    pub fn new(name: impl Into<String>, state: State, mu: f64) -> Result<Self, SimErrors> {
        let mut spacecraft = Spacecraft {
            name: name.into(),
            state,
            history: StateHistory::default(),
            reference: state.coe(),
            reference_epoch: state.epoch,
            reference_period: 0.0,
            tracking: None,
        };
        spacecraft.reset_state(state, mu)?;
        Ok(spacecraft)
    }

    pub fn from_cartesian(
        name: impl Into<String>,
        epoch: f64,
        position: na::Vector3<f64>,
        velocity: na::Vector3<f64>,
        mu: f64,
    ) -> Result<Self, SimErrors> {
        Self::new(name, State::from_cartesian(epoch, position, velocity, mu)?, mu)
    }

    pub fn from_coe(
        name: impl Into<String>,
        epoch: f64,
        coe: &Coe,
        mu: f64,
    ) -> Result<Self, SimErrors> {
        Self::new(name, State::from_coe(epoch, coe, mu), mu)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Osculating elements captured at the last reset.
    pub fn reference(&self) -> &Coe {
        &self.reference
    }

    pub fn reference_epoch(&self) -> f64 {
        self.reference_epoch
    }

    /// Period of the reference conic [s].
    pub fn reference_period(&self) -> f64 {
        self.reference_period
    }

    /// Latest tracking snapshot, if one was computed since the last reset.
    pub fn tracking(&self) -> Option<&TrackingState> {
        self.tracking.as_ref()
    }

    /// Replaces the current state and restarts the history from it. A
    /// degenerate state is rejected and leaves the spacecraft untouched.
    pub fn reset_state(&mut self, state: State, mu: f64) -> Result<(), SimErrors> {
        StateConverter::try_cart_to_coe(&state.cartesian(), mu)?;

        self.state = state;
        self.history.reset(&state);
        self.reference = state.coe();
        self.reference_epoch = state.epoch;
        self.reference_period = self.reference.period(mu);
        self.tracking = None;
        debug!(
            "{}: reset at et={} (sma={:.3} km, T_ref={:.1} s)",
            self.name, state.epoch, state.sma, self.reference_period
        );
        Ok(())
    }

    pub fn reset_cartesian(
        &mut self,
        epoch: f64,
        position: na::Vector3<f64>,
        velocity: na::Vector3<f64>,
        mu: f64,
    ) -> Result<(), SimErrors> {
        self.reset_state(State::from_cartesian(epoch, position, velocity, mu)?, mu)
    }

    pub fn reset_coe(&mut self, epoch: f64, coe: &Coe, mu: f64) -> Result<(), SimErrors> {
        self.reset_state(State::from_coe(epoch, coe, mu), mu)
    }

    /// Applies an impulsive velocity change at the current epoch and records
    /// the resulting state.
    pub fn apply_dv(&mut self, dv: &na::Vector3<f64>, mu: f64) -> Result<(), SimErrors> {
        let mut next = self.state;
        next.velocity += dv;
        next.try_update_coes(mu)?;

        self.state = next;
        self.history.push(&self.state)
    }

    /// State one RK4 step of `dt` seconds ahead, without recording it.
    pub fn advance(&self, dt: f64, dynamics: &OrbitalDynamics) -> Result<State, SimErrors> {
        let cart = RK4.integrate(dynamics, self.state.epoch, &self.state.cartesian(), dt);

        let mut next = self.state;
        next.epoch += dt;
        next.set_cartesian(&cart);
        next.try_update_coes(dynamics.body().mu)?;
        Ok(next)
    }

    /// Advances the state by `dt` seconds with one RK4 step and records it.
    pub fn step(&mut self, dt: f64, dynamics: &OrbitalDynamics) -> Result<(), SimErrors> {
        let next = self.advance(dt, dynamics)?;
        self.record(next)
    }

    // Makes an already checked state current and appends it
    pub(crate) fn record(&mut self, next: State) -> Result<(), SimErrors> {
        self.state = next;
        trace!("{}: et={} ta={:.6}", self.name, self.state.epoch, self.state.ta);
        self.history.push(&self.state)
    }

    /// Index of the history entry bracketing `target`, see [`StateHistory::epoch_index`].
    pub fn epoch_index(&self, target: f64) -> Result<usize, SimErrors> {
        self.history.epoch_index(target)
    }

    /// Mean elements and neighbor separations over the last reference period.
    ///
    /// Both neighbors must have been stepped in lockstep with this spacecraft,
    /// since samples are paired by history index.
    pub fn compute_tracking(
        &self,
        neighbor_1: &Spacecraft,
        neighbor_2: &Spacecraft,
    ) -> Result<TrackingState, SimErrors> {
        self.history.check_consistency()?;

        let now = self.state.epoch;
        let window_start = now - self.reference_period;
        let end = self.history.epoch_index(now)?;
        let start = self.history.epoch_index(window_start)?;

        if self
            .history
            .first_epoch()
            .map_or(false, |first| first > window_start)
        {
            warn!(
                "{}: tracking window is shorter than one reference period ({:.1} s)",
                self.name, self.reference_period
            );
        }

        let window = &self.history.elements()[start..=end];
        let tracking = TrackingState {
            epoch: now,
            mean_sma: mean(window.iter().map(|e| e[0])).unwrap_or(self.state.sma),
            mean_inc: mean(window.iter().map(|e| e[2])).unwrap_or(self.state.inc),
            mean_raan: circular_mean(window.iter().map(|e| e[3])).unwrap_or(self.state.raan),
            neighbor_1: neighbor_1.name.clone(),
            separation_1: self.mean_separation(neighbor_1, start, end)?,
            neighbor_2: neighbor_2.name.clone(),
            separation_2: self.mean_separation(neighbor_2, start, end)?,
        };

        debug!(
            "{}: mean sma={:.3} km, separations {:.4}/{:.4} rad",
            self.name, tracking.mean_sma, tracking.separation_1, tracking.separation_2
        );
        Ok(tracking)
    }

    /// Computes and stores the latest tracking snapshot.
    pub fn update_tracking(
        &mut self,
        neighbor_1: &Spacecraft,
        neighbor_2: &Spacecraft,
    ) -> Result<(), SimErrors> {
        let tracking = self.compute_tracking(neighbor_1, neighbor_2)?;
        self.set_tracking(tracking);
        Ok(())
    }

    pub(crate) fn set_tracking(&mut self, tracking: TrackingState) {
        self.tracking = Some(tracking);
    }

    // Undirected angle between position vectors, averaged sample by sample
    fn mean_separation(
        &self,
        neighbor: &Spacecraft,
        start: usize,
        end: usize,
    ) -> Result<f64, SimErrors> {
        let unsynchronized = || SimErrors::UnsynchronizedHistories {
            spacecraft: self.name.clone(),
            neighbor: neighbor.name.clone(),
        };

        neighbor.history.check_consistency()?;
        let own_epochs = &self.history.epochs()[start..=end];
        let other_epochs = neighbor
            .history
            .epochs()
            .get(start..=end)
            .ok_or_else(unsynchronized)?;
        let in_sync = own_epochs
            .iter()
            .zip(other_epochs)
            .all(|(a, b)| (a - b).abs() <= EPOCH_SYNC_TOL);
        if !in_sync {
            return Err(unsynchronized());
        }

        let own = &self.history.cartesian()[start..=end];
        let other = &neighbor.history.cartesian()[start..=end];
        let angles = own.iter().zip(other).map(|(a, b)| {
            let r_a = a.fixed_rows::<3>(0).into_owned();
            let r_b = b.fixed_rows::<3>(0).into_owned();
            r_a.angle(&r_b)
        });

        mean(angles).ok_or_else(unsynchronized)
    }

    /// Checks the latest mean elements (or the osculating ones if no tracking
    /// snapshot exists) against the reference conic. The argument of latitude
    /// is compared with the reference conic's, advanced at the reference mean
    /// motion.
    pub fn check_in_bounds(&self, bounds: &BoundingBox) -> BoundsViolation {
        let (sma, inc, raan) = match &self.tracking {
            Some(t) => (t.mean_sma, t.mean_inc, t.mean_raan),
            None => (self.state.sma, self.state.inc, self.state.raan),
        };

        let elapsed = self.state.epoch - self.reference_epoch;
        let expected_arglat =
            self.reference.argument_of_latitude() + TWO_PI * elapsed / self.reference_period;
        let arglat_offset = self.state.coe().argument_of_latitude() - expected_arglat;

        bounds.check(&self.reference, sma, inc, raan, arglat_offset)
    }
}

use crate::errors::SimErrors;
use crate::models::{BoundingBox, BoundsViolation, CentralBody, Coe, Spacecraft, State};
use crate::physics::dynamics::ForceModel;
use log::{debug, info};
use nalgebra as na;

/// A set of spacecraft orbiting one central body and propagated in lockstep.
#[derive(Debug, Clone)]
pub struct Constellation {
    body: CentralBody,
    force_model: ForceModel,
    epoch: f64,
    spacecraft: Vec<Spacecraft>,
    bounds: BoundingBox,
}

impl Constellation {
    pub fn new(body: CentralBody, force_model: ForceModel, epoch: f64) -> Self {
        Self::with_spacecraft(body, force_model, epoch, Vec::new(), BoundingBox::default())
    }

    /// Builds a constellation from already-initialized spacecraft.
    pub fn with_spacecraft(
        body: CentralBody,
        force_model: ForceModel,
        epoch: f64,
        spacecraft: Vec<Spacecraft>,
        bounds: BoundingBox,
    ) -> Self {
        Constellation {
            body,
            force_model,
            epoch,
            spacecraft,
            bounds,
        }
    }

    pub fn body(&self) -> &CentralBody {
        &self.body
    }

    pub fn force_model(&self) -> &ForceModel {
        &self.force_model
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    pub fn spacecraft(&self) -> &[Spacecraft] {
        &self.spacecraft
    }

    pub fn len(&self) -> usize {
        self.spacecraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spacecraft.is_empty()
    }

    /// First spacecraft called `name`.
    pub fn get(&self, name: &str) -> Option<&Spacecraft> {
        self.spacecraft.iter().find(|sc| sc.name() == name)
    }

    fn index_of(&self, name: &str) -> Result<usize, SimErrors> {
        self.spacecraft
            .iter()
            .position(|sc| sc.name() == name)
            .ok_or_else(|| SimErrors::UnknownSpacecraft(name.to_string()))
    }

    pub fn add_spacecraft(&mut self, spacecraft: Spacecraft) {
        debug!("Adding {} to the constellation", spacecraft.name());
        self.spacecraft.push(spacecraft);
    }

    /// Adds a spacecraft starting from `state`, at the state's own epoch.
    pub fn add_from_state(&mut self, name: impl Into<String>, state: State) -> Result<(), SimErrors> {
        let spacecraft = Spacecraft::new(name, state, self.body.mu)?;
        self.add_spacecraft(spacecraft);
        Ok(())
    }

    /// Adds a spacecraft at the constellation epoch from position and velocity.
    pub fn add_from_cartesian(
        &mut self,
        name: impl Into<String>,
        position: na::Vector3<f64>,
        velocity: na::Vector3<f64>,
    ) -> Result<(), SimErrors> {
        let spacecraft =
            Spacecraft::from_cartesian(name, self.epoch, position, velocity, self.body.mu)?;
        self.add_spacecraft(spacecraft);
        Ok(())
    }

    /// Adds a spacecraft at the constellation epoch from orbital elements.
    pub fn add_from_coe(&mut self, name: impl Into<String>, coe: &Coe) -> Result<(), SimErrors> {
        let spacecraft = Spacecraft::from_coe(name, self.epoch, coe, self.body.mu)?;
        self.add_spacecraft(spacecraft);
        Ok(())
    }

    /// Propagates every spacecraft forward by `duration` seconds in steps of
    /// `step`, finishing with one partial step so the last entry lands exactly
    /// on `duration`.
    ///
    /// If any spacecraft fails a step, no spacecraft takes that step: all of
    /// them, and the constellation epoch, stay at the last completed round.
    pub fn propagate(&mut self, duration: f64, step: f64) -> Result<(), SimErrors> {
        if !(step.is_finite() && step > 0.0) {
            return Err(SimErrors::InvalidStepSize(step));
        }
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(SimErrors::InvalidDuration(duration));
        }

        info!(
            "Propagating {} spacecraft for {} s (step {} s) from et={}",
            self.spacecraft.len(),
            duration,
            step,
            self.epoch
        );

        let start = self.epoch;
        let mut steps: u64 = 0;
        while (steps + 1) as f64 * step < duration {
            self.step_all(step)?;
            steps += 1;
            self.epoch = start + steps as f64 * step;
        }

        let elapsed = steps as f64 * step;
        if elapsed < duration {
            self.step_all(duration - elapsed)?;
            self.epoch = start + duration;
        }

        info!("Propagation finished at et={}", self.epoch);
        Ok(())
    }

    // Every spacecraft advances one step before the next round begins
    fn step_all(&mut self, dt: f64) -> Result<(), SimErrors> {
        let dynamics = self.force_model.with_body(&self.body);
        let next = self
            .spacecraft
            .iter()
            .map(|sc| sc.advance(dt, &dynamics))
            .collect::<Result<Vec<State>, SimErrors>>()?;

        for (spacecraft, state) in self.spacecraft.iter_mut().zip(next) {
            spacecraft.record(state)?;
        }
        Ok(())
    }

    /// Applies an impulsive burn to the spacecraft called `name`.
    pub fn apply_dv(&mut self, name: &str, dv: &na::Vector3<f64>) -> Result<(), SimErrors> {
        let index = self.index_of(name)?;
        let mu = self.body.mu;
        self.spacecraft[index].apply_dv(dv, mu)
    }

    /// Updates the tracking snapshot of `name` against two neighbors.
    pub fn update_tracking(
        &mut self,
        name: &str,
        neighbor_1: &str,
        neighbor_2: &str,
    ) -> Result<(), SimErrors> {
        let index = self.index_of(name)?;
        let (n1, n2) = (self.index_of(neighbor_1)?, self.index_of(neighbor_2)?);

        let tracking = self.spacecraft[index]
            .compute_tracking(&self.spacecraft[n1], &self.spacecraft[n2])?;
        self.spacecraft[index].set_tracking(tracking);
        Ok(())
    }

    /// Spacecraft currently outside the constellation's bounding box.
    pub fn out_of_bounds(&self) -> Vec<(&str, BoundsViolation)> {
        self.spacecraft
            .iter()
            .map(|sc| (sc.name(), sc.check_in_bounds(&self.bounds)))
            .filter(|(_, violation)| violation.any())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEG2RAD, EARTH_MU};
    use crate::errors::Degeneracy;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    fn leo_pair(epoch: f64) -> Constellation {
        let mut constellation =
            Constellation::new(CentralBody::earth(), ForceModel::two_body(), epoch);
        constellation
            .add_from_coe("a", &Coe::new(7000.0, 0.0, 0.9, 0.0, 0.0, 0.0))
            .unwrap();
        constellation
            .add_from_coe("b", &Coe::new(7000.0, 0.0, 0.9, 0.0, 0.0, 0.5))
            .unwrap();
        constellation
    }

    #[test_case(100.0, 30.0, 5; "partial final step")]
    #[test_case(90.0, 30.0, 4; "even multiple")]
    #[test_case(10.0, 30.0, 2; "step longer than duration")]
    #[test_case(0.0, 30.0, 1; "zero duration")]
    fn propagation_lands_on_duration(duration: f64, step: f64, entries: usize) {
        let mut constellation = leo_pair(1000.0);
        constellation.propagate(duration, step).unwrap();

        assert_abs_diff_eq!(constellation.epoch(), 1000.0 + duration, epsilon = 1e-9);
        for sc in constellation.spacecraft() {
            assert_eq!(sc.history().len(), entries);
            assert_abs_diff_eq!(sc.state().epoch, 1000.0 + duration, epsilon = 1e-9);
        }
    }

    #[test]
    fn long_propagation_has_no_sliver_step() {
        let mut constellation = leo_pair(0.0);
        constellation.propagate(3600.0, 3.6).unwrap();
        assert_eq!(constellation.spacecraft()[0].history().len(), 1001);
    }

    #[test_case(0.0; "zero")]
    #[test_case(-10.0; "negative")]
    #[test_case(f64::NAN; "nan")]
    fn invalid_step_is_rejected(step: f64) {
        let mut constellation = leo_pair(0.0);
        assert!(matches!(
            constellation.propagate(100.0, step),
            Err(SimErrors::InvalidStepSize(_))
        ));
        assert_eq!(constellation.spacecraft()[0].history().len(), 1);
    }

    #[test_case(-1.0; "negative")]
    #[test_case(f64::NAN; "nan")]
    #[test_case(f64::INFINITY; "infinite")]
    fn invalid_duration_is_rejected(duration: f64) {
        let mut constellation = leo_pair(0.0);
        assert!(matches!(
            constellation.propagate(duration, 30.0),
            Err(SimErrors::InvalidDuration(_))
        ));
        assert_eq!(constellation.epoch(), 0.0);
    }

    #[test]
    fn radial_spacecraft_cannot_join() {
        let mut constellation = leo_pair(0.0);
        let result = constellation.add_from_cartesian(
            "drop",
            na::Vector3::new(7000.0, 0.0, 0.0),
            na::Vector3::new(-3.0, 0.0, 0.0),
        );
        assert!(matches!(
            result,
            Err(SimErrors::DegenerateOrbit(Degeneracy::ZeroAngularMomentum))
        ));
        assert_eq!(constellation.len(), 2);
    }

    #[test]
    fn failed_round_keeps_members_in_lockstep() {
        let mut constellation = leo_pair(0.0);
        // Plunging, barely bound orbit: becomes near-parabolic for the
        // converter a little over a third of a second in
        constellation
            .add_from_cartesian(
                "plunge",
                na::Vector3::new(100.0, 0.0, 0.0),
                na::Vector3::new(-84.70416726702412, 28.234746033920686, 0.0),
            )
            .unwrap();

        let result = constellation.propagate(1.0, 0.01);
        assert!(matches!(
            result,
            Err(SimErrors::DegenerateOrbit(Degeneracy::NearParabolic))
        ));

        let lengths: Vec<usize> = constellation
            .spacecraft()
            .iter()
            .map(|sc| sc.history().len())
            .collect();
        assert!(lengths[0] > 1 && lengths[0] < 101);
        assert!(lengths.iter().all(|&len| len == lengths[0]));
        for sc in constellation.spacecraft() {
            assert_abs_diff_eq!(sc.state().epoch, constellation.epoch(), epsilon = 1e-9);
        }
    }

    #[test]
    fn every_way_of_adding_spacecraft() {
        let mut constellation = Constellation::new(CentralBody::earth(), ForceModel::default(), 50.0);
        let coe = Coe::new(7000.0, 0.01, 0.5, 0.2, 0.1, 0.0);
        let state = State::from_coe(20.0, &coe, EARTH_MU);

        constellation.add_from_coe("coe", &coe).unwrap();
        constellation
            .add_from_cartesian("cart", state.position, state.velocity)
            .unwrap();
        constellation.add_from_state("state", state).unwrap();
        constellation.add_spacecraft(Spacecraft::new("direct", state, EARTH_MU).unwrap());

        assert_eq!(constellation.len(), 4);
        assert_eq!(constellation.get("coe").unwrap().state().epoch, 50.0);
        assert_eq!(constellation.get("cart").unwrap().state().epoch, 50.0);
        assert_eq!(constellation.get("state").unwrap().state().epoch, 20.0);
        assert!(constellation.get("missing").is_none());
    }

    #[test]
    fn tracking_by_name() {
        let mut constellation = leo_pair(0.0);
        constellation
            .add_from_coe("c", &Coe::new(7000.0, 0.0, 0.9, 0.0, 0.0, 5.5))
            .unwrap();
        constellation.propagate(600.0, 60.0).unwrap();

        constellation.update_tracking("a", "b", "c").unwrap();
        let tracking = constellation.get("a").unwrap().tracking().unwrap();
        assert_abs_diff_eq!(tracking.separation_1, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(tracking.separation_2, 2.0 * crate::constants::PI - 5.5, epsilon = 1e-6);

        assert!(matches!(
            constellation.update_tracking("a", "b", "zeta"),
            Err(SimErrors::UnknownSpacecraft(name)) if name == "zeta"
        ));
    }

    #[test]
    fn burned_spacecraft_leaves_the_box() {
        let mut constellation = leo_pair(0.0);
        constellation.set_bounds(BoundingBox {
            d_sma: 5.0,
            d_inc: 0.1 * DEG2RAD,
            d_raan: 0.1 * DEG2RAD,
            d_arglat: 0.5 * DEG2RAD,
        });
        constellation.propagate(300.0, 60.0).unwrap();
        assert!(constellation.out_of_bounds().is_empty());

        constellation
            .apply_dv("b", &na::Vector3::new(0.0, 0.0, 0.05))
            .unwrap();
        let out = constellation.out_of_bounds();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, "b");
    }
}

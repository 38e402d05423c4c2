use super::constellation::Constellation;
use crate::constants::TWO_PI;
use crate::errors::SimErrors;
use crate::models::{CentralBody, Coe};
use crate::numerics::math::wrap_two_pi;
use crate::physics::dynamics::ForceModel;
use log::info;
use serde::{Deserialize, Serialize};

/// Walker Delta pattern `i: T/P/F`.
///   total: number of satellites T
///   planes: number of equally spaced orbital planes P
///   phasing: inter-plane phasing factor F
///   inc: shared inclination [rad]
///   sma: shared semi-major axis [km]
///   raan0: RAAN of the first plane [rad]
///
/// Orbits are circular, so the true anomaly of each satellite is its argument
/// of latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkerDelta {
    pub total: usize,
    pub planes: usize,
    pub phasing: usize,
    pub inc: f64,
    pub sma: f64,
    #[serde(default)]
    pub raan0: f64,
}

impl WalkerDelta {
    pub fn new(total: usize, planes: usize, phasing: usize, inc: f64, sma: f64) -> Self {
        WalkerDelta {
            total,
            planes,
            phasing,
            inc,
            sma,
            raan0: 0.0,
        }
    }

    pub fn with_raan0(mut self, raan0: f64) -> Self {
        self.raan0 = raan0;
        self
    }

    pub fn sats_per_plane(&self) -> usize {
        self.total / self.planes.max(1)
    }

    fn validate(&self) -> Result<(), SimErrors> {
        if self.total == 0 || self.planes == 0 || self.total % self.planes != 0 {
            return Err(SimErrors::InvalidWalkerPattern {
                total: self.total,
                planes: self.planes,
            });
        }
        Ok(())
    }

    pub fn satellite_name(plane: usize, sat: usize) -> String {
        format!("plane_{}_sat_{}", plane, sat)
    }

    /// Names and initial elements of every member, plane by plane.
    pub fn initial_elements(&self) -> Result<Vec<(String, Coe)>, SimErrors> {
        self.validate()?;

        let per_plane = self.sats_per_plane();
        let raan_spacing = TWO_PI / self.planes as f64;
        let ta_spacing = TWO_PI / per_plane as f64;
        // Offset of each plane's first satellite relative to the previous plane
        let phase_offset = TWO_PI * self.phasing as f64 / self.total as f64;

        let mut members = Vec::with_capacity(self.total);
        for plane in 0..self.planes {
            let raan = wrap_two_pi(self.raan0 + raan_spacing * plane as f64);
            let ta0 = phase_offset * plane as f64;
            for sat in 0..per_plane {
                let ta = wrap_two_pi(ta0 + ta_spacing * sat as f64);
                members.push((
                    Self::satellite_name(plane, sat),
                    Coe::new(self.sma, 0.0, self.inc, raan, 0.0, ta),
                ));
            }
        }
        Ok(members)
    }

    /// Creates a constellation holding every member of the pattern at `epoch`.
    pub fn build(
        &self,
        body: CentralBody,
        force_model: ForceModel,
        epoch: f64,
    ) -> Result<Constellation, SimErrors> {
        let members = self.initial_elements()?;

        let mut constellation = Constellation::new(body, force_model, epoch);
        for (name, coe) in &members {
            constellation.add_from_coe(name.as_str(), coe)?;
        }

        info!(
            "Built Walker Delta {}/{}/{} at sma={} km, inc={:.4} rad",
            self.total, self.planes, self.phasing, self.sma, self.inc
        );
        Ok(constellation)
    }

    /// Names of the satellites ahead of and behind `(plane, sat)` in its plane.
    pub fn in_plane_neighbors(&self, plane: usize, sat: usize) -> Result<(String, String), SimErrors> {
        self.validate()?;
        let per_plane = self.sats_per_plane();
        if plane >= self.planes || sat >= per_plane {
            return Err(SimErrors::UnknownSpacecraft(Self::satellite_name(plane, sat)));
        }

        let leading = (sat + 1) % per_plane;
        let trailing = (sat + per_plane - 1) % per_plane;
        Ok((
            Self::satellite_name(plane, leading),
            Self::satellite_name(plane, trailing),
        ))
    }

    /// Updates every member's tracking against its in-plane neighbors.
    pub fn update_tracking(&self, constellation: &mut Constellation) -> Result<(), SimErrors> {
        for plane in 0..self.planes {
            for sat in 0..self.sats_per_plane() {
                let (leading, trailing) = self.in_plane_neighbors(plane, sat)?;
                constellation.update_tracking(
                    &Self::satellite_name(plane, sat),
                    &leading,
                    &trailing,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEG2RAD, PI};
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    fn twelve_three_one() -> WalkerDelta {
        WalkerDelta::new(12, 3, 1, 55.0 * DEG2RAD, 26560.0)
    }

    #[test]
    fn pattern_structure() {
        let walker = twelve_three_one();
        let members = walker.initial_elements().unwrap();
        assert_eq!(members.len(), 12);

        for plane in 0..3 {
            let expected_raan = plane as f64 * TWO_PI / 3.0;
            let in_plane = &members[plane * 4..(plane + 1) * 4];
            for (sat, (name, coe)) in in_plane.iter().enumerate() {
                assert_eq!(name, &format!("plane_{}_sat_{}", plane, sat));
                assert_abs_diff_eq!(coe.raan, expected_raan, epsilon = 1e-12);
                assert_eq!(coe.sma, 26560.0);
                assert_eq!(coe.ecc, 0.0);
                assert_eq!(coe.argp, 0.0);
                assert_abs_diff_eq!(coe.inc, 55.0 * DEG2RAD);
            }
            // First satellite of each plane carries the inter-plane phasing
            assert_abs_diff_eq!(in_plane[0].1.ta, TWO_PI * plane as f64 / 12.0, epsilon = 1e-12);
            for pair in in_plane.windows(2) {
                assert_abs_diff_eq!(pair[1].1.ta - pair[0].1.ta, PI / 2.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn angles_are_wrapped() {
        let walker = WalkerDelta::new(8, 2, 1, 0.9, 7000.0).with_raan0(1.5 * PI);
        for (_, coe) in walker.initial_elements().unwrap() {
            assert!((0.0..TWO_PI).contains(&coe.raan));
            assert!((0.0..TWO_PI).contains(&coe.ta));
        }
        let raans: Vec<f64> = walker
            .initial_elements()
            .unwrap()
            .iter()
            .map(|(_, coe)| coe.raan)
            .collect();
        assert_abs_diff_eq!(raans[0], 1.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(raans[4], 0.5 * PI, epsilon = 1e-12);
    }

    #[test_case(10, 3; "not divisible")]
    #[test_case(12, 0; "no planes")]
    #[test_case(0, 3; "no satellites")]
    fn invalid_patterns(total: usize, planes: usize) {
        let walker = WalkerDelta::new(total, planes, 1, 0.9, 7000.0);
        assert!(matches!(
            walker.initial_elements(),
            Err(SimErrors::InvalidWalkerPattern { .. })
        ));
    }

    #[test_case(1, 0, "plane_1_sat_1", "plane_1_sat_3"; "first wraps behind")]
    #[test_case(2, 3, "plane_2_sat_0", "plane_2_sat_2"; "last wraps ahead")]
    #[test_case(0, 1, "plane_0_sat_2", "plane_0_sat_0"; "middle")]
    fn neighbors(plane: usize, sat: usize, leading: &str, trailing: &str) {
        let (lead, trail) = twelve_three_one().in_plane_neighbors(plane, sat).unwrap();
        assert_eq!(lead, leading);
        assert_eq!(trail, trailing);
    }

    #[test]
    fn neighbor_of_missing_satellite() {
        assert!(twelve_three_one().in_plane_neighbors(3, 0).is_err());
        assert!(twelve_three_one().in_plane_neighbors(0, 4).is_err());
    }

    #[test]
    fn built_constellation_tracks_in_plane_spacing() {
        let walker = twelve_three_one();
        let mut constellation = walker
            .build(CentralBody::earth(), ForceModel::two_body(), 0.0)
            .unwrap();
        assert_eq!(constellation.len(), 12);

        constellation.propagate(1200.0, 60.0).unwrap();
        walker.update_tracking(&mut constellation).unwrap();

        for sc in constellation.spacecraft() {
            let tracking = sc.tracking().unwrap();
            assert_abs_diff_eq!(tracking.separation_1, PI / 2.0, epsilon = 1e-6);
            assert_abs_diff_eq!(tracking.separation_2, PI / 2.0, epsilon = 1e-6);
            assert_abs_diff_eq!(tracking.mean_sma, 26560.0, epsilon = 1e-5);
        }
    }
}

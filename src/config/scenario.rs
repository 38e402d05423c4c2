use crate::constants::DEG2RAD;
use crate::constellation::{Constellation, WalkerDelta};
use crate::coordinates::epoch::parse_epoch;
use crate::errors::SimErrors;
use crate::models::{BoundingBox, CentralBody, Coe};
use crate::physics::dynamics::ForceModel;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// An individually placed spacecraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacecraftConfig {
    pub name: String,
    pub coe: Coe,
}

/// Everything needed to build and run one propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Central body name, looked up in the planetary table
    #[serde(default = "default_body")]
    pub body: String,
    /// Calendar start epoch, e.g. `2024-03-15T00:00:00 UTC`
    #[serde(default = "default_start_epoch")]
    pub start_epoch: String,
    /// Propagation span [s]
    pub duration: f64,
    /// Integrator step [s]
    pub step: f64,
    #[serde(default)]
    pub force_model: ForceModel,
    #[serde(default)]
    pub walker: Option<WalkerDelta>,
    #[serde(default)]
    pub spacecraft: Vec<SpacecraftConfig>,
    #[serde(default)]
    pub bounds: BoundingBox,
    /// Where state histories are written; nothing is exported when absent
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_body() -> String {
    "earth".to_string()
}

fn default_start_epoch() -> String {
    "2024-03-15T00:00:00 UTC".to_string()
}

impl Default for ScenarioConfig {
    /// Galileo-like 27/3/1 Walker Delta at 56° and 29,600 km, three days at 10 s.
    fn default() -> Self {
        ScenarioConfig {
            body: default_body(),
            start_epoch: default_start_epoch(),
            duration: 3.0 * 86400.0,
            step: 10.0,
            force_model: ForceModel::default(),
            walker: Some(WalkerDelta::new(27, 3, 1, 56.0 * DEG2RAD, 29600.0)),
            spacecraft: Vec::new(),
            bounds: BoundingBox {
                d_sma: 5.0,
                d_inc: 0.1 * DEG2RAD,
                d_raan: 0.5 * DEG2RAD,
                d_arglat: 2.0 * DEG2RAD,
            },
            output_dir: Some(PathBuf::from("output")),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(data: &str) -> Result<Self, SimErrors> {
        debug!("Loading scenario YAML:\n{}", data);
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimErrors> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn central_body(&self) -> Result<CentralBody, SimErrors> {
        CentralBody::by_name(&self.body)
    }

    /// Start epoch in ephemeris seconds past J2000.
    pub fn start_et(&self) -> Result<f64, SimErrors> {
        parse_epoch(&self.start_epoch)
    }

    /// The Walker pattern (if any) plus every listed spacecraft, bounded by
    /// the scenario's box.
    pub fn build_constellation(&self) -> Result<Constellation, SimErrors> {
        let body = self.central_body()?;
        let epoch = self.start_et()?;

        let mut constellation = match &self.walker {
            Some(walker) => walker.build(body, self.force_model, epoch)?,
            None => Constellation::new(body, self.force_model, epoch),
        };
        for sc in &self.spacecraft {
            constellation.add_from_coe(sc.name.as_str(), &sc.coe)?;
        }
        constellation.set_bounds(self.bounds);
        Ok(constellation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_is_galileo_like() {
        let scenario = ScenarioConfig::default();
        let constellation = scenario.build_constellation().unwrap();

        assert_eq!(constellation.len(), 27);
        assert_eq!(constellation.body().name, "earth");
        assert!(constellation.force_model().include_j2);
        assert_eq!(scenario.duration, 259200.0);
        assert_abs_diff_eq!(
            constellation.spacecraft()[0].state().inc,
            56.0 * DEG2RAD,
            epsilon = 1e-12
        );
    }

    #[test]
    fn bundled_scenario_parses() {
        let scenario =
            ScenarioConfig::from_yaml_str(include_str!("../../scenarios/galileo_walker.yaml"))
                .unwrap();
        let walker = scenario.walker.unwrap();
        assert_eq!((walker.total, walker.planes, walker.phasing), (27, 3, 1));
        assert_eq!(scenario.spacecraft.len(), 1);
        assert_eq!(scenario.step, 10.0);

        let constellation = scenario.build_constellation().unwrap();
        assert_eq!(constellation.len(), 28);
        assert!(constellation.get("spare").is_some());
    }

    #[test]
    fn minimal_scenario_uses_defaults() {
        let yaml = "
duration: 600.0
step: 60.0
body: Mars
spacecraft:
  - name: probe
    coe: {sma: 4000.0, ecc: 0.01, inc: 0.3, raan: 0.0, argp: 0.0, ta: 0.0}
";
        let scenario = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert!(scenario.walker.is_none());
        assert!(scenario.output_dir.is_none());
        assert_eq!(scenario.bounds, BoundingBox::default());

        let constellation = scenario.build_constellation().unwrap();
        assert_eq!(constellation.len(), 1);
        assert_eq!(constellation.body().name, "mars");
    }

    #[test]
    fn bad_inputs_surface_as_errors() {
        assert!(matches!(
            ScenarioConfig::from_yaml_str("step: 10.0\n"),
            Err(SimErrors::ConfigError(_))
        ));

        let mut scenario = ScenarioConfig::default();
        scenario.body = "pluto".to_string();
        assert!(matches!(
            scenario.build_constellation(),
            Err(SimErrors::UnknownBody(_))
        ));

        assert!(matches!(
            ScenarioConfig::from_file("does/not/exist.yaml"),
            Err(SimErrors::IoError(_))
        ));
    }
}

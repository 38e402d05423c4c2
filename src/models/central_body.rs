use crate::config::bodies::PLANETS;
use crate::errors::SimErrors;
use serde::{Deserialize, Serialize};

/// Gravitational and shape parameters of the body everything orbits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralBody {
    pub name: String,
    /// Gravitational parameter [km³/s²]
    pub mu: f64,
    /// Mean radius [km]
    pub mean_radius: f64,
    /// Equatorial radius [km], used by the J2 term
    pub equatorial_radius: f64,
    /// Polar radius [km]
    pub polar_radius: f64,
    /// Oblateness coefficient [-]
    pub j2: f64,
}

impl CentralBody {
    /// Looks a body up in the built-in planetary table (case-insensitive).
    pub fn by_name(name: &str) -> Result<Self, SimErrors> {
        PLANETS
            .get(name.to_lowercase().as_str())
            .cloned()
            .ok_or_else(|| SimErrors::UnknownBody(name.to_string()))
    }

    pub fn earth() -> Self {
        crate::config::bodies::earth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mars = CentralBody::by_name("Mars").unwrap();
        assert_eq!(mars.name, "mars");
        assert_eq!(mars.mu, 42828.0);
    }

    #[test]
    fn unknown_body() {
        assert!(matches!(
            CentralBody::by_name("vulcan"),
            Err(SimErrors::UnknownBody(name)) if name == "vulcan"
        ));
    }

    #[test]
    fn earth_matches_table() {
        assert_eq!(CentralBody::earth(), CentralBody::by_name("earth").unwrap());
    }
}

use crate::constants::{EARTH_J2, EARTH_MU, EARTH_R_EQUATOR, EARTH_R_MEAN, EARTH_R_POLE};
use crate::models::CentralBody;
use lazy_static::lazy_static;
use std::collections::HashMap;

// GSFC planetary fact sheet values: (name, mu [km³/s²], mean radius [km],
// equatorial radius [km], polar radius [km], J2)
const FACT_SHEET: [(&str, f64, f64, f64, f64, f64); 8] = [
    ("mercury", 22032.0, 2439.7, 2440.5, 2438.3, 5.03e-5),
    ("venus", 324860.0, 6051.8, 6051.8, 6051.8, 4.458e-6),
    ("earth", EARTH_MU, EARTH_R_MEAN, EARTH_R_EQUATOR, EARTH_R_POLE, EARTH_J2),
    ("mars", 42828.0, 3389.5, 3396.2, 3376.2, 1.96045e-3),
    ("jupiter", 126687000.0, 69911.0, 71492.0, 66854.0, 0.014736),
    ("saturn", 37931000.0, 58232.0, 60268.0, 54364.0, 0.016298),
    ("uranus", 5794000.0, 25362.0, 25559.0, 24973.0, 0.00334343),
    ("neptune", 6835100.0, 24622.0, 24764.0, 24341.0, 0.003411),
];

lazy_static! {
    pub static ref PLANETS: HashMap<&'static str, CentralBody> = FACT_SHEET
        .iter()
        .map(|&(name, mu, mean_radius, equatorial_radius, polar_radius, j2)| {
            (
                name,
                CentralBody {
                    name: name.to_string(),
                    mu,
                    mean_radius,
                    equatorial_radius,
                    polar_radius,
                    j2,
                },
            )
        })
        .collect();
}

pub fn earth() -> CentralBody {
    CentralBody {
        name: "earth".to_string(),
        mu: EARTH_MU,
        mean_radius: EARTH_R_MEAN,
        equatorial_radius: EARTH_R_EQUATOR,
        polar_radius: EARTH_R_POLE,
        j2: EARTH_J2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_all_planets() {
        assert_eq!(PLANETS.len(), 8);
        for (name, body) in PLANETS.iter() {
            assert_eq!(*name, body.name);
            assert!(body.equatorial_radius >= body.polar_radius);
            assert!(body.mu > 0.0);
        }
    }
}

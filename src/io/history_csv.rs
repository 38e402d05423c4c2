use crate::constellation::Constellation;
use crate::errors::SimErrors;
use crate::models::StateHistory;
use csv::Writer;
use log::info;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 13] = [
    "et", "rx", "ry", "rz", "vx", "vy", "vz", "sma", "ecc", "inc", "raan", "argp", "ta",
];

/// Writes one row per history entry: epoch, Cartesian state, then elements.
/// Values are written with full round-trip precision.
pub fn write_history<W: Write>(writer: W, history: &StateHistory) -> Result<(), SimErrors> {
    history.check_consistency()?;

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for (et, cart, coe) in history.rows() {
        let record = std::iter::once(et)
            .chain(cart.iter().copied())
            .chain(coe.iter().copied())
            .map(|value| value.to_string());
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_history<P: AsRef<Path>>(path: P, history: &StateHistory) -> Result<(), SimErrors> {
    write_history(File::create(path)?, history)
}

/// Saves every spacecraft's history as `<dir>/<name>.csv`. A name seen before
/// gets the number of earlier occurrences appended (`sat`, `sat1`, `sat2`, ...).
pub fn save_constellation_histories<P: AsRef<Path>>(
    dir: P,
    constellation: &Constellation,
) -> Result<Vec<PathBuf>, SimErrors> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut written = Vec::with_capacity(constellation.len());
    for sc in constellation.spacecraft() {
        let count = seen.entry(sc.name()).or_insert(0);
        let file_name = if *count == 0 {
            format!("{}.csv", sc.name())
        } else {
            format!("{}{}.csv", sc.name(), count)
        };
        *count += 1;

        let path = dir.join(file_name);
        save_history(&path, sc.history())?;
        written.push(path);
    }

    info!("Wrote {} state histories to {}", written.len(), dir.display());
    Ok(written)
}

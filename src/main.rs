use constellation_sim::config::scenario::ScenarioConfig;
use constellation_sim::constants::RAD2DEG;
use constellation_sim::coordinates::epoch::format_epoch;
use constellation_sim::io::history_csv::save_constellation_histories;
use constellation_sim::physics::energy::{angular_momentum, specific_energy};
use log::{info, warn};
use std::env;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let scenario = match env::args().nth(1) {
        Some(path) => {
            info!("Loading scenario from {}", path);
            ScenarioConfig::from_file(&path)?
        }
        None => {
            info!("No scenario given, running the default Walker Delta");
            ScenarioConfig::default()
        }
    };

    let mut constellation = scenario.build_constellation()?;
    let mu = constellation.body().mu;
    info!(
        "{} spacecraft about {} starting {}",
        constellation.len(),
        constellation.body().name,
        format_epoch(constellation.epoch())?
    );

    // Conservation diagnostics are only meaningful without J2
    let initial: Vec<(f64, f64)> = constellation
        .spacecraft()
        .iter()
        .map(|sc| {
            (
                specific_energy(sc.state(), mu),
                angular_momentum(sc.state()).magnitude(),
            )
        })
        .collect();

    constellation.propagate(scenario.duration, scenario.step)?;

    if let Some(walker) = &scenario.walker {
        walker.update_tracking(&mut constellation)?;
    }

    for (sc, (energy0, h0)) in constellation.spacecraft().iter().zip(&initial) {
        let energy_error = (specific_energy(sc.state(), mu) - energy0).abs() / energy0.abs();
        let h_error = (angular_momentum(sc.state()).magnitude() - h0).abs() / h0;
        match sc.tracking() {
            Some(t) => info!(
                "{}: mean sma {:.3} km, inc {:.4} deg, raan {:.4} deg; {} at {:.3} deg, {} at {:.3} deg",
                sc.name(),
                t.mean_sma,
                t.mean_inc * RAD2DEG,
                t.mean_raan * RAD2DEG,
                t.neighbor_1,
                t.separation_1 * RAD2DEG,
                t.neighbor_2,
                t.separation_2 * RAD2DEG
            ),
            None => info!("{}: sma {:.3} km", sc.name(), sc.state().sma),
        }
        info!(
            "{}: relative energy drift {:.3e}, angular momentum drift {:.3e}",
            sc.name(),
            energy_error,
            h_error
        );
    }

    for (name, violation) in constellation.out_of_bounds() {
        warn!("{} is out of bounds: {:?}", name, violation);
    }

    if let Some(dir) = &scenario.output_dir {
        let written = save_constellation_histories(dir, &constellation)?;
        println!(
            "Propagated {} spacecraft to {}; histories in {}",
            written.len(),
            format_epoch(constellation.epoch())?,
            dir.display()
        );
    }

    Ok(())
}

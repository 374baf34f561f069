//! Orrery - Circular-Orbit Solar System Simulator
//!
//! Headless runner: advances the reference system (or a catalog file) at a
//! fixed cadence and logs body positions as it goes.
//!
//! Usage:
//!   cargo run -- --days 365 --report-every 30

use std::path::PathBuf;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

use orrery::catalog::Catalog;
use orrery::presets::reference_system;
use orrery::system::SolarSystem;
use orrery::time::{LatestSnapshot, SimulationControl, SimulationSet, TimePlugin};
use orrery::types::{DEFAULT_STEP_DAYS, SimulationClock};

/// Circular-orbit solar system simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulated days to run before exiting
    #[arg(long, default_value_t = 365.0, value_parser = parse_days)]
    days: f64,

    /// Simulated days per tick
    #[arg(long, default_value_t = DEFAULT_STEP_DAYS, value_parser = parse_step_days)]
    step_days: f64,

    /// Wall-clock milliseconds between ticks
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Load bodies from a le-systeme-solaire JSON file instead of the built-in system
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log positions every N ticks (0 disables)
    #[arg(long, default_value_t = 30)]
    report_every: u64,
}

fn parse_positive(value: &str, what: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|e| format!("invalid {what} '{value}': {e}"))?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("{what} must be finite and positive, got {value}"))
    }
}

fn parse_step_days(value: &str) -> Result<f64, String> {
    parse_positive(value, "step size")
}

fn parse_days(value: &str) -> Result<f64, String> {
    parse_positive(value, "run length")
}

/// Run settings the reporting system needs.
#[derive(Resource, Debug)]
struct RunSettings {
    days: f64,
    report_every: u64,
}

fn load_system(args: &Args) -> Option<SolarSystem> {
    match &args.catalog {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => {
                info!("Loaded {} catalog records from {}", catalog.len(), path.display());
                Some(catalog.build_system())
            }
            Err(err) => {
                error!("Failed to read catalog {}: {err}", path.display());
                None
            }
        },
        None => match reference_system() {
            Ok(system) => Some(system),
            Err(err) => {
                error!("Failed to build reference system: {err}");
                None
            }
        },
    }
}

fn main() -> AppExit {
    let args = Args::parse();
    let tick_interval = Duration::from_millis(args.tick_ms.max(1));

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick_interval)),
        LogPlugin::default(),
    ));

    let Some(system) = load_system(&args) else {
        return AppExit::error();
    };
    info!("Simulating {} bodies for {} days", system.len(), args.days);

    app.insert_resource(system)
        .insert_resource(RunSettings {
            days: args.days,
            report_every: args.report_every,
        })
        .add_plugins(
            TimePlugin::default()
                .with_step_days(args.step_days)
                .with_tick_interval(tick_interval),
        )
        .add_systems(FixedUpdate, report_progress.after(SimulationSet::Step));

    app.world_mut().write_message(SimulationControl::Start);

    app.run()
}

/// Log positions periodically and exit once enough days have passed.
fn report_progress(
    clock: Res<SimulationClock>,
    latest: Res<LatestSnapshot>,
    settings: Res<RunSettings>,
    mut last_reported: Local<u64>,
    mut exit: MessageWriter<AppExit>,
) {
    if clock.ticks != *last_reported {
        *last_reported = clock.ticks;
        if settings.report_every > 0 && clock.ticks % settings.report_every == 0 {
            report(&clock, &latest);
        }
    }

    if let Some(exit_code) = finished(&clock, settings.days) {
        exit.write(exit_code);
    }
}

fn report(clock: &SimulationClock, latest: &LatestSnapshot) {
    let snapshot = latest.get();
    info!("Day {:.1} (tick {})", clock.elapsed_days, snapshot.tick());
    for body in snapshot.bodies() {
        debug!(
            "  {:<10} ({:>9.2}, {:>9.2}, {:>9.2}) at {:>6.1} deg",
            body.name,
            body.position.x,
            body.position.y,
            body.position.z,
            body.angle_degrees()
        );
    }
}

/// Exit code once the run is over: success after `days` simulated days, an
/// error if the clock stopped early (the driver stops it on a failed step).
fn finished(clock: &SimulationClock, days: f64) -> Option<AppExit> {
    if clock.elapsed_days >= days {
        info!(
            "Reached {:.1} days after {} ticks, exiting",
            clock.elapsed_days, clock.ticks
        );
        Some(AppExit::Success)
    } else if !clock.running {
        error!("Simulation stopped after {} ticks, exiting", clock.ticks);
        Some(AppExit::error())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_days_must_be_positive() {
        assert_eq!(parse_step_days("0.5"), Ok(0.5));
        assert!(parse_step_days("0").is_err());
        assert!(parse_step_days("-1").is_err());
        assert!(parse_step_days("inf").is_err());
        assert!(parse_step_days("NaN").is_err());
        assert!(parse_step_days("day").is_err());
    }

    #[test]
    fn test_cli_rejects_zero_step() {
        assert!(Args::try_parse_from(["orrery", "--step-days", "0"]).is_err());
        assert!(Args::try_parse_from(["orrery", "--days", "-3"]).is_err());
        let args = Args::try_parse_from(["orrery", "--step-days", "2"]).unwrap();
        assert_eq!(args.step_days, 2.0);
    }

    #[test]
    fn test_stopped_clock_ends_the_run_with_error() {
        let mut clock = SimulationClock::with_step_days(-1.0);
        assert_eq!(finished(&clock, 10.0), Some(AppExit::error()));

        clock.start();
        assert_eq!(finished(&clock, 10.0), None);
    }

    #[test]
    fn test_run_ends_after_requested_days() {
        let mut clock = SimulationClock::with_step_days(5.0);
        clock.start();
        clock.record_tick();
        assert_eq!(finished(&clock, 10.0), None);
        clock.record_tick();
        assert_eq!(finished(&clock, 10.0), Some(AppExit::Success));
    }
}

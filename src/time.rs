//! Periodic driver for the solar system.
//!
//! The [`SolarSystem`] resource is only ever mutated from the `FixedUpdate`
//! schedule, one step per fixed tick (50 ms by default). After each step or
//! reset the driver publishes an immutable [`SystemSnapshot`] into
//! [`LatestSnapshot`]; renderers and UI read that instead of the live system.
//!
//! Controls arrive as [`SimulationControl`] messages and are applied before
//! the step in the same fixed tick, so once a stop has been applied no
//! further step runs.

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;

use crate::snapshot::SystemSnapshot;
use crate::system::SolarSystem;
use crate::types::{DEFAULT_STEP_DAYS, DEFAULT_TICK_INTERVAL, SimulationClock};

/// Start/stop/reset requests. All three are idempotent.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationControl {
    Start,
    Stop,
    /// Stop, clear the clock and put every orbiting body back at angle 0.
    Reset,
}

/// Most recent snapshot published by the driver.
#[derive(Resource, Clone, Debug, Default)]
pub struct LatestSnapshot(pub Arc<SystemSnapshot>);

impl LatestSnapshot {
    /// Shared handle to the snapshot; cheap to clone and hand to another thread.
    pub fn get(&self) -> Arc<SystemSnapshot> {
        Arc::clone(&self.0)
    }
}

/// System set for ordering the fixed-tick systems.
///
/// Controls must be applied before the step so a stop takes effect
/// in the same tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Start/stop/reset handling (runs first)
    Controls,
    /// Orbital update and snapshot publication
    Step,
}

/// Plugin providing the fixed-cadence simulation driver.
pub struct TimePlugin {
    step_days: f64,
    tick_interval: Duration,
    start_running: bool,
}

impl Default for TimePlugin {
    fn default() -> Self {
        Self {
            step_days: DEFAULT_STEP_DAYS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            start_running: false,
        }
    }
}

impl TimePlugin {
    /// Simulated days applied per tick.
    pub fn with_step_days(mut self, step_days: f64) -> Self {
        self.step_days = step_days;
        self
    }

    /// Wall-clock time between ticks.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Whether the clock is running as soon as the app starts.
    pub fn start_running(mut self, running: bool) -> Self {
        self.start_running = running;
        self
    }
}

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        let mut clock = SimulationClock::with_step_days(self.step_days);
        clock.running = self.start_running;

        app.insert_resource(clock)
            .insert_resource(Time::<Fixed>::from_duration(self.tick_interval))
            .init_resource::<SolarSystem>()
            .init_resource::<LatestSnapshot>()
            .add_message::<SimulationControl>()
            .configure_sets(
                FixedUpdate,
                SimulationSet::Step.after(SimulationSet::Controls),
            )
            .add_systems(Startup, publish_initial_snapshot)
            .add_systems(
                FixedUpdate,
                (
                    apply_controls.in_set(SimulationSet::Controls),
                    advance_simulation
                        .in_set(SimulationSet::Step)
                        .run_if(clock_running),
                ),
            );
    }
}

/// Run condition: the clock is running.
pub fn clock_running(clock: Res<SimulationClock>) -> bool {
    clock.running
}

fn publish_initial_snapshot(system: Res<SolarSystem>, mut latest: ResMut<LatestSnapshot>) {
    latest.0 = Arc::new(system.snapshot());
}

/// Apply pending start/stop/reset requests.
fn apply_controls(
    mut controls: MessageReader<SimulationControl>,
    mut clock: ResMut<SimulationClock>,
    mut system: ResMut<SolarSystem>,
    mut latest: ResMut<LatestSnapshot>,
) {
    for control in controls.read() {
        match control {
            SimulationControl::Start => {
                if clock.start() {
                    info!("Simulation running");
                }
            }
            SimulationControl::Stop => {
                if clock.stop() {
                    info!("Simulation paused");
                }
            }
            SimulationControl::Reset => {
                clock.reset();
                system.reset();
                latest.0 = Arc::new(system.snapshot());
                info!("Simulation reset");
            }
        }
    }
}

/// Apply one tick to the solar system and publish the result.
///
/// A failed step stops the clock; nothing is published for it.
fn advance_simulation(
    mut system: ResMut<SolarSystem>,
    mut clock: ResMut<SimulationClock>,
    mut latest: ResMut<LatestSnapshot>,
) {
    match system.step(clock.step_days) {
        Ok(snapshot) => {
            clock.record_tick();
            latest.0 = Arc::new(snapshot);
        }
        Err(err) => {
            error!("Simulation step failed, stopping: {err}");
            clock.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn driver_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(TimePlugin::default());
        let (system, _, _, _) = fixtures::sun_planet_moon();
        app.insert_resource(system);
        app
    }

    fn tick(app: &mut App) {
        app.world_mut().run_schedule(FixedUpdate);
    }

    #[test]
    fn test_stopped_clock_does_not_step() {
        let mut app = driver_app();
        tick(&mut app);
        tick(&mut app);
        assert_eq!(app.world().resource::<SolarSystem>().steps(), 0);
        assert_eq!(app.world().resource::<SimulationClock>().ticks, 0);
    }

    #[test]
    fn test_start_message_begins_stepping() {
        let mut app = driver_app();
        app.world_mut().write_message(SimulationControl::Start);
        tick(&mut app);
        tick(&mut app);

        let clock = app.world().resource::<SimulationClock>();
        assert!(clock.running);
        assert_eq!(clock.ticks, 2);
        assert_eq!(app.world().resource::<LatestSnapshot>().get().tick(), 2);
    }

    #[test]
    fn test_failed_step_stops_clock() {
        let mut app = driver_app();
        {
            let mut clock = app.world_mut().resource_mut::<SimulationClock>();
            clock.step_days = -1.0;
            clock.start();
        }
        tick(&mut app);

        assert!(!app.world().resource::<SimulationClock>().running);
        assert_eq!(app.world().resource::<SolarSystem>().steps(), 0);
    }
}

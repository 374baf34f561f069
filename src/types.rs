//! Shared constants and the simulation clock resource.

use std::time::Duration;

use bevy::prelude::*;

/// Full turn in radians.
pub const TAU: f64 = std::f64::consts::TAU;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Simulated days advanced by one tick of the reference driver.
pub const DEFAULT_STEP_DAYS: f64 = 1.0;

/// Wall-clock cadence of the reference driver (~20 ticks per second).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Driver-side simulation state.
///
/// The solar system itself has no notion of running or paused; this resource
/// carries that state for the periodic driver in [`crate::time`].
#[derive(Resource, Clone, Debug)]
pub struct SimulationClock {
    /// Whether ticks are currently being applied
    pub running: bool,
    /// Simulated days applied per tick
    pub step_days: f64,
    /// Ticks applied since the last reset
    pub ticks: u64,
    /// Simulated days elapsed since the last reset
    pub elapsed_days: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            running: false,
            step_days: DEFAULT_STEP_DAYS,
            ticks: 0,
            elapsed_days: 0.0,
        }
    }
}

impl SimulationClock {
    /// Create a stopped clock with a custom step size.
    pub fn with_step_days(step_days: f64) -> Self {
        Self {
            step_days,
            ..Self::default()
        }
    }

    /// Start ticking. Returns `false` if the clock was already running.
    pub fn start(&mut self) -> bool {
        let changed = !self.running;
        self.running = true;
        changed
    }

    /// Stop ticking. Returns `false` if the clock was already stopped.
    pub fn stop(&mut self) -> bool {
        let changed = self.running;
        self.running = false;
        changed
    }

    /// Record one applied tick.
    pub fn record_tick(&mut self) {
        self.ticks += 1;
        self.elapsed_days += self.step_days;
    }

    /// Stop and clear the counters. The step size is kept.
    pub fn reset(&mut self) {
        self.running = false;
        self.ticks = 0;
        self.elapsed_days = 0.0;
    }
}

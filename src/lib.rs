//! Orrery - Circular-Orbit Solar System Simulator
//!
//! A library crate providing the body model, the solar system container and
//! a fixed-cadence Bevy driver, for embedding and integration tests.

pub mod bodies;
pub mod catalog;
pub mod presets;
pub mod snapshot;
pub mod system;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_utils;

//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::DVec3;
use bevy::prelude::*;
use orrery::bodies::{BodyId, CelestialBody};
use orrery::system::SolarSystem;
use orrery::time::TimePlugin;

/// Star, planet (r=100, T=360) and moon (r=10, T=30).
pub fn sun_planet_moon() -> (SolarSystem, BodyId, BodyId) {
    let mut system = SolarSystem::new();
    system
        .add_celestial_body(
            CelestialBody::star("Sun", 1.989e30, 695_700.0, 3.828e26, 5778.0).unwrap(),
        )
        .unwrap();
    let planet = system
        .add_celestial_body(planet("Planet", 100.0, 360.0))
        .unwrap();
    let moon = system
        .add_celestial_body(moon("Moon", 10.0, 30.0, planet))
        .unwrap();
    (system, planet, moon)
}

pub fn planet(name: &str, orbital_radius: f64, period: f64) -> CelestialBody {
    CelestialBody::planet(name, 1.0e24, 5000.0, orbital_radius, period).unwrap()
}

pub fn moon(name: &str, orbital_radius: f64, period: f64, parent: BodyId) -> CelestialBody {
    CelestialBody::moon(name, 1.0e22, 1000.0, orbital_radius, period, parent).unwrap()
}

/// Expected position for an angle on a circle around `center`.
pub fn on_circle(center: DVec3, radius: f64, angle: f64) -> DVec3 {
    center + DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// Distance between every moon and its parent, paired with the moon's orbital radius.
pub fn moon_offsets(system: &SolarSystem) -> Vec<(f64, f64)> {
    system
        .celestial_bodies()
        .iter()
        .filter_map(|body| {
            let parent = system.get(body.parent()?)?;
            let radius = body.orbit()?.radius();
            Some(((body.position() - parent.position()).length(), radius))
        })
        .collect()
}

/// Headless app running the simulation driver over `system`.
pub fn driver_app(system: SolarSystem) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(system)
        .add_plugins(TimePlugin::default());
    app
}

/// Run one fixed tick regardless of wall-clock time.
pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

//! Test utilities for orbital update tests.
//!
//! Provides small fixture systems and assertions for the geometric
//! invariants every planet and moon must satisfy after an update.

use bevy::math::DVec3;

use crate::bodies::{BodyId, CelestialBody};
use crate::system::SolarSystem;

/// Fixtures for building test systems.
pub mod fixtures {
    use super::*;

    /// A Sun-like star at the origin.
    pub fn sun() -> CelestialBody {
        CelestialBody::star("Sun", 1.989e30, 695_700.0, 3.828e26, 5778.0)
            .expect("valid star parameters")
    }

    /// Star + planet (r=100, T=360) + moon (r=10, T=30).
    ///
    /// Returns the system and the ids of the star, planet and moon.
    pub fn sun_planet_moon() -> (SolarSystem, BodyId, BodyId, BodyId) {
        let mut system = SolarSystem::new();
        let sun = system.add_celestial_body(sun()).expect("star insert");
        let planet = system
            .add_celestial_body(
                CelestialBody::planet("Planet", 5.97e24, 6371.0, 100.0, 360.0)
                    .expect("valid planet parameters"),
            )
            .expect("planet insert");
        let moon = system
            .add_celestial_body(
                CelestialBody::moon("Moon", 7.35e22, 1737.0, 10.0, 30.0, planet)
                    .expect("valid moon parameters"),
            )
            .expect("moon insert");
        (system, sun, planet, moon)
    }
}

/// Assertions for verifying orbital invariants.
pub mod assertions {
    use super::*;

    /// Assert that a planet sits exactly where its angle says it should.
    ///
    /// # Panics
    /// Panics if the body has no orbit or the position differs.
    pub fn assert_on_circle(body: &CelestialBody, center: DVec3, tolerance: f64) {
        let orbit = body.orbit().expect("body should be on an orbit");
        let expected = center
            + DVec3::new(
                orbit.radius() * body.angle().cos(),
                0.0,
                orbit.radius() * body.angle().sin(),
            );
        let error = (body.position() - expected).length();
        assert!(
            error <= tolerance,
            "{} off its circle: position={:?}, expected={:?}, error={error:.3e}",
            body.name(),
            body.position(),
            expected
        );
    }

    /// Assert that every moon in the system is one orbital radius from its parent.
    ///
    /// # Panics
    /// Panics on the first moon that violates the invariant.
    pub fn assert_moons_follow_parents(system: &SolarSystem, tolerance: f64) {
        for body in system.celestial_bodies() {
            let Some(parent) = body.parent() else {
                continue;
            };
            let parent_pos = system
                .get(parent)
                .expect("parent should exist")
                .position();
            assert_on_circle(body, parent_pos, tolerance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_satisfies_invariants() {
        let (mut system, _, planet, _) = fixtures::sun_planet_moon();
        assertions::assert_moons_follow_parents(&system, 1e-9);

        system.simulate_movement(17.0).unwrap();
        assertions::assert_on_circle(system.get(planet).unwrap(), DVec3::ZERO, 0.0);
        assertions::assert_moons_follow_parents(&system, 1e-9);
    }

    #[test]
    #[should_panic(expected = "off its circle")]
    fn test_assert_on_circle_detects_drift() {
        let (mut system, _, planet, _) = fixtures::sun_planet_moon();
        system
            .get_mut(planet)
            .unwrap()
            .set_position(DVec3::new(1.0, 2.0, 3.0));
        assertions::assert_on_circle(system.get(planet).unwrap(), DVec3::ZERO, 1e-9);
    }
}

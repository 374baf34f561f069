//! Property-based tests for circular orbit updates using proptest.
//!
//! These tests verify that angle normalization and position reconstruction
//! hold across a wide range of inputs.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::{BodyId, CelestialBody, normalize_angle};
use crate::types::TAU;

/// Smallest distance between two angles on the circle.
fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Normalized angles always land in [0, 2π) and stay congruent to the input.
    #[test]
    fn prop_normalize_angle_range(angle in -1.0e4f64..1.0e4) {
        let n = normalize_angle(angle);
        prop_assert!((0.0..TAU).contains(&n), "angle {} normalized to {}", angle, n);
        prop_assert!(
            angular_distance(n, angle) < 1e-9,
            "angle {} not congruent to {}", angle, n
        );
    }

    /// One update advances the phase by ω·Δt modulo 2π.
    #[test]
    fn prop_update_advances_by_angular_velocity(
        start in 0.0f64..TAU,
        period in 0.5f64..70_000.0,
        step in 0.0f64..500.0,
    ) {
        let mut planet = CelestialBody::planet("P", 1.0, 1.0, 1.0e3, period).unwrap();
        planet.set_angle(start);
        planet.update_position(step, DVec3::ZERO);

        let expected = start + TAU / period * step;
        prop_assert!((0.0..TAU).contains(&planet.angle()));
        prop_assert!(
            angular_distance(planet.angle(), expected) < 1e-9,
            "angle {} expected {} (mod 2π)", planet.angle(), expected
        );
    }

    /// Planet position is always the exact function of radius and angle.
    #[test]
    fn prop_planet_position_matches_angle(
        radius in 0.0f64..1.0e9,
        period in 1.0f64..70_000.0,
        steps in proptest::collection::vec(0.0f64..100.0, 1..50),
    ) {
        let mut planet = CelestialBody::planet("P", 1.0, 1.0, radius, period).unwrap();
        for step in steps {
            planet.update_position(step, DVec3::ZERO);
            let angle = planet.angle();
            let expected = DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin());
            prop_assert_eq!(planet.position(), expected);
        }
    }

    /// A moon sits exactly one orbital radius from its parent, along its phase.
    #[test]
    fn prop_moon_offset_from_parent(
        parent_x in -1.0e6f64..1.0e6,
        parent_z in -1.0e6f64..1.0e6,
        radius in 1.0f64..1.0e5,
        period in 1.0f64..1000.0,
        step in 0.0f64..100.0,
    ) {
        let parent = DVec3::new(parent_x, 0.0, parent_z);
        let mut moon = CelestialBody::moon("M", 1.0, 1.0, radius, period, BodyId::new(0)).unwrap();
        moon.update_position(step, parent);

        let rel = moon.position() - parent;
        prop_assert!(
            ((rel.length() - radius) / radius).abs() < 1e-9,
            "distance {} expected {}", rel.length(), radius
        );
        let dir = rel / radius;
        prop_assert!((dir.x - moon.angle().cos()).abs() < 1e-6);
        prop_assert!(dir.y.abs() < 1e-12);
        prop_assert!((dir.z - moon.angle().sin()).abs() < 1e-6);
    }

    /// Stepping through one full period returns to the starting phase.
    #[test]
    fn prop_full_period_returns_to_start(
        start in 0.0f64..TAU,
        period in 1.0f64..1000.0,
        ticks in 1usize..200,
    ) {
        let mut planet = CelestialBody::planet("P", 1.0, 1.0, 100.0, period).unwrap();
        planet.set_angle(start);
        let step = period / ticks as f64;
        for _ in 0..ticks {
            planet.update_position(step, DVec3::ZERO);
        }
        prop_assert!(
            angular_distance(planet.angle(), start) < 1e-8,
            "after one period angle {} expected {}", planet.angle(), start
        );
    }
}

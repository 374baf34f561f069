//! Immutable copies of body state taken at step boundaries.
//!
//! The periodic driver mutates the [`crate::system::SolarSystem`] on its own
//! schedule. Anything that renders or displays positions reads a snapshot
//! instead, so it never observes a half-applied tick.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::bodies::{BodyId, BodyKind, CelestialBody};
use crate::types::RAD_TO_DEG;

/// Variant tag and the read-only properties a display needs for it.
#[derive(Clone, Debug, PartialEq)]
pub enum BodyDetails {
    Star {
        luminosity: f64,
        temperature: f64,
    },
    Planet {
        orbital_radius: f64,
        orbital_period: f64,
        color: Color,
        size: f64,
    },
    Moon {
        orbital_radius: f64,
        orbital_period: f64,
        color: Color,
        size: f64,
        parent: BodyId,
    },
    Free {
        velocity: DVec3,
    },
}

/// State of one body at a step boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    /// Mass in kg
    pub mass: f64,
    /// Physical radius in km
    pub radius: f64,
    pub position: DVec3,
    /// Orbital angle in radians
    pub angle: f64,
    pub details: BodyDetails,
}

impl BodySnapshot {
    pub(crate) fn capture(id: BodyId, body: &CelestialBody) -> Self {
        let details = match body.kind() {
            BodyKind::Star(star) => BodyDetails::Star {
                luminosity: star.luminosity(),
                temperature: star.temperature(),
            },
            BodyKind::Planet(planet) => BodyDetails::Planet {
                orbital_radius: planet.orbit().radius(),
                orbital_period: planet.orbit().period(),
                color: planet.appearance().color,
                size: planet.appearance().size,
            },
            BodyKind::Moon(moon) => BodyDetails::Moon {
                orbital_radius: moon.orbit().radius(),
                orbital_period: moon.orbit().period(),
                color: moon.appearance().color,
                size: moon.appearance().size,
                parent: moon.parent(),
            },
            BodyKind::Free => BodyDetails::Free {
                velocity: body.velocity(),
            },
        };

        Self {
            id,
            name: body.name().to_string(),
            mass: body.mass(),
            radius: body.radius(),
            position: body.position(),
            angle: body.angle(),
            details,
        }
    }

    /// Orbital angle in degrees, for info display.
    pub fn angle_degrees(&self) -> f64 {
        self.angle * RAD_TO_DEG
    }

    pub fn parent(&self) -> Option<BodyId> {
        match self.details {
            BodyDetails::Moon { parent, .. } => Some(parent),
            _ => None,
        }
    }

    /// Radius of the circle to draw for this body's orbit.
    pub fn orbital_radius(&self) -> Option<f64> {
        match self.details {
            BodyDetails::Planet { orbital_radius, .. } | BodyDetails::Moon { orbital_radius, .. } => {
                Some(orbital_radius)
            }
            _ => None,
        }
    }
}

/// State of the whole system after a given number of steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemSnapshot {
    tick: u64,
    bodies: Vec<BodySnapshot>,
}

impl SystemSnapshot {
    pub(crate) fn new(tick: u64, bodies: Vec<BodySnapshot>) -> Self {
        Self { tick, bodies }
    }

    /// Steps applied when this snapshot was taken.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Bodies in system insertion order.
    pub fn bodies(&self) -> &[BodySnapshot] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&BodySnapshot> {
        self.bodies.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<&BodySnapshot> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Position of every body, in insertion order.
    pub fn positions(&self) -> impl Iterator<Item = (&str, DVec3)> {
        self.bodies.iter().map(|b| (b.name.as_str(), b.position))
    }
}

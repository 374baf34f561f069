//! The solar system aggregate.
//!
//! [`SolarSystem`] owns every body in an insertion-ordered arena and advances
//! them one tick at a time. Moons refer to their parent planet by [`BodyId`],
//! so the arena is the single owner of all state.
//!
//! Each step runs in two phases: bodies without a parent first (stars,
//! planets, free bodies, in insertion order), then moons (in insertion order).
//! A moon therefore always reads its parent's position for the *current*
//! tick, no matter where it was inserted.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::bodies::{BodyId, CelestialBody};
use crate::snapshot::{BodySnapshot, SystemSnapshot};

/// Failures raised by the aggregate.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    #[error("moon '{moon}' references unknown parent {parent:?}")]
    UnknownParent { moon: String, parent: BodyId },

    #[error("moon '{moon}' references '{parent}', which is not a planet")]
    ParentNotPlanet { moon: String, parent: String },

    #[error("invalid time step {0} (must be finite and non-negative)")]
    InvalidTimeStep(f64),
}

/// Ordered collection of bodies driven one step at a time.
///
/// There is no clock in here: the system only moves when
/// [`simulate_movement`](Self::simulate_movement) is called.
#[derive(Resource, Clone, Debug, Default)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    /// Steps applied since construction or the last reset
    steps: u64,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a body and return its id.
    ///
    /// A moon must name a planet already in the system. Planets and moons are
    /// placed at the position their current angle implies.
    pub fn add_celestial_body(&mut self, mut body: CelestialBody) -> Result<BodyId, SystemError> {
        let parent_position = match body.parent() {
            Some(parent_id) => {
                let parent = self.bodies.get(parent_id.index()).ok_or_else(|| {
                    SystemError::UnknownParent {
                        moon: body.name().to_string(),
                        parent: parent_id,
                    }
                })?;
                if !parent.is_planet() {
                    return Err(SystemError::ParentNotPlanet {
                        moon: body.name().to_string(),
                        parent: parent.name().to_string(),
                    });
                }
                parent.position()
            }
            None => DVec3::ZERO,
        };
        body.place_on_orbit(parent_position);

        let id = BodyId::new(self.bodies.len());
        debug!("Added {} '{}' as {:?}", body.kind().label(), body.name(), id);
        self.bodies.push(body);
        Ok(id)
    }

    /// Advance every body by `time_step` days.
    ///
    /// The time step is validated before anything moves, so an error leaves
    /// the whole system untouched. A zero step is a valid no-op tick.
    pub fn simulate_movement(&mut self, time_step: f64) -> Result<(), SystemError> {
        if !time_step.is_finite() || time_step < 0.0 {
            return Err(SystemError::InvalidTimeStep(time_step));
        }

        for body in self.bodies.iter_mut().filter(|b| b.parent().is_none()) {
            body.update_position(time_step, DVec3::ZERO);
        }

        for i in 0..self.bodies.len() {
            let Some(parent) = self.bodies[i].parent() else {
                continue;
            };
            let parent_position = self.bodies[parent.index()].position();
            self.bodies[i].update_position(time_step, parent_position);
        }

        self.steps += 1;
        Ok(())
    }

    /// Advance one tick and capture the resulting state.
    pub fn step(&mut self, time_step: f64) -> Result<SystemSnapshot, SystemError> {
        self.simulate_movement(time_step)?;
        Ok(self.snapshot())
    }

    /// Put every planet and moon back at angle 0.
    ///
    /// Planets are placed first so moons are positioned against their
    /// parent's reset position. Stars and free bodies keep their state.
    pub fn reset(&mut self) {
        for body in self.bodies.iter_mut().filter(|b| b.parent().is_none()) {
            if body.orbit().is_some() {
                body.set_angle(0.0);
                body.place_on_orbit(DVec3::ZERO);
            }
        }

        for i in 0..self.bodies.len() {
            let Some(parent) = self.bodies[i].parent() else {
                continue;
            };
            let parent_position = self.bodies[parent.index()].position();
            let moon = &mut self.bodies[i];
            moon.set_angle(0.0);
            moon.place_on_orbit(parent_position);
        }

        self.steps = 0;
        debug!("Reset {} bodies to angle 0", self.bodies.len());
    }

    /// The live ordered collection.
    pub fn celestial_bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    /// Mutable access for the angle/position setters.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(id.index())
    }

    /// First body with the given name.
    pub fn find(&self, name: &str) -> Option<(BodyId, &CelestialBody)> {
        self.bodies
            .iter()
            .enumerate()
            .find(|(_, b)| b.name() == name)
            .map(|(i, b)| (BodyId::new(i), b))
    }

    /// Ids of the moons orbiting `planet`, in insertion order.
    pub fn moons_of(&self, planet: BodyId) -> Vec<BodyId> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.parent() == Some(planet))
            .map(|(i, _)| BodyId::new(i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Steps applied since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Immutable copy of the current state.
    pub fn snapshot(&self) -> SystemSnapshot {
        let bodies = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, body)| BodySnapshot::capture(BodyId::new(i), body))
            .collect();
        SystemSnapshot::new(self.steps, bodies)
    }
}

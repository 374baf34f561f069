//! Moon payload: a circular orbit around a parent planet.

use super::orbit::CircularOrbit;
use super::{Appearance, BodyId};

/// A body orbiting the current position of a parent planet.
///
/// The parent is a slot in the owning [`crate::system::SolarSystem`], not a
/// reference, so the system stays the sole owner of every body.
#[derive(Clone, Debug, PartialEq)]
pub struct Moon {
    orbit: CircularOrbit,
    appearance: Appearance,
    parent: BodyId,
}

impl Moon {
    pub fn new(orbit: CircularOrbit, appearance: Appearance, parent: BodyId) -> Self {
        Self {
            orbit,
            appearance,
            parent,
        }
    }

    pub fn orbit(&self) -> &CircularOrbit {
        &self.orbit
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// The planet this moon orbits.
    pub fn parent(&self) -> BodyId {
        self.parent
    }

    pub(crate) fn set_appearance(&mut self, appearance: Appearance) {
        self.appearance = appearance;
    }
}

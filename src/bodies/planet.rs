//! Planet payload: a circular orbit around the coordinate origin.

use super::Appearance;
use super::orbit::CircularOrbit;

/// A body on a circular orbit centered on the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    orbit: CircularOrbit,
    appearance: Appearance,
}

impl Planet {
    pub fn new(orbit: CircularOrbit, appearance: Appearance) -> Self {
        Self { orbit, appearance }
    }

    pub fn orbit(&self) -> &CircularOrbit {
        &self.orbit
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub(crate) fn set_appearance(&mut self, appearance: Appearance) {
        self.appearance = appearance;
    }
}

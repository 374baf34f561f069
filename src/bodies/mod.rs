//! Celestial body data model and per-body position updates.
//!
//! Every body shares the same core state (name, mass, radius, position,
//! velocity, orbital angle). What distinguishes a star, planet or moon is the
//! [`BodyKind`] payload, and each kind decides how
//! [`CelestialBody::update_position`] moves it:
//! - stars stay where they were built,
//! - planets follow a circle around the origin,
//! - moons follow a circle around their parent planet's current position,
//! - free bodies integrate their velocity.

pub mod moon;
pub mod orbit;
pub mod planet;
pub mod star;

#[cfg(test)]
mod proptest_orbit;

pub use moon::Moon;
pub use orbit::{CircularOrbit, normalize_angle};
pub use planet::Planet;
pub use star::Star;

use bevy::math::DVec3;
use bevy::prelude::*;

/// Construction-time validation failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    #[error("invalid mass {0} kg (must be finite and non-negative)")]
    InvalidMass(f64),

    #[error("invalid radius {0} km (must be finite and non-negative)")]
    InvalidRadius(f64),

    #[error("invalid orbital radius {0} km (must be finite and non-negative)")]
    InvalidOrbitalRadius(f64),

    #[error("invalid orbital period {0} days (must be finite and positive)")]
    InvalidOrbitalPeriod(f64),

    #[error("invalid luminosity {0} W (must be finite and non-negative)")]
    InvalidLuminosity(f64),

    #[error("invalid temperature {0} K (must be finite and non-negative)")]
    InvalidTemperature(f64),

    #[error("{0} vector has non-finite components")]
    NonFiniteVector(&'static str),
}

/// Slot of a body inside its [`crate::system::SolarSystem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Insertion index of the body.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Visualization-only properties. The simulation never reads these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub color: Color,
    /// Display size in scene units
    pub size: f64,
}

impl Appearance {
    pub fn new(color: Color, size: f64) -> Self {
        Self { color, size }
    }

    /// White, sized from the physical radius (km / 1000).
    pub fn from_radius(radius: f64) -> Self {
        Self {
            color: Color::WHITE,
            size: radius / 1000.0,
        }
    }
}

/// Variant payload of a body.
#[derive(Clone, Debug, PartialEq)]
pub enum BodyKind {
    Star(Star),
    Planet(Planet),
    Moon(Moon),
    /// No orbit; moves by integrating its velocity.
    Free,
}

impl BodyKind {
    /// Short lowercase label, used in logs and snapshots.
    pub fn label(&self) -> &'static str {
        match self {
            BodyKind::Star(_) => "star",
            BodyKind::Planet(_) => "planet",
            BodyKind::Moon(_) => "moon",
            BodyKind::Free => "free",
        }
    }
}

/// A body in the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    name: String,
    /// Mass in kg
    mass: f64,
    /// Physical radius in km
    radius: f64,
    position: DVec3,
    velocity: DVec3,
    /// Orbital phase in radians, kept in [0, 2π)
    angle: f64,
    kind: BodyKind,
}

impl CelestialBody {
    fn with_kind(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        kind: BodyKind,
    ) -> Result<Self, BodyError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(BodyError::InvalidMass(mass));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(BodyError::InvalidRadius(radius));
        }
        Ok(Self {
            name: name.into(),
            mass,
            radius,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            angle: 0.0,
            kind,
        })
    }

    /// A stationary star at the origin.
    pub fn star(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        luminosity: f64,
        temperature: f64,
    ) -> Result<Self, BodyError> {
        let star = Star::new(luminosity, temperature)?;
        Self::with_kind(name, mass, radius, BodyKind::Star(star))
    }

    /// A planet at angle 0 of its orbit around the origin.
    pub fn planet(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        orbital_radius: f64,
        orbital_period: f64,
    ) -> Result<Self, BodyError> {
        let orbit = CircularOrbit::new(orbital_radius, orbital_period)?;
        let planet = Planet::new(orbit, Appearance::from_radius(radius));
        let mut body = Self::with_kind(name, mass, radius, BodyKind::Planet(planet))?;
        body.position = orbit.offset(0.0);
        Ok(body)
    }

    /// A moon of `parent`.
    ///
    /// Its position is only meaningful once the owning system has placed it
    /// relative to the parent (done on insertion).
    pub fn moon(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        orbital_radius: f64,
        orbital_period: f64,
        parent: BodyId,
    ) -> Result<Self, BodyError> {
        let orbit = CircularOrbit::new(orbital_radius, orbital_period)?;
        let moon = Moon::new(orbit, Appearance::from_radius(radius), parent);
        Self::with_kind(name, mass, radius, BodyKind::Moon(moon))
    }

    /// A body without an orbit that drifts along `velocity` (km/day).
    pub fn free(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: DVec3,
        velocity: DVec3,
    ) -> Result<Self, BodyError> {
        if !position.is_finite() {
            return Err(BodyError::NonFiniteVector("position"));
        }
        if !velocity.is_finite() {
            return Err(BodyError::NonFiniteVector("velocity"));
        }
        let mut body = Self::with_kind(name, mass, radius, BodyKind::Free)?;
        body.position = position;
        body.velocity = velocity;
        Ok(body)
    }

    /// Replace the display color and size. Only planets and moons carry an
    /// appearance; other kinds are returned unchanged.
    pub fn with_appearance(mut self, color: Color, size: f64) -> Self {
        let appearance = Appearance::new(color, size);
        match &mut self.kind {
            BodyKind::Planet(planet) => planet.set_appearance(appearance),
            BodyKind::Moon(moon) => moon.set_appearance(appearance),
            BodyKind::Star(_) | BodyKind::Free => {}
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mass in kg.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Physical radius in km.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    /// Current orbital angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    /// The circular orbit of a planet or moon.
    pub fn orbit(&self) -> Option<&CircularOrbit> {
        match &self.kind {
            BodyKind::Planet(planet) => Some(planet.orbit()),
            BodyKind::Moon(moon) => Some(moon.orbit()),
            BodyKind::Star(_) | BodyKind::Free => None,
        }
    }

    /// The parent planet of a moon.
    pub fn parent(&self) -> Option<BodyId> {
        match &self.kind {
            BodyKind::Moon(moon) => Some(moon.parent()),
            _ => None,
        }
    }

    pub fn appearance(&self) -> Option<&Appearance> {
        match &self.kind {
            BodyKind::Planet(planet) => Some(planet.appearance()),
            BodyKind::Moon(moon) => Some(moon.appearance()),
            BodyKind::Star(_) | BodyKind::Free => None,
        }
    }

    pub fn as_star(&self) -> Option<&Star> {
        match &self.kind {
            BodyKind::Star(star) => Some(star),
            _ => None,
        }
    }

    pub fn is_planet(&self) -> bool {
        matches!(self.kind, BodyKind::Planet(_))
    }

    /// Set the orbital angle. The value is normalized into [0, 2π).
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_angle(angle);
    }

    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    /// Default motion rule: `position += velocity * time_step`.
    pub fn integrate_velocity(&mut self, time_step: f64) {
        self.position += self.velocity * time_step;
    }

    /// Advance this body by `time_step` days.
    ///
    /// `parent_position` is the already-updated position of the body's parent
    /// for this tick; bodies without a parent ignore it.
    pub fn update_position(&mut self, time_step: f64, parent_position: DVec3) {
        let (orbit, center) = match &self.kind {
            BodyKind::Star(_) => return,
            BodyKind::Free => {
                self.integrate_velocity(time_step);
                return;
            }
            BodyKind::Planet(planet) => (*planet.orbit(), DVec3::ZERO),
            BodyKind::Moon(moon) => (*moon.orbit(), parent_position),
        };

        self.angle = orbit.advance(self.angle, time_step);
        self.position = center + orbit.offset(self.angle);

        trace!(
            "Updated {}: angle={:.6} x={:.3} z={:.3}",
            self.name, self.angle, self.position.x, self.position.z
        );
    }

    /// Recompute the position of a planet or moon from its current angle,
    /// without advancing it. Other kinds are left untouched.
    pub fn place_on_orbit(&mut self, parent_position: DVec3) {
        let (orbit, center) = match &self.kind {
            BodyKind::Planet(planet) => (*planet.orbit(), DVec3::ZERO),
            BodyKind::Moon(moon) => (*moon.orbit(), parent_position),
            BodyKind::Star(_) | BodyKind::Free => return,
        };
        self.position = center + orbit.offset(self.angle);
    }
}

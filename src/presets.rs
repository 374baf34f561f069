//! Built-in reference system: the Sun, the eight planets and Earth's Moon.
//!
//! Orbital radii are visual scene units, not km. Each real semi-major axis is
//! shrunk by [`SCALE_FACTOR`] and then stretched per planet so the inner
//! planets stay distinguishable next to the gas giants.

use bevy::prelude::*;

use crate::bodies::{BodyError, CelestialBody};
use crate::system::{SolarSystem, SystemError};

/// Conversion from km to scene units before the per-planet stretch.
pub const SCALE_FACTOR: f64 = 1.0 / 5.0e6;

/// Static description of one preset planet.
pub struct PlanetPreset {
    pub name: &'static str,
    /// Mass in kg
    pub mass: f64,
    /// Physical radius in km
    pub radius: f64,
    /// Semi-major axis in km
    pub semi_major_axis_km: f64,
    /// Visual stretch applied after scaling
    pub stretch: f64,
    /// Orbital period in days
    pub period: f64,
    pub color: [u8; 3],
    pub size: f64,
}

impl PlanetPreset {
    pub fn orbital_radius(&self) -> f64 {
        self.semi_major_axis_km * SCALE_FACTOR * self.stretch
    }
}

pub static PLANETS: &[PlanetPreset] = &[
    PlanetPreset {
        name: "Mercury",
        mass: 3.3011e23,
        radius: 2439.7,
        semi_major_axis_km: 57.9e6,
        stretch: 8.0,
        period: 88.0,
        color: [169, 169, 169],
        size: 2.0,
    },
    PlanetPreset {
        name: "Venus",
        mass: 4.8675e24,
        radius: 6051.8,
        semi_major_axis_km: 108.2e6,
        stretch: 7.0,
        period: 224.7,
        color: [255, 198, 73],
        size: 3.5,
    },
    PlanetPreset {
        name: "Earth",
        mass: 5.97237e24,
        radius: 6371.0,
        semi_major_axis_km: 149.6e6,
        stretch: 6.0,
        period: 365.25,
        color: [0, 0, 255],
        size: 4.0,
    },
    PlanetPreset {
        name: "Mars",
        mass: 6.4171e23,
        radius: 3389.5,
        semi_major_axis_km: 227.9e6,
        stretch: 5.0,
        period: 687.0,
        color: [255, 0, 0],
        size: 3.0,
    },
    PlanetPreset {
        name: "Jupiter",
        mass: 1.8982e27,
        radius: 69911.0,
        semi_major_axis_km: 778.5e6,
        stretch: 2.0,
        period: 4332.59,
        color: [255, 165, 0],
        size: 8.5,
    },
    PlanetPreset {
        name: "Saturn",
        mass: 5.6834e26,
        radius: 58232.0,
        semi_major_axis_km: 1434.0e6,
        stretch: 2.0,
        period: 10759.22,
        color: [210, 180, 140],
        size: 7.0,
    },
    PlanetPreset {
        name: "Uranus",
        mass: 8.6810e25,
        radius: 25362.0,
        semi_major_axis_km: 2871.0e6,
        stretch: 2.0,
        period: 30688.5,
        color: [173, 216, 230],
        size: 5.5,
    },
    PlanetPreset {
        name: "Neptune",
        mass: 1.02413e26,
        radius: 24622.0,
        semi_major_axis_km: 4495.0e6,
        stretch: 2.0,
        period: 60182.0,
        color: [0, 0, 139],
        size: 5.5,
    },
];

/// Earth's Moon, at a visual distance that clears Earth's display size.
const MOON_ORBIT_RADIUS: f64 = 12.0;
const MOON_PERIOD: f64 = 27.32;

fn srgb(rgb: [u8; 3]) -> Color {
    Color::srgb_u8(rgb[0], rgb[1], rgb[2])
}

#[derive(thiserror::Error, Debug)]
pub enum PresetError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    System(#[from] SystemError),
}

/// Build the reference system, stopped at angle 0 for every orbit.
pub fn reference_system() -> Result<SolarSystem, PresetError> {
    let mut system = SolarSystem::new();
    system.add_celestial_body(CelestialBody::star(
        "Sun", 1.989e30, 695_700.0, 3.828e26, 5778.0,
    )?)?;

    for preset in PLANETS {
        let planet = CelestialBody::planet(
            preset.name,
            preset.mass,
            preset.radius,
            preset.orbital_radius(),
            preset.period,
        )?
        .with_appearance(srgb(preset.color), preset.size);
        let id = system.add_celestial_body(planet)?;

        if preset.name == "Earth" {
            let moon = CelestialBody::moon(
                "Moon",
                7.342e22,
                1737.4,
                MOON_ORBIT_RADIUS,
                MOON_PERIOD,
                id,
            )?
            .with_appearance(srgb([200, 200, 200]), 1.0);
            system.add_celestial_body(moon)?;
        }
    }

    debug!("Reference system built with {} bodies", system.len());
    Ok(system)
}

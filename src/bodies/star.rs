//! Stationary star payload.

use super::BodyError;

/// Radiative properties of a star. Stars never move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Luminosity in watts
    luminosity: f64,
    /// Surface temperature in kelvin
    temperature: f64,
}

impl Star {
    pub fn new(luminosity: f64, temperature: f64) -> Result<Self, BodyError> {
        if !luminosity.is_finite() || luminosity < 0.0 {
            return Err(BodyError::InvalidLuminosity(luminosity));
        }
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(BodyError::InvalidTemperature(temperature));
        }
        Ok(Self {
            luminosity,
            temperature,
        })
    }

    /// Luminosity in watts.
    pub fn luminosity(&self) -> f64 {
        self.luminosity
    }

    /// Surface temperature in kelvin.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

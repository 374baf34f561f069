//! Circular orbit math shared by planets and moons.
//!
//! Positions are always a pure function of the orbital angle. Nothing here
//! integrates velocity, so long runs do not drift off the circle.

use bevy::math::DVec3;

use super::BodyError;
use crate::types::TAU;

/// Wrap an angle in radians into `[0, 2π)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `2π`; that case
/// is folded back to zero so the upper bound stays exclusive.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Offset from the orbit center for a given angle, in the x–z plane.
pub fn circular_offset(radius: f64, angle: f64) -> DVec3 {
    DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// A fixed-radius circular orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularOrbit {
    /// Distance from the orbit center in km
    radius: f64,
    /// Simulated days per revolution
    period: f64,
}

impl CircularOrbit {
    /// Build an orbit, rejecting non-positive periods and negative radii.
    pub fn new(radius: f64, period: f64) -> Result<Self, BodyError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(BodyError::InvalidOrbitalRadius(radius));
        }
        // Subnormal periods would overflow the angular velocity.
        if !period.is_finite() || period <= 0.0 || !(TAU / period).is_finite() {
            return Err(BodyError::InvalidOrbitalPeriod(period));
        }
        Ok(Self { radius, period })
    }

    /// Orbital radius in km.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Orbital period in days.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Angular velocity in radians per day.
    pub fn angular_velocity(&self) -> f64 {
        TAU / self.period
    }

    /// Angle reached after `time_step` days, normalized.
    ///
    /// Whole revolutions are dropped from the step first, so any finite step
    /// yields a finite angle.
    pub fn advance(&self, angle: f64, time_step: f64) -> f64 {
        let fraction = (time_step % self.period) / self.period;
        normalize_angle(angle + TAU * fraction)
    }

    /// Position relative to the orbit center at `angle`.
    pub fn offset(&self, angle: f64) -> DVec3 {
        circular_offset(self.radius, angle)
    }
}

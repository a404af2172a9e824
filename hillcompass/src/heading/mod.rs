//! Compass heading derivation.
//!
//! Two independent strategies produce a [`Heading`] in `[0, 360)`:
//!
//! - **Fused**: the platform already fused its sensors into a compass
//!   heading; the value is only wrapped into range.
//! - **Magnetometer**: a raw 3-axis magnetic field reading is turned into a
//!   heading with a quadrant-corrected `atan2(y, x)`.
//!
//! The magnetometer heading is in the device's raw sensor frame and is not
//! tilt-compensated. It is only a good approximation while the device is
//! held roughly level; [`TiltMonitor`] flags readings taken outside that
//! envelope but does not correct them.
//!
//! Until the first usable sample arrives the heading is
//! [`HeadingState::Unavailable`]. It never defaults to north, so overlays
//! are not drawn at a false heading.

mod magnetometer;
mod tilt;
mod tracker;

pub use magnetometer::heading_from_magnetometer;
pub use tilt::{TiltMonitor, DEFAULT_MAX_TILT_DEGREES};
pub use tracker::{HeadingConfig, HeadingState, HeadingTracker};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angle::normalize_degrees;

/// A compass heading in degrees, always within `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heading(f64);

impl Heading {
    /// Build a heading from any finite angle, wrapping it into range.
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        degrees
            .is_finite()
            .then(|| Self(normalize_degrees(degrees)))
    }

    /// Fused-heading strategy: use a platform heading as-is, wrapped.
    #[inline]
    pub fn from_fused(degrees: f64) -> Option<Self> {
        Self::from_degrees(degrees)
    }

    /// Heading value in degrees.
    #[inline]
    pub fn degrees(&self) -> f64 {
        self.0
    }

    /// Rotate the heading by `offset` degrees, wrapping the result.
    pub fn offset_by(self, offset: f64) -> Self {
        Self(normalize_degrees(self.0 + offset))
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Whole degrees, the way the compass readout shows it
        let whole = self.0.round() as u16 % 360;
        write!(f, "{}°", whole)
    }
}

/// A 3-axis sensor reading in arbitrary but consistent units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Create a new reading.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Raw magnetic field reading.
pub type MagneticSample = Vector3;

/// Raw accelerometer reading (in g).
pub type AccelerationSample = Vector3;

/// Which sensor stream drives the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStrategy {
    /// Platform-fused compass heading.
    #[default]
    Fused,
    /// Heading derived from the raw magnetometer.
    Magnetometer,
}

impl HeadingStrategy {
    /// Config/CLI spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingStrategy::Fused => "fused",
            HeadingStrategy::Magnetometer => "magnetometer",
        }
    }
}

impl fmt::Display for HeadingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fused" => Ok(HeadingStrategy::Fused),
            "magnetometer" | "magnetic" => Ok(HeadingStrategy::Magnetometer),
            other => Err(format!(
                "unknown heading strategy '{}' (expected fused or magnetometer)",
                other
            )),
        }
    }
}

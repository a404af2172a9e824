//! Landmark value type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angle::normalize_degrees;

/// A named landmark as seen from the device.
///
/// Distance and bearing are precomputed by the lookup service. Distance is
/// in the service's linear unit; only comparisons between landmarks of one
/// response matter here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Display name.
    pub name: String,
    /// Distance from the device (≥ 0).
    pub distance: f64,
    /// Absolute compass bearing from the device, degrees in `[0, 360)`.
    pub bearing: f64,
    /// Summit height, when the service provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Reason a landmark from the service was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidLandmark {
    /// Distance is negative, NaN or infinite.
    Distance(f64),
    /// Bearing is NaN or infinite.
    Bearing(f64),
}

impl fmt::Display for InvalidLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidLandmark::Distance(d) => write!(f, "invalid distance {}", d),
            InvalidLandmark::Bearing(b) => write!(f, "invalid bearing {}", b),
        }
    }
}

impl std::error::Error for InvalidLandmark {}

impl Landmark {
    /// Create a landmark without height.
    pub fn new(name: impl Into<String>, distance: f64, bearing: f64) -> Self {
        Self {
            name: name.into(),
            distance,
            bearing,
            height: None,
        }
    }

    /// Set the summit height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Check the numeric fields and wrap the bearing into `[0, 360)`.
    pub fn validated(mut self) -> Result<Self, InvalidLandmark> {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(InvalidLandmark::Distance(self.distance));
        }
        if !self.bearing.is_finite() {
            return Err(InvalidLandmark::Bearing(self.bearing));
        }
        self.bearing = normalize_degrees(self.bearing);
        self.height = self.height.filter(|h| h.is_finite());
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_wraps_bearing() {
        let hill = Landmark::new("Skiddaw", 12.0, 365.0).validated().unwrap();
        assert_eq!(hill.bearing, 5.0);
    }

    #[test]
    fn test_validated_rejects_negative_distance() {
        let err = Landmark::new("Nowhere", -1.0, 10.0).validated().unwrap_err();
        assert_eq!(err, InvalidLandmark::Distance(-1.0));
    }

    #[test]
    fn test_validated_rejects_nan_bearing() {
        let err = Landmark::new("Nowhere", 1.0, f64::NAN)
            .validated()
            .unwrap_err();
        assert!(matches!(err, InvalidLandmark::Bearing(_)));
    }

    #[test]
    fn test_validated_drops_non_finite_height() {
        let hill = Landmark::new("Helvellyn", 3.0, 20.0)
            .with_height(f64::NAN)
            .validated()
            .unwrap();
        assert!(hill.height.is_none());
    }

    #[test]
    fn test_deserialize_service_shape() {
        let json = r#"{"name":"Blencathra","distance":4.2,"bearing":41.7,"height":868.0}"#;
        let hill: Landmark = serde_json::from_str(json).unwrap();
        assert_eq!(hill.name, "Blencathra");
        assert_eq!(hill.height, Some(868.0));
    }

    #[test]
    fn test_deserialize_without_height() {
        let json = r#"{"name":"Latrigg","distance":1.0,"bearing":2.0}"#;
        let hill: Landmark = serde_json::from_str(json).unwrap();
        assert!(hill.height.is_none());
    }
}

//! Geographic positions and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CompassError, CompassResult};

/// Mean earth radius in meters (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> CompassResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(CompassError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to another point in meters (haversine).
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_METERS * c
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(54.6, -3.1).is_ok());
    }

    #[test]
    fn test_zero_distance_to_self() {
        let p = GeoPoint::new(54.6, -3.1).unwrap();
        assert_eq!(p.distance_meters(&p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(1.0, 0.0).unwrap();
        // ~111.2 km
        let d = a.distance_meters(&b);
        assert!((d - 111_195.0).abs() < 50.0, "got {}", d);
    }

    #[test]
    fn test_short_hop_is_metre_scale() {
        let a = GeoPoint::new(54.60000, -3.10000).unwrap();
        let b = GeoPoint::new(54.60001, -3.10000).unwrap();
        let d = a.distance_meters(&b);
        assert!(d > 1.0 && d < 1.2, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(54.6, -3.1).unwrap();
        let b = GeoPoint::new(51.5, -0.1).unwrap();
        assert!((a.distance_meters(&b) - b.distance_meters(&a)).abs() < 1e-6);
    }
}

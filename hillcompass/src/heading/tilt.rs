//! Device tilt detection from the accelerometer.
//!
//! The magnetometer heading assumes the device is roughly level. This
//! monitor measures how far the device is tipped from horizontal so that
//! headings taken outside that envelope can be flagged as approximate.

use super::AccelerationSample;

/// Default tilt beyond which a magnetometer heading is flagged approximate.
pub const DEFAULT_MAX_TILT_DEGREES: f64 = 25.0;

/// Minimum acceleration magnitude (in g) for a usable gravity reading.
const MIN_GRAVITY_MAGNITUDE: f64 = 1e-6;

/// Tracks the latest device tilt.
#[derive(Debug, Clone)]
pub struct TiltMonitor {
    max_tilt_degrees: f64,
    tilt_degrees: Option<f64>,
}

impl Default for TiltMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TILT_DEGREES)
    }
}

impl TiltMonitor {
    /// Create a monitor with the given tilt limit in degrees.
    pub fn new(max_tilt_degrees: f64) -> Self {
        Self {
            max_tilt_degrees,
            tilt_degrees: None,
        }
    }

    /// Record an accelerometer sample.
    ///
    /// Tilt is the angle between the measured gravity vector and the
    /// device's z axis: `acos(|z| / |a|)`. Returns the new tilt, or `None`
    /// if the sample was unusable (free fall or non-finite).
    pub fn record(&mut self, sample: &AccelerationSample) -> Option<f64> {
        if !sample.is_finite() {
            return None;
        }
        let magnitude = sample.magnitude();
        if magnitude < MIN_GRAVITY_MAGNITUDE {
            return None;
        }

        let cos_tilt = (sample.z.abs() / magnitude).clamp(0.0, 1.0);
        let tilt = cos_tilt.acos().to_degrees();
        self.tilt_degrees = Some(tilt);
        Some(tilt)
    }

    /// Latest tilt in degrees, if any sample has been seen.
    pub fn tilt_degrees(&self) -> Option<f64> {
        self.tilt_degrees
    }

    /// True when the latest sample exceeds the tilt limit.
    ///
    /// With no accelerometer data the device is assumed level.
    pub fn exceeds_limit(&self) -> bool {
        self.tilt_degrees
            .map(|tilt| tilt > self.max_tilt_degrees)
            .unwrap_or(false)
    }

    /// Forget the last reading.
    pub fn clear(&mut self) {
        self.tilt_degrees = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::Vector3;

    #[test]
    fn test_flat_device_has_no_tilt() {
        let mut monitor = TiltMonitor::default();
        let tilt = monitor.record(&Vector3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(tilt.abs() < 1e-9);
        assert!(!monitor.exceeds_limit());
    }

    #[test]
    fn test_upright_device_is_fully_tilted() {
        let mut monitor = TiltMonitor::default();
        let tilt = monitor.record(&Vector3::new(0.0, -1.0, 0.0)).unwrap();
        assert!((tilt - 90.0).abs() < 1e-9);
        assert!(monitor.exceeds_limit());
    }

    #[test]
    fn test_limit_boundary() {
        let mut monitor = TiltMonitor::new(45.0);
        let angle = 40.0_f64.to_radians();
        monitor.record(&Vector3::new(angle.sin(), 0.0, angle.cos()));
        assert!(!monitor.exceeds_limit());

        let angle = 50.0_f64.to_radians();
        monitor.record(&Vector3::new(angle.sin(), 0.0, angle.cos()));
        assert!(monitor.exceeds_limit());
    }

    #[test]
    fn test_free_fall_ignored() {
        let mut monitor = TiltMonitor::default();
        assert!(monitor.record(&Vector3::default()).is_none());
        assert!(monitor.tilt_degrees().is_none());
        assert!(!monitor.exceeds_limit());
    }

    #[test]
    fn test_clear() {
        let mut monitor = TiltMonitor::default();
        monitor.record(&Vector3::new(1.0, 0.0, 0.0));
        assert!(monitor.exceeds_limit());
        monitor.clear();
        assert!(!monitor.exceeds_limit());
    }
}

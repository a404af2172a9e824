//! Current-heading state holder.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    heading_from_magnetometer, AccelerationSample, Heading, HeadingStrategy, MagneticSample,
    TiltMonitor, DEFAULT_MAX_TILT_DEGREES,
};
use crate::error::{CompassError, CompassResult};

/// Configuration for heading derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingConfig {
    /// Which sensor stream drives the heading.
    pub strategy: HeadingStrategy,

    /// Degrees added to the raw magnetometer heading.
    ///
    /// Accounts for how the sensor axes sit relative to the camera.
    /// Default: 0.
    pub mount_offset_degrees: f64,

    /// Tilt beyond which magnetometer headings are flagged approximate.
    /// Default: 25°.
    pub max_tilt_degrees: f64,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            strategy: HeadingStrategy::default(),
            mount_offset_degrees: 0.0,
            max_tilt_degrees: DEFAULT_MAX_TILT_DEGREES,
        }
    }
}

impl HeadingConfig {
    /// Create a configuration for the given strategy.
    pub fn new(strategy: HeadingStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Set the magnetometer mounting offset.
    pub fn with_mount_offset(mut self, degrees: f64) -> Self {
        self.mount_offset_degrees = degrees;
        self
    }

    /// Set the tilt limit.
    pub fn with_max_tilt(mut self, degrees: f64) -> Self {
        self.max_tilt_degrees = degrees;
        self
    }
}

/// Observable heading state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HeadingState {
    /// No usable sample yet. Overlay projection must not run.
    Unavailable,
    /// A heading is known.
    Available {
        heading: Heading,
        /// True when the reading was taken outside the level envelope.
        approximate: bool,
    },
}

impl HeadingState {
    /// The heading, if available.
    pub fn heading(&self) -> Option<Heading> {
        match self {
            HeadingState::Available { heading, .. } => Some(*heading),
            HeadingState::Unavailable => None,
        }
    }
}

/// Holds the latest heading for the configured strategy.
///
/// Each accepted sample supersedes the previous one; no history is kept.
/// Samples for the other strategy are ignored.
#[derive(Debug, Clone)]
pub struct HeadingTracker {
    config: HeadingConfig,
    tilt: TiltMonitor,
    current: Option<Heading>,
}

impl HeadingTracker {
    /// Create a tracker with no heading.
    pub fn new(config: HeadingConfig) -> Self {
        let tilt = TiltMonitor::new(config.max_tilt_degrees);
        Self {
            config,
            tilt,
            current: None,
        }
    }

    /// Active strategy.
    pub fn strategy(&self) -> HeadingStrategy {
        self.config.strategy
    }

    /// Record a platform-fused heading sample.
    ///
    /// Returns true if the sample replaced the current heading.
    pub fn record_fused(&mut self, degrees: f64) -> bool {
        if self.config.strategy != HeadingStrategy::Fused {
            trace!(degrees, "Ignoring fused heading (magnetometer strategy active)");
            return false;
        }
        self.replace(Heading::from_fused(degrees))
    }

    /// Record a raw magnetometer sample.
    ///
    /// Returns true if the sample replaced the current heading.
    pub fn record_magnetic(&mut self, sample: &MagneticSample) -> bool {
        if self.config.strategy != HeadingStrategy::Magnetometer {
            trace!("Ignoring magnetometer sample (fused strategy active)");
            return false;
        }
        let heading = heading_from_magnetometer(sample)
            .map(|h| h.offset_by(self.config.mount_offset_degrees));
        self.replace(heading)
    }

    /// Record an accelerometer sample for tilt tracking.
    pub fn record_acceleration(&mut self, sample: &AccelerationSample) {
        self.tilt.record(sample);
    }

    fn replace(&mut self, heading: Option<Heading>) -> bool {
        match heading {
            Some(heading) => {
                self.current = Some(heading);
                true
            }
            None => false,
        }
    }

    /// Current heading state.
    pub fn state(&self) -> HeadingState {
        match self.current {
            Some(heading) => HeadingState::Available {
                heading,
                approximate: self.config.strategy == HeadingStrategy::Magnetometer
                    && self.tilt.exceeds_limit(),
            },
            None => HeadingState::Unavailable,
        }
    }

    /// Current heading, or [`CompassError::HeadingUnavailable`].
    pub fn heading(&self) -> CompassResult<Heading> {
        self.current.ok_or(CompassError::HeadingUnavailable)
    }

    /// Drop the current heading and tilt, returning to the unavailable state.
    pub fn reset(&mut self) {
        self.current = None;
        self.tilt.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::Vector3;

    #[test]
    fn test_unavailable_until_first_sample() {
        let tracker = HeadingTracker::new(HeadingConfig::default());
        assert_eq!(tracker.state(), HeadingState::Unavailable);
        assert!(matches!(
            tracker.heading(),
            Err(CompassError::HeadingUnavailable)
        ));
    }

    #[test]
    fn test_fused_sample_sets_heading() {
        let mut tracker = HeadingTracker::new(HeadingConfig::default());
        assert!(tracker.record_fused(90.0));
        assert_eq!(tracker.heading().unwrap().degrees(), 90.0);
    }

    #[test]
    fn test_latest_sample_wins() {
        let mut tracker = HeadingTracker::new(HeadingConfig::default());
        tracker.record_fused(90.0);
        tracker.record_fused(91.5);
        assert_eq!(tracker.heading().unwrap().degrees(), 91.5);
    }

    #[test]
    fn test_invalid_sample_keeps_previous() {
        let mut tracker = HeadingTracker::new(HeadingConfig::default());
        tracker.record_fused(45.0);
        assert!(!tracker.record_fused(f64::NAN));
        assert_eq!(tracker.heading().unwrap().degrees(), 45.0);
    }

    #[test]
    fn test_other_strategy_ignored() {
        let mut tracker = HeadingTracker::new(HeadingConfig::default());
        assert!(!tracker.record_magnetic(&Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(tracker.state(), HeadingState::Unavailable);

        let mut tracker = HeadingTracker::new(HeadingConfig::new(HeadingStrategy::Magnetometer));
        assert!(!tracker.record_fused(10.0));
        assert!(tracker.record_magnetic(&Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(tracker.heading().unwrap().degrees(), 90.0);
    }

    #[test]
    fn test_mount_offset_applied_to_magnetometer() {
        let config = HeadingConfig::new(HeadingStrategy::Magnetometer).with_mount_offset(-90.0);
        let mut tracker = HeadingTracker::new(config);
        tracker.record_magnetic(&Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(tracker.heading().unwrap().degrees(), 270.0);
    }

    #[test]
    fn test_tilt_flags_magnetometer_heading() {
        let config = HeadingConfig::new(HeadingStrategy::Magnetometer).with_max_tilt(30.0);
        let mut tracker = HeadingTracker::new(config);
        tracker.record_magnetic(&Vector3::new(1.0, 1.0, 0.0));
        tracker.record_acceleration(&Vector3::new(0.0, -1.0, 0.0));

        match tracker.state() {
            HeadingState::Available { approximate, .. } => assert!(approximate),
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_tilt_does_not_flag_fused_heading() {
        let mut tracker = HeadingTracker::new(HeadingConfig::default());
        tracker.record_fused(10.0);
        tracker.record_acceleration(&Vector3::new(0.0, -1.0, 0.0));

        match tracker.state() {
            HeadingState::Available { approximate, .. } => assert!(!approximate),
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_returns_to_unavailable() {
        let mut tracker = HeadingTracker::new(HeadingConfig::default());
        tracker.record_fused(10.0);
        tracker.reset();
        assert_eq!(tracker.state(), HeadingState::Unavailable);
    }
}

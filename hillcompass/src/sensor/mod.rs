//! Sensor events and scoped subscriptions.
//!
//! Sensor sources push [`SensorEvent`]s into a channel owned by the session.
//! A subscription is represented by a [`SubscriptionGuard`]: while the guard
//! lives the source forwards events, and dropping it unsubscribes. This makes
//! release happen on every exit path, including errors and task
//! cancellation.

mod channel;
mod guard;

pub use channel::{ChannelSensorSource, SensorFeed};
pub use guard::SubscriptionGuard;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::CompassResult;
use crate::heading::{AccelerationSample, MagneticSample};
use crate::refresh::GeoPoint;

/// A single reading from one of the device sensors.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "fused_heading", "degrees": 91.5}` or
/// `{"type": "magnetic", "x": 20.1, "y": -3.2, "z": -41.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorEvent {
    /// Platform-fused compass heading in degrees.
    FusedHeading { degrees: f64 },
    /// Raw 3-axis magnetic field.
    Magnetic(MagneticSample),
    /// Raw 3-axis acceleration, used for tilt.
    Acceleration(AccelerationSample),
    /// Device location.
    Position(GeoPoint),
}

impl SensorEvent {
    /// Short name of the event kind for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SensorEvent::FusedHeading { .. } => "fused_heading",
            SensorEvent::Magnetic(_) => "magnetic",
            SensorEvent::Acceleration(_) => "acceleration",
            SensorEvent::Position(_) => "position",
        }
    }
}

/// A producer of sensor events.
pub trait SensorSource: Send + Sync {
    /// Name used in logs and subscription errors.
    fn name(&self) -> &str;

    /// Start forwarding events into `events`.
    ///
    /// Events flow until the returned guard is dropped or released.
    fn subscribe(&self, events: mpsc::Sender<SensorEvent>) -> CompassResult<SubscriptionGuard>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::Vector3;

    #[test]
    fn test_event_json_shapes() {
        let event: SensorEvent =
            serde_json::from_str(r#"{"type": "fused_heading", "degrees": 91.5}"#).unwrap();
        assert_eq!(event, SensorEvent::FusedHeading { degrees: 91.5 });

        let event: SensorEvent =
            serde_json::from_str(r#"{"type": "magnetic", "x": 1.0, "y": -1.0, "z": 0.0}"#)
                .unwrap();
        assert_eq!(event, SensorEvent::Magnetic(Vector3::new(1.0, -1.0, 0.0)));

        let event: SensorEvent = serde_json::from_str(
            r#"{"type": "position", "latitude": 54.45, "longitude": -3.21}"#,
        )
        .unwrap();
        assert_eq!(event.kind(), "position");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<SensorEvent, _> = serde_json::from_str(r#"{"type": "gyro"}"#);
        assert!(result.is_err());
    }
}

//! Snapshots published to the render layer.

use serde::Serialize;

use crate::heading::Heading;
use crate::overlay::OverlayTransform;

/// What the compass view should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CompassStatus {
    /// Pipeline running, no heading yet.
    Waiting,
    /// Pipeline running with a known heading.
    Active { heading: Heading },
    /// Pipeline halted; `reason` is shown instead of the overlay.
    Unavailable { reason: String },
}

impl CompassStatus {
    /// Text for the status line.
    pub fn headline(&self) -> String {
        match self {
            CompassStatus::Waiting => "Waiting for heading..".to_string(),
            CompassStatus::Active { heading } => heading.to_string(),
            CompassStatus::Unavailable { reason } => reason.clone(),
        }
    }
}

/// Latest derived state of a session.
///
/// Each frame replaces the previous one as a whole; consumers never observe
/// a partially updated frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayFrame {
    /// Increases by one for each published frame.
    pub sequence: u64,
    pub status: CompassStatus,
    pub heading: Option<Heading>,
    /// Heading was read outside the level envelope.
    pub approximate: bool,
    /// Markers in bearing-key order. Empty unless the status is active.
    pub transforms: Vec<OverlayTransform>,
    /// Rotation for the dial artwork, present with a heading.
    pub dial_rotation: Option<f64>,
    /// Bumped each time a new landmark list is applied.
    pub landmarks_revision: u64,
    /// Message from the most recent failed lookup, cleared on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl OverlayFrame {
    /// Frame shown before the session has processed anything.
    pub fn waiting() -> Self {
        Self {
            sequence: 0,
            status: CompassStatus::Waiting,
            heading: None,
            approximate: false,
            transforms: Vec::new(),
            dial_rotation: None,
            landmarks_revision: 0,
            last_error: None,
        }
    }

    pub fn headline(&self) -> String {
        self.status.headline()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, CompassStatus::Active { .. })
    }
}

impl Default for OverlayFrame {
    fn default() -> Self {
        Self::waiting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines() {
        assert_eq!(CompassStatus::Waiting.headline(), "Waiting for heading..");

        let heading = Heading::from_degrees(123.4).unwrap();
        assert_eq!(CompassStatus::Active { heading }.headline(), "123°");

        let status = CompassStatus::Unavailable {
            reason: "Permission to access location was denied".to_string(),
        };
        assert_eq!(status.headline(), "Permission to access location was denied");
    }

    #[test]
    fn test_waiting_frame_is_inactive() {
        let frame = OverlayFrame::waiting();
        assert!(!frame.is_active());
        assert!(frame.transforms.is_empty());
    }

    #[test]
    fn test_frame_json_omits_missing_error() {
        let json = serde_json::to_value(OverlayFrame::waiting()).unwrap();
        assert_eq!(json["status"]["state"], "waiting");
        assert!(json.get("last_error").is_none());
    }
}

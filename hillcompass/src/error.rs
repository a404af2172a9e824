//! Error types for the compass pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::permission::PermissionKind;
use crate::provider::LookupError;

/// Result type for compass operations.
pub type CompassResult<T> = Result<T, CompassError>;

/// Errors surfaced by the compass pipeline.
///
/// None of these terminate the process. The session turns each into
/// user-visible status: permission problems halt the pipeline, a missing
/// heading shows the waiting state, and failed lookups keep the previous
/// landmark set.
#[derive(Debug, Error)]
pub enum CompassError {
    /// A required permission (camera, location, sensors) is not granted.
    #[error("{}", .0.message())]
    PermissionDenied(PermissionKind),

    /// No heading sample has been received yet.
    #[error("Waiting for heading..")]
    HeadingUnavailable,

    /// The external landmark lookup failed.
    #[error("Failed to fetch nearby hills: {0}")]
    LandmarkQueryFailed(#[from] LookupError),

    /// A position sample was outside the valid latitude/longitude range.
    #[error("Invalid coordinate: lat {latitude}, lon {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A sensor stream could not be subscribed.
    #[error("Failed to subscribe to {sensor}: {reason}")]
    SubscriptionFailed { sensor: String, reason: String },

    /// Configuration could not be loaded or was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The session loop has exited and no longer accepts control messages.
    #[error("Compass session has stopped")]
    SessionClosed,
}

impl CompassError {
    /// Whether this error stops the heading/bucketing/projection pipeline.
    pub fn halts_pipeline(&self) -> bool {
        matches!(
            self,
            CompassError::PermissionDenied(_) | CompassError::SubscriptionFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_display_uses_reason() {
        let err = CompassError::PermissionDenied(PermissionKind::Camera);
        assert_eq!(err.to_string(), "Permission to access camera was denied");
    }

    #[test]
    fn test_lookup_error_converts() {
        let err: CompassError = LookupError::Http("connection refused".to_string()).into();
        assert!(matches!(err, CompassError::LandmarkQueryFailed(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_halts_pipeline() {
        assert!(CompassError::PermissionDenied(PermissionKind::Location).halts_pipeline());
        assert!(!CompassError::HeadingUnavailable.halts_pipeline());
        assert!(!CompassError::LandmarkQueryFailed(LookupError::Http("x".into())).halts_pipeline());
    }
}

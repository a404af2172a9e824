//! Provider trait, configuration and errors.

use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::landmark::Landmark;
use crate::refresh::GeoPoint;

/// Default landmark service endpoint.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default search radius passed to the service (service distance unit).
pub const DEFAULT_SEARCH_RADIUS: f64 = 25.0;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors from a landmark lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body was not a landmark list.
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Source of nearby landmarks for a position.
///
/// Implementations must be cheap to share: the session calls `lookup` from
/// spawned tasks while sensor processing continues.
pub trait LandmarkProvider: Send + Sync {
    /// Human-readable provider name for logs.
    fn name(&self) -> &str;

    /// Fetch landmarks around `position`.
    fn lookup(&self, position: GeoPoint) -> BoxFuture<'_, Result<Vec<Landmark>, LookupError>>;
}

/// Landmark service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Base URL; `/nearest` is appended.
    pub base_url: String,
    /// Search radius sent as `furthest`.
    pub radius: f64,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            radius: DEFAULT_SEARCH_RADIUS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LookupConfig {
    /// Create a configuration for the given service URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the search radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Query URL for a position.
    pub fn nearest_url(&self, position: &GeoPoint) -> String {
        format!(
            "{}/nearest?latitude={}&longitude={}&furthest={}",
            self.base_url.trim_end_matches('/'),
            position.latitude,
            position.longitude,
            self.radius
        )
    }
}

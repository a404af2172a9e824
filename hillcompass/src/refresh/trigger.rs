//! Distance-gated query trigger.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use super::GeoPoint;

/// Default movement required between landmark queries, in meters.
pub const DEFAULT_MIN_DISTANCE_METERS: f64 = 1.0;

/// Configuration for the refresh trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshConfig {
    /// Minimum distance moved since the last query before issuing another.
    pub min_distance_meters: f64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            min_distance_meters: DEFAULT_MIN_DISTANCE_METERS,
        }
    }
}

impl RefreshConfig {
    /// Set the movement threshold.
    pub fn with_min_distance(mut self, meters: f64) -> Self {
        self.min_distance_meters = meters;
        self
    }
}

/// Issuance order of a landmark query. Larger is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A landmark lookup the trigger decided to issue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkQuery {
    pub id: RequestId,
    pub position: GeoPoint,
}

/// Decides when a position update warrants a fresh landmark list.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    config: RefreshConfig,
    last_query_position: Option<GeoPoint>,
    next_id: u64,
}

impl RefreshTrigger {
    /// Create a trigger that has not issued any query.
    pub fn new(config: RefreshConfig) -> Self {
        Self {
            config,
            last_query_position: None,
            next_id: 1,
        }
    }

    /// Feed a position sample.
    ///
    /// The first sample always fires. After that, fires once the device is
    /// at least `min_distance_meters` from where the previous query was
    /// issued. The reference point only moves when a query fires.
    pub fn observe(&mut self, position: GeoPoint) -> Option<LandmarkQuery> {
        if let Some(last) = self.last_query_position {
            let moved = last.distance_meters(&position);
            if moved < self.config.min_distance_meters {
                trace!(
                    moved_m = moved,
                    threshold_m = self.config.min_distance_meters,
                    "Position within refresh threshold"
                );
                return None;
            }
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.last_query_position = Some(position);
        Some(LandmarkQuery { id, position })
    }

    /// Position of the most recently issued query.
    pub fn last_query_position(&self) -> Option<GeoPoint> {
        self.last_query_position
    }

    /// Id of the most recently issued query.
    pub fn last_issued(&self) -> Option<RequestId> {
        (self.next_id > 1).then(|| RequestId(self.next_id - 1))
    }

    /// Forget the reference position so the next sample fires.
    ///
    /// Request ids keep increasing so older in-flight responses stay stale.
    pub fn reset(&mut self) {
        self.last_query_position = None;
    }
}

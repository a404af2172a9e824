//! Point-in-time metrics copy.

use std::fmt;

use serde::Serialize;

/// Values of every [`SessionMetrics`](super::SessionMetrics) counter at one
/// instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub heading_samples: u64,
    pub position_samples: u64,
    pub queries_issued: u64,
    pub queries_succeeded: u64,
    pub queries_failed: u64,
    pub queries_aborted: u64,
    pub stale_responses: u64,
    pub frames_published: u64,
}

impl MetricsSnapshot {
    /// Queries that have not succeeded, failed or been aborted yet.
    pub fn queries_in_flight(&self) -> u64 {
        self.queries_issued.saturating_sub(
            self.queries_succeeded + self.queries_failed + self.queries_aborted,
        )
    }

    /// Fraction of finished queries that failed, 0 when none finished.
    pub fn failure_rate(&self) -> f64 {
        let finished = self.queries_succeeded + self.queries_failed;
        if finished == 0 {
            0.0
        } else {
            self.queries_failed as f64 / finished as f64
        }
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "headings={} positions={} queries={}/{} ok, {} failed, {} aborted, {} stale frames={}",
            self.heading_samples,
            self.position_samples,
            self.queries_succeeded,
            self.queries_issued,
            self.queries_failed,
            self.queries_aborted,
            self.stale_responses,
            self.frames_published
        )
    }
}

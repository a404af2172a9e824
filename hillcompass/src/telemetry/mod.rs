//! Session telemetry.
//!
//! Lock-free atomic counters updated by the session loop, read as
//! point-in-time snapshots by the CLI and tests.
//!
//! ```text
//! CompassSession ─────► SessionMetrics ─────► MetricsSnapshot ─────► Views
//!                       (atomic counters)     (point-in-time copy)   (CLI, logs)
//! ```
//!
//! # Example
//!
//! ```
//! use hillcompass::telemetry::SessionMetrics;
//!
//! let metrics = SessionMetrics::new();
//! metrics.query_issued();
//! metrics.query_succeeded();
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.queries_in_flight(), 0);
//! ```

mod metrics;
mod snapshot;

pub use metrics::SessionMetrics;
pub use snapshot::MetricsSnapshot;

//! Atomic session counters.

use std::sync::atomic::{AtomicU64, Ordering};

use super::MetricsSnapshot;

/// Counters for one compass session.
///
/// Shared as `Arc<SessionMetrics>` between the session and its handle.
#[derive(Debug, Default)]
pub struct SessionMetrics {
    heading_samples: AtomicU64,
    position_samples: AtomicU64,
    queries_issued: AtomicU64,
    queries_succeeded: AtomicU64,
    queries_failed: AtomicU64,
    queries_aborted: AtomicU64,
    stale_responses: AtomicU64,
    frames_published: AtomicU64,
}

impl SessionMetrics {
    /// Create metrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A heading-bearing sensor sample was accepted.
    pub fn heading_sample(&self) {
        self.heading_samples.fetch_add(1, Ordering::Relaxed);
    }

    /// A position sample was processed.
    pub fn position_sample(&self) {
        self.position_samples.fetch_add(1, Ordering::Relaxed);
    }

    /// A landmark query was sent.
    pub fn query_issued(&self) {
        self.queries_issued.fetch_add(1, Ordering::Relaxed);
    }

    /// A landmark query returned a list.
    pub fn query_succeeded(&self) {
        self.queries_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// A landmark query failed.
    pub fn query_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Landmark queries were abandoned without a result.
    pub fn queries_aborted(&self, count: u64) {
        self.queries_aborted.fetch_add(count, Ordering::Relaxed);
    }

    /// A successful response was superseded by a newer request.
    pub fn stale_response(&self) {
        self.stale_responses.fetch_add(1, Ordering::Relaxed);
    }

    /// An overlay frame was published.
    pub fn frame_published(&self) {
        self.frames_published.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            heading_samples: self.heading_samples.load(Ordering::Relaxed),
            position_samples: self.position_samples.load(Ordering::Relaxed),
            queries_issued: self.queries_issued.load(Ordering::Relaxed),
            queries_succeeded: self.queries_succeeded.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            queries_aborted: self.queries_aborted.load(Ordering::Relaxed),
            stale_responses: self.stale_responses.load(Ordering::Relaxed),
            frames_published: self.frames_published.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_metrics_start_at_zero() {
        assert_eq!(SessionMetrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters_increment_independently() {
        let metrics = SessionMetrics::new();
        metrics.heading_sample();
        metrics.heading_sample();
        metrics.query_issued();
        metrics.query_failed();
        metrics.queries_aborted(2);
        metrics.frame_published();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.heading_samples, 2);
        assert_eq!(snapshot.position_samples, 0);
        assert_eq!(snapshot.queries_issued, 1);
        assert_eq!(snapshot.queries_failed, 1);
        assert_eq!(snapshot.queries_aborted, 2);
        assert_eq!(snapshot.frames_published, 1);
    }

    #[test]
    fn test_thread_safe_counting() {
        use std::thread;

        let metrics = Arc::new(SessionMetrics::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let m = Arc::clone(&metrics);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    m.position_sample();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.snapshot().position_samples, 800);
    }
}

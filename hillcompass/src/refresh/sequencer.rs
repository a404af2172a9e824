//! Last-request-wins ordering for lookup responses.

use super::RequestId;

/// Admits lookup responses in issuance order.
///
/// A response is accepted only if its request was issued after the request
/// whose response was last applied. Failures never advance the sequence, so
/// a failed newer request does not block a slower older one from landing.
#[derive(Debug, Clone, Default)]
pub struct ResponseSequencer {
    applied: Option<RequestId>,
    stale_discarded: u64,
}

impl ResponseSequencer {
    /// Create a sequencer that has applied nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a successful response may replace the current data.
    ///
    /// Returns true and records the id if it is newer than the last applied
    /// one; otherwise counts it as stale.
    pub fn accept(&mut self, id: RequestId) -> bool {
        match self.applied {
            Some(applied) if id <= applied => {
                self.stale_discarded += 1;
                false
            }
            _ => {
                self.applied = Some(id);
                true
            }
        }
    }

    /// Whether a response for `id` would still be current.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.applied.map(|applied| id > applied).unwrap_or(true)
    }

    /// Id of the last applied response.
    pub fn last_applied(&self) -> Option<RequestId> {
        self.applied
    }

    /// Number of responses dropped as stale.
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }
}

//! RAII handle for an active sensor subscription.

use std::fmt;

use tracing::debug;

type ReleaseFn = Box<dyn FnOnce() + Send>;

/// Keeps a sensor subscription alive.
///
/// The release action runs exactly once: on [`release`](Self::release) or on
/// drop, whichever comes first.
pub struct SubscriptionGuard {
    sensor: String,
    release: Option<ReleaseFn>,
}

impl SubscriptionGuard {
    /// Wrap a release action for the named sensor.
    pub fn new(sensor: impl Into<String>, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            sensor: sensor.into(),
            release: Some(Box::new(release)),
        }
    }

    /// Sensor this guard belongs to.
    pub fn sensor(&self) -> &str {
        &self.sensor
    }

    /// Unsubscribe now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
            debug!(sensor = %self.sensor, "Sensor subscription released");
        }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("sensor", &self.sensor)
            .field("active", &self.release.is_some())
            .finish()
    }
}

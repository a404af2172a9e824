//! In-process sensor source driven by a feed handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::{SensorEvent, SensorSource, SubscriptionGuard};
use crate::error::{CompassError, CompassResult};

#[derive(Default)]
struct Subscriber {
    sender: Option<mpsc::Sender<SensorEvent>>,
    generation: u64,
}

#[derive(Default)]
struct Shared {
    subscriber: Mutex<Subscriber>,
    unavailable: Mutex<Option<String>>,
    subscribes: AtomicU64,
    releases: AtomicU64,
}

/// A sensor source fed from the same process.
///
/// Events pushed through the paired [`SensorFeed`] reach the session only
/// while a subscription is active. One subscriber at a time.
pub struct ChannelSensorSource {
    name: String,
    shared: Arc<Shared>,
}

impl ChannelSensorSource {
    /// Create a source and the feed that drives it.
    pub fn new(name: impl Into<String>) -> (Self, SensorFeed) {
        let shared = Arc::new(Shared::default());
        let source = Self {
            name: name.into(),
            shared: Arc::clone(&shared),
        };
        (source, SensorFeed { shared })
    }
}

impl SensorSource for ChannelSensorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe(&self, events: mpsc::Sender<SensorEvent>) -> CompassResult<SubscriptionGuard> {
        if let Some(reason) = self.shared.unavailable.lock().clone() {
            return Err(CompassError::SubscriptionFailed {
                sensor: self.name.clone(),
                reason,
            });
        }

        let generation = {
            let mut subscriber = self.shared.subscriber.lock();
            if subscriber.sender.is_some() {
                return Err(CompassError::SubscriptionFailed {
                    sensor: self.name.clone(),
                    reason: "already subscribed".to_string(),
                });
            }
            subscriber.generation += 1;
            subscriber.sender = Some(events);
            subscriber.generation
        };

        self.shared.subscribes.fetch_add(1, Ordering::Relaxed);
        debug!(sensor = %self.name, generation, "Sensor subscribed");

        let shared = Arc::clone(&self.shared);
        Ok(SubscriptionGuard::new(self.name.clone(), move || {
            let mut subscriber = shared.subscriber.lock();
            if subscriber.generation == generation {
                subscriber.sender = None;
            }
            shared.releases.fetch_add(1, Ordering::Relaxed);
        }))
    }
}

/// Producer side of a [`ChannelSensorSource`].
#[derive(Clone)]
pub struct SensorFeed {
    shared: Arc<Shared>,
}

impl SensorFeed {
    /// Push an event to the current subscriber.
    ///
    /// Returns false when nobody is subscribed or the receiver is gone; the
    /// event is dropped in that case.
    pub async fn send(&self, event: SensorEvent) -> bool {
        let sender = self.shared.subscriber.lock().sender.clone();
        match sender {
            Some(sender) => sender.send(event).await.is_ok(),
            None => {
                trace!(kind = event.kind(), "Dropping sensor event (not subscribed)");
                false
            }
        }
    }

    /// Whether a subscription is active.
    pub fn is_subscribed(&self) -> bool {
        self.shared.subscriber.lock().sender.is_some()
    }

    /// Make future subscriptions fail with `reason`, or clear with `None`.
    pub fn set_unavailable(&self, reason: Option<String>) {
        *self.shared.unavailable.lock() = reason;
    }

    /// Total subscriptions granted.
    pub fn subscribe_count(&self) -> u64 {
        self.shared.subscribes.load(Ordering::Relaxed)
    }

    /// Total subscriptions released.
    pub fn release_count(&self) -> u64 {
        self.shared.releases.load(Ordering::Relaxed)
    }
}

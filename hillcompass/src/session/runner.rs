//! The session actor loop.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::{CompassStatus, OverlayFrame, SessionConfig};
use crate::error::{CompassError, CompassResult};
use crate::heading::{HeadingState, HeadingTracker};
use crate::landmark::{bucket, BucketedLandmarkSet, Landmark};
use crate::overlay::OverlayProjector;
use crate::permission::PermissionState;
use crate::provider::{LandmarkProvider, LookupError};
use crate::refresh::{GeoPoint, LandmarkQuery, RefreshTrigger, ResponseSequencer};
use crate::sensor::{SensorEvent, SensorSource, SubscriptionGuard};
use crate::telemetry::{MetricsSnapshot, SessionMetrics};

/// Messages from the host to a running session.
#[derive(Debug, Clone)]
enum SessionControl {
    Permissions(PermissionState),
}

/// A finished landmark lookup.
struct LookupOutcome {
    query: LandmarkQuery,
    result: Result<Vec<Landmark>, LookupError>,
}

/// Host-side handle to a [`CompassSession`].
#[derive(Clone)]
pub struct SessionHandle {
    control: mpsc::Sender<SessionControl>,
    frames: watch::Receiver<OverlayFrame>,
    metrics: Arc<SessionMetrics>,
}

impl SessionHandle {
    /// Report a change in camera, location or sensor availability.
    pub async fn set_permissions(&self, state: PermissionState) -> CompassResult<()> {
        self.control
            .send(SessionControl::Permissions(state))
            .await
            .map_err(|_| CompassError::SessionClosed)
    }

    /// Receiver that observes every published frame.
    pub fn frames(&self) -> watch::Receiver<OverlayFrame> {
        self.frames.clone()
    }

    /// Most recently published frame.
    pub fn latest(&self) -> OverlayFrame {
        self.frames.borrow().clone()
    }

    /// Current counter values.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Single-threaded compass pipeline.
///
/// Sensor events, host control messages and lookup completions are handled
/// one at a time by [`run`](Self::run). Heading, bucketing and projection
/// are synchronous; only landmark lookups suspend, and those run on spawned
/// tasks so heading updates keep flowing while a lookup is in flight.
pub struct CompassSession {
    config: SessionConfig,
    provider: Arc<dyn LandmarkProvider>,
    sources: Vec<Box<dyn SensorSource>>,
    guards: Vec<SubscriptionGuard>,

    events_tx: mpsc::Sender<SensorEvent>,
    events_rx: mpsc::Receiver<SensorEvent>,
    control_rx: mpsc::Receiver<SessionControl>,
    frames: watch::Sender<OverlayFrame>,
    lookups: JoinSet<LookupOutcome>,
    metrics: Arc<SessionMetrics>,

    permissions: PermissionState,
    /// Reason the pipeline is halted, if it is.
    halted: Option<String>,
    /// Sensors are subscribed and the pipeline is running.
    running: bool,

    tracker: HeadingTracker,
    trigger: RefreshTrigger,
    sequencer: ResponseSequencer,
    landmarks: BucketedLandmarkSet,
    projector: OverlayProjector,
    landmarks_revision: u64,
    last_error: Option<String>,
    sequence: u64,
}

impl CompassSession {
    /// Create a session and the handle used to steer and observe it.
    ///
    /// Nothing is subscribed until [`run`](Self::run) starts.
    pub fn new(
        config: SessionConfig,
        provider: Arc<dyn LandmarkProvider>,
        sources: Vec<Box<dyn SensorSource>>,
    ) -> (Self, SessionHandle) {
        let (events_tx, events_rx) = mpsc::channel(config.event_buffer.max(1));
        let (control_tx, control_rx) = mpsc::channel(config.control_buffer.max(1));
        let (frames_tx, frames_rx) = watch::channel(OverlayFrame::waiting());
        let metrics = Arc::new(SessionMetrics::new());

        let handle = SessionHandle {
            control: control_tx,
            frames: frames_rx,
            metrics: Arc::clone(&metrics),
        };

        let session = Self {
            tracker: HeadingTracker::new(config.heading.clone()),
            trigger: RefreshTrigger::new(config.refresh.clone()),
            projector: OverlayProjector::new(config.layout),
            permissions: config.initial_permissions,
            config,
            provider,
            sources,
            guards: Vec::new(),
            events_tx,
            events_rx,
            control_rx,
            frames: frames_tx,
            lookups: JoinSet::new(),
            metrics,
            halted: None,
            running: false,
            sequencer: ResponseSequencer::new(),
            landmarks: BucketedLandmarkSet::new(),
            landmarks_revision: 0,
            last_error: None,
            sequence: 0,
        };

        (session, handle)
    }

    /// Shared metrics for this session.
    pub fn metrics(&self) -> Arc<SessionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run until `shutdown` is cancelled.
    ///
    /// All sensor subscriptions are released and in-flight lookups aborted
    /// before this returns.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            provider = self.provider.name(),
            sensors = self.sources.len(),
            strategy = %self.config.heading.strategy,
            "Compass session starting"
        );

        let initial = self.permissions;
        self.apply_permissions(initial);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Compass session shutting down");
                    break;
                }

                Some(control) = self.control_rx.recv() => {
                    self.handle_control(control);
                }

                Some(joined) = self.lookups.join_next(), if !self.lookups.is_empty() => {
                    self.handle_lookup(joined);
                }

                Some(event) = self.events_rx.recv() => {
                    self.handle_event(event);
                }
            }
        }

        self.release_sensors();
        self.abort_lookups();
        let snapshot = self.metrics.snapshot();
        info!(%snapshot, "Compass session stopped");
    }

    fn handle_control(&mut self, control: SessionControl) {
        match control {
            SessionControl::Permissions(state) => {
                debug!(?state, "Permission state changed");
                self.apply_permissions(state);
            }
        }
    }

    fn apply_permissions(&mut self, state: PermissionState) {
        self.permissions = state;
        match state.check() {
            Err(err) => {
                if self.halted.as_deref() != Some(err.to_string().as_str()) {
                    warn!(reason = %err, "Compass pipeline halted");
                }
                self.halt(err.to_string());
            }
            Ok(()) if !self.running => self.resume(),
            Ok(()) => {}
        }
        self.publish();
    }

    /// Subscribe every sensor. On any failure the guards already taken are
    /// dropped, which releases them.
    fn subscribe_all(&self) -> CompassResult<Vec<SubscriptionGuard>> {
        let mut guards = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let guard = source.subscribe(self.events_tx.clone())?;
            debug!(sensor = source.name(), "Sensor subscription acquired");
            guards.push(guard);
        }
        Ok(guards)
    }

    fn resume(&mut self) {
        match self.subscribe_all() {
            Ok(guards) => {
                self.guards = guards;
                self.halted = None;
                self.running = true;
                info!(sensors = self.guards.len(), "Compass pipeline running");
            }
            Err(err) => {
                warn!(error = %err, "Sensor subscription failed");
                self.halt(err.to_string());
            }
        }
    }

    /// Stop the pipeline: release sensors and forget derived state.
    ///
    /// The bucketed landmark set is kept so a resumed session has markers
    /// as soon as a heading arrives.
    fn halt(&mut self, reason: String) {
        self.release_sensors();
        self.renew_event_channel();
        self.abort_lookups();
        self.tracker.reset();
        self.projector.reset();
        self.trigger.reset();
        self.running = false;
        self.halted = Some(reason);
    }

    /// Replace the event channel so samples queued or in transit under the
    /// released subscriptions are never handled.
    fn renew_event_channel(&mut self) {
        let (events_tx, events_rx) = mpsc::channel(self.config.event_buffer.max(1));
        self.events_tx = events_tx;
        self.events_rx = events_rx;
    }

    /// Abort pending lookups. Their results, finished or not, are never applied.
    fn abort_lookups(&mut self) {
        let pending = self.lookups.len() as u64;
        if pending == 0 {
            return;
        }
        debug!(pending, "Aborting landmark lookups");
        self.lookups.abort_all();
        self.lookups.detach_all();
        self.metrics.queries_aborted(pending);
    }

    fn release_sensors(&mut self) {
        if !self.guards.is_empty() {
            debug!(count = self.guards.len(), "Releasing sensor subscriptions");
        }
        for guard in self.guards.drain(..) {
            guard.release();
        }
    }

    fn handle_event(&mut self, event: SensorEvent) {
        if !self.running {
            trace!(kind = event.kind(), "Dropping sensor event while halted");
            return;
        }

        match event {
            SensorEvent::FusedHeading { degrees } => {
                if self.tracker.record_fused(degrees) {
                    self.metrics.heading_sample();
                    self.publish();
                }
            }
            SensorEvent::Magnetic(sample) => {
                if self.tracker.record_magnetic(&sample) {
                    self.metrics.heading_sample();
                    self.publish();
                }
            }
            SensorEvent::Acceleration(sample) => {
                let before = self.tracker.state();
                self.tracker.record_acceleration(&sample);
                if self.tracker.state() != before {
                    self.publish();
                }
            }
            SensorEvent::Position(position) => self.handle_position(position),
        }
    }

    fn handle_position(&mut self, position: GeoPoint) {
        let position = match GeoPoint::new(position.latitude, position.longitude) {
            Ok(position) => position,
            Err(err) => {
                warn!(error = %err, "Ignoring position sample");
                return;
            }
        };
        self.metrics.position_sample();

        if let Some(query) = self.trigger.observe(position) {
            info!(request = %query.id, position = %query.position, "Requesting nearby landmarks");
            self.metrics.query_issued();
            let provider = Arc::clone(&self.provider);
            self.lookups.spawn(async move {
                let result = provider.lookup(query.position).await;
                LookupOutcome { query, result }
            });
        }
    }

    fn handle_lookup(&mut self, joined: Result<LookupOutcome, JoinError>) {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => {
                self.metrics.queries_aborted(1);
                trace!("Landmark lookup aborted");
                return;
            }
            Err(err) => {
                self.metrics.query_failed();
                warn!(error = %err, "Landmark lookup task failed");
                return;
            }
        };

        if !self.running {
            self.metrics.queries_aborted(1);
            debug!(request = %outcome.query.id, "Discarding lookup result while halted");
            return;
        }

        let id = outcome.query.id;
        match outcome.result {
            Ok(landmarks) => {
                self.metrics.query_succeeded();
                if !self.sequencer.accept(id) {
                    self.metrics.stale_response();
                    debug!(request = %id, "Discarding stale landmark response");
                    return;
                }
                self.landmarks = bucket(&landmarks);
                self.landmarks_revision += 1;
                self.last_error = None;
                info!(
                    request = %id,
                    received = landmarks.len(),
                    bucketed = self.landmarks.len(),
                    "Landmark set updated"
                );
                self.publish();
            }
            Err(err) => {
                self.metrics.query_failed();
                let err = CompassError::from(err);
                warn!(request = %id, error = %err, "Landmark lookup failed, keeping previous set");
                // Failures of superseded queries are not shown
                if self.trigger.last_issued() == Some(id) {
                    self.last_error = Some(err.to_string());
                    self.publish();
                }
            }
        }
    }

    fn build_frame(&mut self) -> OverlayFrame {
        self.sequence += 1;
        let mut frame = OverlayFrame {
            sequence: self.sequence,
            landmarks_revision: self.landmarks_revision,
            last_error: self.last_error.clone(),
            ..OverlayFrame::waiting()
        };

        if let Some(reason) = &self.halted {
            frame.status = CompassStatus::Unavailable {
                reason: reason.clone(),
            };
            return frame;
        }

        if let HeadingState::Available {
            heading,
            approximate,
        } = self.tracker.state()
        {
            frame.status = CompassStatus::Active { heading };
            frame.heading = Some(heading);
            frame.approximate = approximate;
            frame.dial_rotation = Some(self.projector.layout().dial_rotation(heading));
            frame.transforms = self.projector.project(&self.landmarks, heading);
        }
        frame
    }

    fn publish(&mut self) {
        let frame = self.build_frame();
        trace!(
            sequence = frame.sequence,
            markers = frame.transforms.len(),
            "Publishing overlay frame"
        );
        self.frames.send_replace(frame);
        self.metrics.frame_published();
    }
}

//! Compass session: the event loop tying sensors, lookups and projection.
//!
//! ```text
//!  SensorSource ──► SensorEvent ──┐
//!  SessionHandle ──► control ─────┼──► CompassSession ──► watch<OverlayFrame>
//!  lookup tasks ──► results ──────┘        │
//!                                          └──► LandmarkProvider (spawned)
//! ```
//!
//! Permission changes are delivered through the [`SessionHandle`]. While any
//! required capability is missing, sensors are unsubscribed and frames carry
//! [`CompassStatus::Unavailable`] with the reason.
//!
//! # Example
//!
//! ```ignore
//! let (session, handle) = CompassSession::new(config, provider, sources);
//! let shutdown = CancellationToken::new();
//! tokio::spawn(session.run(shutdown.clone()));
//!
//! handle.set_permissions(PermissionState::granted()).await?;
//! let mut frames = handle.frames();
//! while frames.changed().await.is_ok() {
//!     println!("{}", frames.borrow().headline());
//! }
//! ```

mod config;
mod frame;
mod runner;

pub use config::{SessionConfig, DEFAULT_CONTROL_BUFFER, DEFAULT_EVENT_BUFFER};
pub use frame::{CompassStatus, OverlayFrame};
pub use runner::{CompassSession, SessionHandle};

//! Hillcompass - augmented-reality hill compass engine
//!
//! Turns device orientation and position samples plus a list of nearby
//! landmarks into marker transforms for a camera overlay.
//!
//! # Pipeline
//!
//! ```text
//! heading samples ──► HeadingTracker ──► Heading ─────────────┐
//!                                                             ▼
//! positions ──► RefreshTrigger ──► LandmarkProvider ──► bucket() ──► OverlayProjector ──► OverlayFrame
//! ```
//!
//! The pure pieces ([`heading`], [`landmark`], [`overlay`], [`refresh`]) can
//! be used on their own. [`session::CompassSession`] wires them into a
//! single-threaded event loop with scoped sensor subscriptions.

pub mod angle;
pub mod config;
pub mod error;
pub mod heading;
pub mod landmark;
pub mod logging;
pub mod overlay;
pub mod permission;
pub mod provider;
pub mod refresh;
pub mod sensor;
pub mod session;
pub mod telemetry;

pub use error::{CompassError, CompassResult};
pub use heading::Heading;
pub use landmark::{bucket, BucketedLandmarkSet, Landmark};
pub use overlay::{project, OverlayTransform};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Overlay projection: landmark bearings relative to the device heading.
//!
//! A landmark's marker is rotated by its *relative* bearing, so whatever the
//! device faces sits at 0° and markers turn smoothly as the user turns.
//!
//! ```text
//! BucketedLandmarkSet ──┐
//!                       ├──► project() ──► Vec<OverlayTransform> ──► renderer
//! Heading ──────────────┘        │
//!                                └── DialLayout (screen placement)
//! ```
//!
//! [`project`] is pure. [`OverlayProjector`] wraps it and unwraps each
//! marker's rotation across north so a renderer animating between frames
//! never spins a marker the long way round.

mod layout;
mod projector;

pub use layout::{DialLayout, ScreenPosition};
pub use projector::{
    project, project_with_layout, relative_bearing, OverlayProjector, OverlayTransform,
};

//! Screen placement of markers on the compass dial.
//!
//! The dial is a circle squashed vertically to suggest perspective. These
//! values are presentation hints; renderers are free to ignore them and use
//! the rotation alone.

use serde::{Deserialize, Serialize};

use crate::heading::Heading;

/// Default dial radius in screen units.
pub const DEFAULT_DIAL_RADIUS: f64 = 100.0;

/// Default horizontal stretch of the dial.
pub const DEFAULT_SCALE_X: f64 = 1.8;

/// Default vertical squash of the dial.
pub const DEFAULT_SCALE_Y: f64 = 0.9;

/// Default rotation of the dial artwork relative to north.
///
/// The stock compass face is drawn with north pointing right.
pub const DEFAULT_DIAL_OFFSET_DEGREES: f64 = -90.0;

/// Offset of a marker from the dial centre, in screen units.
///
/// `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

/// Geometry of the compass dial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialLayout {
    /// Dial radius before scaling.
    pub radius: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Rotation applied to the dial artwork on top of `-heading`.
    pub dial_offset_degrees: f64,
}

impl Default for DialLayout {
    fn default() -> Self {
        Self {
            radius: DEFAULT_DIAL_RADIUS,
            scale_x: DEFAULT_SCALE_X,
            scale_y: DEFAULT_SCALE_Y,
            dial_offset_degrees: DEFAULT_DIAL_OFFSET_DEGREES,
        }
    }
}

impl DialLayout {
    /// Set the dial radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the perspective scale factors.
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// Set the artwork offset.
    pub fn with_dial_offset(mut self, degrees: f64) -> Self {
        self.dial_offset_degrees = degrees;
        self
    }

    /// Position on the dial rim for a relative bearing.
    ///
    /// 0° is straight ahead (top of the dial), angles grow clockwise.
    pub fn position(&self, relative_bearing: f64) -> ScreenPosition {
        let theta = relative_bearing.to_radians();
        ScreenPosition {
            x: self.radius * theta.sin() * self.scale_x,
            y: -self.radius * theta.cos() * self.scale_y,
        }
    }

    /// Rotation for the dial background so its north tracks magnetic north.
    pub fn dial_rotation(&self, heading: Heading) -> f64 {
        -heading.degrees() + self.dial_offset_degrees
    }
}

//! Degree arithmetic shared by the heading, bucketing and overlay modules.
//!
//! All compass quantities in this crate are degrees clockwise from magnetic
//! north. Stored values live in `[0, 360)`; differences between two of them
//! are expressed as the shortest signed rotation.

/// Number of degrees in a full turn.
pub const FULL_TURN: f64 = 360.0;

/// Number of distinct integer bearing keys (0..=359).
pub const BEARING_KEYS: u16 = 360;

/// Wrap any finite angle into `[0, 360)`.
///
/// Uses Euclidean remainder so negative inputs wrap forward
/// (`-45.0` → `315.0`) and values at or beyond a full turn wrap back.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed rotation from `from` to `to`, in `(-180, 180]`.
///
/// Crossing north is treated as a small step: `signed_delta(359.0, 0.0)`
/// is `+1.0`, not `-359.0`.
#[inline]
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 {
        delta - FULL_TURN
    } else {
        delta
    }
}

/// Round a bearing to its integer bucket key in `0..=359`.
///
/// Rounds half away from zero (`f64::round`), then wraps 360 back to 0 so
/// bearings just below north share the north bucket.
#[inline]
pub fn bearing_key(bearing: f64) -> u16 {
    let rounded = normalize_degrees(bearing).round();
    (rounded as u16) % BEARING_KEYS
}

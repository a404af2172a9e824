//! Relative-bearing projection.

use std::collections::HashMap;

use serde::Serialize;

use super::{DialLayout, ScreenPosition};
use crate::angle::{normalize_degrees, signed_delta, FULL_TURN};
use crate::heading::Heading;
use crate::landmark::{BucketedLandmarkSet, Landmark};

/// Render parameters for one landmark marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayTransform {
    /// Bearing bucket this marker belongs to.
    pub key: u16,
    /// The landmark drawn.
    pub landmark: Landmark,
    /// Bearing relative to the device heading, in `[0, 360)`.
    pub relative_bearing: f64,
    /// Signed offset from straight ahead, in `(-180, 180]`.
    ///
    /// Negative is left of the heading, positive is right.
    pub offset_degrees: f64,
    /// Rotation to apply to the marker, in degrees.
    ///
    /// Equal to `relative_bearing` from [`project`]; continuous across
    /// frames (may leave `[0, 360)`) from [`OverlayProjector`].
    pub rotation_degrees: f64,
    /// Marker position on the dial.
    pub screen_position: ScreenPosition,
}

/// `(bearing - heading + 360) mod 360`, always in `[0, 360)`.
#[inline]
pub fn relative_bearing(bearing: f64, heading: Heading) -> f64 {
    normalize_degrees(bearing - heading.degrees() + FULL_TURN)
}

/// Project every bucketed landmark against the heading with the default dial.
pub fn project(set: &BucketedLandmarkSet, heading: Heading) -> Vec<OverlayTransform> {
    project_with_layout(set, heading, &DialLayout::default())
}

/// Project every bucketed landmark against the heading.
///
/// Pure: identical inputs always give identical output. Transforms come
/// back in bucket-key order.
pub fn project_with_layout(
    set: &BucketedLandmarkSet,
    heading: Heading,
    layout: &DialLayout,
) -> Vec<OverlayTransform> {
    set.iter()
        .map(|(key, landmark)| {
            let relative = relative_bearing(landmark.bearing, heading);
            OverlayTransform {
                key: *key,
                landmark: landmark.clone(),
                relative_bearing: relative,
                offset_degrees: signed_delta(0.0, relative),
                rotation_degrees: relative,
                screen_position: layout.position(relative),
            }
        })
        .collect()
}

/// Projection with rotation continuity between frames.
///
/// Remembers the last rotation emitted for each bucket key and moves it by
/// the shortest signed step to the new relative bearing. A marker crossing
/// straight behind or straight ahead therefore goes 359 → 360 rather than
/// 359 → 0. Keys missing from a new set are forgotten.
#[derive(Debug, Clone, Default)]
pub struct OverlayProjector {
    layout: DialLayout,
    rotations: HashMap<u16, f64>,
}

impl OverlayProjector {
    /// Create a projector for the given dial.
    pub fn new(layout: DialLayout) -> Self {
        Self {
            layout,
            rotations: HashMap::new(),
        }
    }

    /// Dial geometry in use.
    pub fn layout(&self) -> &DialLayout {
        &self.layout
    }

    /// Project and unwrap rotations against the previous frame.
    pub fn project(&mut self, set: &BucketedLandmarkSet, heading: Heading) -> Vec<OverlayTransform> {
        let mut transforms = project_with_layout(set, heading, &self.layout);
        let mut next = HashMap::with_capacity(transforms.len());

        for transform in &mut transforms {
            let rotation = match self.rotations.get(&transform.key) {
                Some(previous) => previous + signed_delta(*previous, transform.relative_bearing),
                None => transform.relative_bearing,
            };
            transform.rotation_degrees = rotation;
            next.insert(transform.key, rotation);
        }

        self.rotations = next;
        transforms
    }

    /// Forget all previous rotations.
    pub fn reset(&mut self) {
        self.rotations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::bucket;

    fn heading(degrees: f64) -> Heading {
        Heading::from_degrees(degrees).unwrap()
    }

    #[test]
    fn test_relative_bearing_across_seam() {
        assert_eq!(relative_bearing(1.0, heading(359.0)), 2.0);
        assert_eq!(relative_bearing(359.0, heading(1.0)), 358.0);
    }

    #[test]
    fn test_landmark_ahead_is_zero() {
        for h in [0.0, 90.0, 213.0, 359.0] {
            assert_eq!(relative_bearing(h, heading(h)), 0.0);
        }
    }

    #[test]
    fn test_empty_set_projects_to_nothing() {
        let transforms = project(&BucketedLandmarkSet::new(), heading(10.0));
        assert!(transforms.is_empty());
    }

    #[test]
    fn test_session_example() {
        let set = bucket(&[
            Landmark::new("Far", 100.0, 95.0),
            Landmark::new("Near", 50.0, 95.4),
        ]);
        let transforms = project(&set, heading(90.0));

        assert_eq!(transforms.len(), 1);
        assert_eq!(transforms[0].key, 95);
        assert_eq!(transforms[0].landmark.distance, 50.0);
        assert!((transforms[0].relative_bearing - 5.4).abs() < 1e-9);
        assert_eq!(transforms[0].relative_bearing.round(), 5.0);
    }

    #[test]
    fn test_offset_is_signed() {
        let set = bucket(&[
            Landmark::new("Left", 1.0, 80.0),
            Landmark::new("Right", 1.0, 100.0),
        ]);
        let transforms = project(&set, heading(90.0));
        assert_eq!(transforms[0].offset_degrees, -10.0);
        assert_eq!(transforms[1].offset_degrees, 10.0);
    }

    #[test]
    fn test_project_is_idempotent() {
        let set = bucket(&[Landmark::new("A", 1.0, 10.0), Landmark::new("B", 2.0, 200.0)]);
        assert_eq!(project(&set, heading(45.0)), project(&set, heading(45.0)));

        let mut projector = OverlayProjector::default();
        let first = projector.project(&set, heading(45.0));
        let second = projector.project(&set, heading(45.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_projector_unwraps_across_seam() {
        let set = bucket(&[Landmark::new("North", 1.0, 0.0)]);
        let mut projector = OverlayProjector::default();

        // Heading 1 → relative 359
        let before = projector.project(&set, heading(1.0));
        assert_eq!(before[0].rotation_degrees, 359.0);

        // Heading 0 → relative 0, emitted as 360 (a +1 step)
        let after = projector.project(&set, heading(0.0));
        assert_eq!(after[0].relative_bearing, 0.0);
        assert_eq!(after[0].rotation_degrees, 360.0);

        // And back again
        let back = projector.project(&set, heading(1.0));
        assert_eq!(back[0].rotation_degrees, 359.0);
    }

    #[test]
    fn test_projector_steps_never_jump() {
        let set = bucket(&[Landmark::new("A", 1.0, 3.0), Landmark::new("B", 1.0, 181.0)]);
        let mut projector = OverlayProjector::default();
        let mut previous = projector.project(&set, heading(0.0));

        // Full turn in one-degree steps, both directions
        for step in (1..=720).chain((0..720).rev()) {
            let current = projector.project(&set, heading(step as f64));
            for (a, b) in previous.iter().zip(&current) {
                let jump = (b.rotation_degrees - a.rotation_degrees).abs();
                assert!(jump <= 1.0 + 1e-9, "rotation jumped {} at step {}", jump, step);
            }
            previous = current;
        }
    }

    #[test]
    fn test_projector_forgets_missing_keys() {
        let mut projector = OverlayProjector::default();
        let set = bucket(&[Landmark::new("North", 1.0, 0.0)]);
        projector.project(&set, heading(1.0));
        projector.project(&set, heading(0.0)); // rotation now 360

        projector.project(&BucketedLandmarkSet::new(), heading(0.0));
        let fresh = projector.project(&set, heading(0.0));
        assert_eq!(fresh[0].rotation_degrees, 0.0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_relative_bearing_in_range(bearing in 0.0..360.0_f64, h in 0.0..360.0_f64) {
                let rel = relative_bearing(bearing, heading(h));
                prop_assert!((0.0..360.0).contains(&rel));
            }

            #[test]
            fn prop_one_degree_turn_moves_marker_one_degree(
                bearing in 0.0..360.0_f64,
                h in 0.0..360.0_f64,
            ) {
                let set = bucket(&[Landmark::new("X", 1.0, bearing)]);
                let mut projector = OverlayProjector::default();
                let a = projector.project(&set, heading(h))[0].rotation_degrees;
                let b = projector.project(&set, heading(h + 1.0))[0].rotation_degrees;
                prop_assert!(((a - b) - 1.0).abs() < 1e-6, "{} -> {}", a, b);
            }
        }
    }
}

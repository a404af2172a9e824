//! Raw-magnetometer heading strategy.

use std::f64::consts::TAU;

use super::{Heading, MagneticSample};

/// Derive a heading from a raw magnetic field reading.
///
/// Computes `atan2(y, x)`; negative angles get a full turn added before the
/// conversion to degrees. The result is rounded to the nearest whole degree
/// and a rounded 360 wraps to 0.
///
/// Only the horizontal components matter. Returns `None` when they carry no
/// direction (both zero) or any component is not finite.
///
/// The reading is not tilt-compensated.
pub fn heading_from_magnetometer(sample: &MagneticSample) -> Option<Heading> {
    if !sample.is_finite() || (sample.x == 0.0 && sample.y == 0.0) {
        return None;
    }

    let mut angle = sample.y.atan2(sample.x);
    if angle < 0.0 {
        angle += TAU;
    }

    Heading::from_degrees(angle.to_degrees().round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::Vector3;

    fn heading(x: f64, y: f64) -> f64 {
        heading_from_magnetometer(&Vector3::new(x, y, 0.0))
            .unwrap()
            .degrees()
    }

    #[test]
    fn test_cardinal_axes() {
        assert_eq!(heading(1.0, 0.0), 0.0);
        assert_eq!(heading(0.0, 1.0), 90.0);
        assert_eq!(heading(-1.0, 0.0), 180.0);
        assert_eq!(heading(0.0, -1.0), 270.0);
    }

    #[test]
    fn test_negative_quadrant_is_corrected() {
        // atan2(-1, 1) = -45°, corrected to 315°
        assert_eq!(heading(1.0, -1.0), 315.0);
    }

    #[test]
    fn test_rounds_to_whole_degree() {
        let deg = 10.4_f64.to_radians();
        assert_eq!(heading(deg.cos(), deg.sin()), 10.0);
    }

    #[test]
    fn test_just_below_north_wraps_to_zero() {
        let deg = 359.8_f64.to_radians();
        assert_eq!(heading(deg.cos(), deg.sin()), 0.0);
    }

    #[test]
    fn test_z_component_ignored() {
        let flat = heading_from_magnetometer(&Vector3::new(20.0, 20.0, 0.0)).unwrap();
        let steep = heading_from_magnetometer(&Vector3::new(20.0, 20.0, -45.0)).unwrap();
        assert_eq!(flat, steep);
    }

    #[test]
    fn test_degenerate_samples_rejected() {
        assert!(heading_from_magnetometer(&Vector3::new(0.0, 0.0, 30.0)).is_none());
        assert!(heading_from_magnetometer(&Vector3::new(f64::NAN, 1.0, 0.0)).is_none());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_heading_always_in_range(
                x in -1000.0..1000.0_f64,
                y in -1000.0..1000.0_f64,
                z in -1000.0..1000.0_f64,
            ) {
                prop_assume!(x != 0.0 || y != 0.0);
                let heading = heading_from_magnetometer(&Vector3::new(x, y, z)).unwrap();
                prop_assert!((0.0..360.0).contains(&heading.degrees()));
                prop_assert_eq!(heading.degrees().fract(), 0.0);
            }

            #[test]
            fn prop_scale_invariant(x in -100.0..100.0_f64, y in -100.0..100.0_f64, k in 0.1..50.0_f64) {
                prop_assume!(x.abs() > 1e-3 || y.abs() > 1e-3);
                let a = heading_from_magnetometer(&Vector3::new(x, y, 0.0)).unwrap();
                let b = heading_from_magnetometer(&Vector3::new(x * k, y * k, 0.0)).unwrap();
                // Rounding boundaries can differ by one step at most
                let diff = crate::angle::signed_delta(a.degrees(), b.degrees()).abs();
                prop_assert!(diff <= 1.0, "{:?} vs {:?}", a, b);
            }
        }
    }
}

//! Angle helpers for the dial
//!
//! All angles are in degrees, measured clockwise from 12 o'clock.
//! Pointer samples use screen orientation: x grows to the right, y grows
//! downward, both relative to the dial centre.

/// Tolerance used when comparing snapped angles
pub const ANGLE_EPSILON: f64 = 1e-6;

/// Wrap any angle into [0, 360)
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 - ANGLE_EPSILON {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest distance from `b` to `a`, in [-180, 180)
pub fn angular_diff(a: f64, b: f64) -> f64 {
    (a - b + 180.0).rem_euclid(360.0) - 180.0
}

/// Forward (clockwise) distance from `from` to `to`, in [0, 360)
pub fn arc_length(from: f64, to: f64) -> f64 {
    normalize(to - from)
}

/// Snap to the nearest multiple of `step`, wrapped into [0, 360)
pub fn snap(angle: f64, step: f64) -> f64 {
    normalize((angle / step).round() * step)
}

/// Whether two angles denote the same dial position
pub fn same_angle(a: f64, b: f64) -> bool {
    angular_diff(a, b).abs() < ANGLE_EPSILON
}

/// Whether `angle` lies on the clockwise arc from `start` to `end` (inclusive)
pub fn in_arc(angle: f64, start: f64, end: f64) -> bool {
    if start <= end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Dial angle of a pointer sample relative to the centre
pub fn pointer_angle(x: f64, y: f64) -> f64 {
    normalize(y.atan2(x).to_degrees() + 90.0)
}

/// Point at `radius` from the centre for a dial angle (screen orientation)
pub fn handle_position(angle: f64, radius: f64) -> (f64, f64) {
    let rad = (angle - 90.0).to_radians();
    (radius * rad.cos(), radius * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize() {
        assert!(close(normalize(370.0), 10.0));
        assert!(close(normalize(-10.0), 350.0));
        assert!(close(normalize(360.0), 0.0));
        assert!(close(normalize(-1e-12), 0.0));
    }

    #[test]
    fn test_angular_diff() {
        assert!(close(angular_diff(10.0, 350.0), 20.0));
        assert!(close(angular_diff(350.0, 10.0), -20.0));
        assert!(close(angular_diff(90.0, 90.0), 0.0));
    }

    #[test]
    fn test_arc_length() {
        assert!(close(arc_length(15.0, 10.0), 355.0));
        assert!(close(arc_length(5.0, 10.0), 5.0));
        assert!(close(arc_length(0.0, 0.0), 0.0));
    }

    #[test]
    fn test_snap() {
        assert!(close(snap(8.9, 6.0), 6.0));
        assert!(close(snap(9.1, 6.0), 12.0));
        assert!(close(snap(359.0, 6.0), 0.0));
        assert!(close(snap(1.3, 1.25), 1.25));
    }

    #[test]
    fn test_in_arc_across_zero() {
        assert!(in_arc(355.0, 350.0, 20.0));
        assert!(in_arc(5.0, 350.0, 20.0));
        assert!(!in_arc(180.0, 350.0, 20.0));
        assert!(in_arc(90.0, 45.0, 135.0));
        assert!(!in_arc(200.0, 45.0, 135.0));
    }

    #[test]
    fn test_pointer_angle_cardinal_points() {
        // y grows downward
        assert!(close(pointer_angle(0.0, -100.0), 0.0));
        assert!(close(pointer_angle(100.0, 0.0), 90.0));
        assert!(close(pointer_angle(0.0, 100.0), 180.0));
        assert!(close(pointer_angle(-100.0, 0.0), 270.0));
    }

    #[test]
    fn test_handle_position_inverts_pointer_angle() {
        for angle in [0.0, 37.5, 90.0, 200.0, 315.0] {
            let (x, y) = handle_position(angle, 120.0);
            assert!(close(pointer_angle(x, y), angle));
        }
    }
}

//! Scalar and angular geometry helpers shared by the editing engine.

use crate::element::Element;
use kurbo::Point;

/// Saturate `value` into `[min, max]`.
///
/// Callers are responsible for `min <= max`; an inverted range returns
/// `min` (same shape as `max(min, min(value, max))`).
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Reduce an angle in degrees to `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let reduced = angle % 360.0;
    if reduced < 0.0 {
        reduced + 360.0
    } else {
        reduced
    }
}

/// Angle in degrees from an element's center to `point`.
///
/// Uses the element's unrotated bounding box center `(x + w/2, y + h/2)`;
/// result is in `(-180, 180]` straight from `atan2`.
pub fn angle_from_center(point: Point, element: &Element) -> f64 {
    let center = element.center();
    (point.y - center.y).atan2(point.x - center.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Shape;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_normalize_angle_range() {
        for angle in [-720.0, -361.0, -180.0, -0.5, 0.0, 45.0, 359.9, 360.0, 725.0] {
            let n = normalize_angle(angle);
            assert!((0.0..360.0).contains(&n), "{angle} normalized to {n}");
        }
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-10.0), 350.0);
    }

    #[test]
    fn test_normalize_angle_idempotent() {
        for angle in [-1000.0, -359.0, 0.0, 123.4, 359.0, 1000.0] {
            let once = normalize_angle(angle);
            assert_eq!(normalize_angle(once), once);
        }
    }

    #[test]
    fn test_angle_from_center() {
        let mut element = Element::new(1, Shape::Rectangle, 0.0, 0.0, 100.0, 100.0, 0);
        element.rotation = 90.0; // Rotation must not affect the center used.

        // Center is (50, 50); a point directly to the right is 0 degrees.
        let angle = angle_from_center(Point::new(150.0, 50.0), &element);
        assert!(angle.abs() < f64::EPSILON);

        // Directly below (screen y grows downward) is +90 degrees.
        let angle = angle_from_center(Point::new(50.0, 150.0), &element);
        assert!((angle - 90.0).abs() < 1e-10);
    }
}

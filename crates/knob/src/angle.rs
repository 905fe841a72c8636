//! Pointer position to knob rotation and value.
//!
//! Angles are in degrees. Zero points straight up from the knob center
//! (screen y grows downward) and angles grow clockwise, so a touch to the
//! right of the center is at 90° and a touch to the left is at -90°.
//!
//! The dead zone is the open arc `(-L, L)` around 0° in touch space, where
//! `L` is the [`LimitingAngle`]. Touches inside it are ignored, which keeps
//! the knob from snapping through its stop. Accepted touch angles are folded
//! into a continuous rotation in `[L, 360 - L]`.

use crate::error::InvalidConfig;
use crate::geometry::Point;
use derive_more::{Deref, Display, Into};
use std::f64::consts::PI;

pub const FULL_TURN: f64 = 360.0;
pub const HALF_TURN: f64 = 180.0;
pub const DEFAULT_LIMITING_ANGLE: f64 = 25.0;

/// Half-width of the dead zone, in degrees. Always finite and in `[0, 180)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Deref, Into)]
pub struct LimitingAngle(f64);

impl LimitingAngle {
    pub fn new(degrees: f64) -> Result<Self, InvalidConfig> {
        if degrees.is_finite() && (0.0..HALF_TURN).contains(&degrees) {
            Ok(Self(degrees))
        } else {
            Err(InvalidConfig::LimitingAngle(degrees))
        }
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }

    /// Smallest reachable rotation; also the initial one.
    pub fn min_rotation(&self) -> f64 {
        self.0
    }

    pub fn max_rotation(&self) -> f64 {
        FULL_TURN - self.0
    }

    /// Angular range covered by the value scale, `360 - 2L`.
    ///
    /// Computed from [`Self::max_rotation`] so that the top of the range maps
    /// to exactly 1.0.
    pub fn sweep(&self) -> f64 {
        self.max_rotation() - self.0
    }
}

impl Default for LimitingAngle {
    fn default() -> Self {
        Self(DEFAULT_LIMITING_ANGLE)
    }
}

impl TryFrom<f64> for LimitingAngle {
    type Error = InvalidConfig;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

/// Angle of the vector from `center` to `touch`, in `(-180, 180]`.
///
/// A touch exactly on the center, or any input that yields no direction,
/// is reported as 0°.
pub fn compute_angle(center: Point, touch: Point) -> f64 {
    let (dx, dy) = (center.x - touch.x, center.y - touch.y);
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }

    let radians = dx.atan2(dy);
    let degrees = -radians.to_degrees();
    if !degrees.is_finite() {
        0.0
    } else if radians.abs() == PI || degrees <= -HALF_TURN {
        // atan2 returns +PI or -PI straight below the center depending on the sign of zero
        HALF_TURN
    } else {
        degrees + 0.0
    }
}

/// Whether a touch at `angle` falls inside the dead zone and must be ignored.
///
/// The boundaries `±L` belong to the accepted range.
pub fn is_within_dead_zone(angle: f64, limit: LimitingAngle) -> bool {
    -limit.0 < angle && angle < limit.0
}

/// Folds `angle` into the positive rotation range by adding a full turn to
/// angles in `[-180, -L]`. Idempotent.
pub fn normalize_to_positive(angle: f64, limit: LimitingAngle) -> f64 {
    if (-HALF_TURN..=-limit.0).contains(&angle) {
        FULL_TURN + angle
    } else {
        angle
    }
}

/// Maps a rotation in `[L, 360 - L]` onto `[0, 1]`.
pub fn rotation_to_value(rotation: f64, limit: LimitingAngle) -> f64 {
    (rotation - limit.0) / limit.sweep()
}

/// Inverse of [`rotation_to_value`].
pub fn value_to_rotation(value: f64, limit: LimitingAngle) -> f64 {
    limit.0 + value * limit.sweep()
}

/// Rotation a touch at `angle` would set, or `None` if it lies in the dead zone.
pub fn accepted_rotation(angle: f64, limit: LimitingAngle) -> Option<f64> {
    (!is_within_dead_zone(angle, limit)).then(|| normalize_to_positive(angle, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn limit(degrees: f64) -> LimitingAngle {
        LimitingAngle::new(degrees).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_limiting_angle_validation() {
        assert!(LimitingAngle::new(0.0).is_ok());
        assert!(LimitingAngle::new(25.0).is_ok());
        assert!(LimitingAngle::new(179.9).is_ok());
        assert_eq!(
            LimitingAngle::new(180.0),
            Err(InvalidConfig::LimitingAngle(180.0))
        );
        assert_eq!(
            LimitingAngle::new(-1.0),
            Err(InvalidConfig::LimitingAngle(-1.0))
        );
        assert!(LimitingAngle::new(f64::NAN).is_err());
        assert!(LimitingAngle::new(f64::INFINITY).is_err());
        assert_eq!(*LimitingAngle::default(), DEFAULT_LIMITING_ANGLE);
    }

    #[test]
    fn test_compute_angle_cardinal_directions() {
        let center = Point::new(50.0, 50.0);
        assert_eq!(compute_angle(center, Point::new(50.0, 10.0)), 0.0);
        assert_close(compute_angle(center, Point::new(90.0, 50.0)), 90.0);
        assert_close(compute_angle(center, Point::new(10.0, 50.0)), -90.0);
        assert_eq!(compute_angle(center, Point::new(50.0, 90.0)), 180.0);
        assert_close(compute_angle(center, Point::new(90.0, 10.0)), 45.0);
        assert_close(compute_angle(center, Point::new(10.0, 90.0)), -135.0);
    }

    #[test]
    fn test_compute_angle_degenerate_inputs() {
        let center = Point::new(12.0, 34.0);
        assert_eq!(compute_angle(center, center), 0.0);
        assert!(compute_angle(center, center).is_sign_positive());
        assert_eq!(compute_angle(Point::default(), Point::default()), 0.0);
        assert_eq!(compute_angle(center, Point::new(f64::NAN, 3.0)), 0.0);
    }

    #[test]
    fn test_compute_angle_range() {
        let center = Point::new(0.0, 0.0);
        for i in -20..=20 {
            for j in -20..=20 {
                let angle = compute_angle(center, Point::new(i as f64 * 0.5, j as f64 * 0.5));
                assert!(angle.is_finite());
                assert!(angle > -180.0 && angle <= 180.0, "angle {angle} out of range");
            }
        }
    }

    #[test]
    fn test_dead_zone_boundaries_are_accepted() {
        let l = limit(25.0);
        assert!(is_within_dead_zone(0.0, l));
        assert!(is_within_dead_zone(24.999, l));
        assert!(is_within_dead_zone(-24.999, l));
        assert!(!is_within_dead_zone(25.0, l));
        assert!(!is_within_dead_zone(-25.0, l));
        assert!(!is_within_dead_zone(90.0, l));
        assert!(!is_within_dead_zone(-170.0, l));
        assert!(!is_within_dead_zone(180.0, l));
    }

    #[test]
    fn test_zero_limit_has_no_dead_zone() {
        let l = limit(0.0);
        for angle in [-180.0, -90.0, 0.0, 45.0, 180.0] {
            assert!(!is_within_dead_zone(angle, l));
        }
        // straight up folds onto the top of the range
        assert_eq!(accepted_rotation(0.0, l), Some(360.0));
        assert_eq!(rotation_to_value(360.0, l), 1.0);
        assert_eq!(accepted_rotation(-0.0, l), Some(360.0));
        assert_eq!(accepted_rotation(1.0, l), Some(1.0));
    }

    #[test]
    fn test_normalize_to_positive() {
        let l = limit(25.0);
        assert_eq!(normalize_to_positive(90.0, l), 90.0);
        assert_eq!(normalize_to_positive(-170.0, l), 190.0);
        assert_eq!(normalize_to_positive(-25.0, l), 335.0);
        assert_eq!(normalize_to_positive(-180.0, l), 180.0);
        assert_eq!(normalize_to_positive(25.0, l), 25.0);
        assert_eq!(normalize_to_positive(180.0, l), 180.0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for l in [0.0, 10.0, 25.0, 90.0, 179.0] {
            let l = limit(l);
            for step in -360..=360 {
                let angle = step as f64 * 0.5;
                let once = normalize_to_positive(angle, l);
                assert_eq!(normalize_to_positive(once, l), once, "angle {angle}, limit {l}");
            }
        }
    }

    #[test]
    fn test_accepted_angles_land_in_rotation_range() {
        for l in [0.0, 25.0, 60.0, 179.5] {
            let l = limit(l);
            for step in -359..=360 {
                let angle = step as f64 * 0.5;
                if let Some(rotation) = accepted_rotation(angle, l) {
                    assert!(
                        rotation >= l.min_rotation() && rotation <= l.max_rotation(),
                        "rotation {rotation} outside range for limit {l}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotation_to_value_endpoints_are_exact() {
        for l in [0.0, 0.1, 1.0 / 3.0, 25.0, 33.3, 90.0, 179.99] {
            let l = limit(l);
            assert_eq!(rotation_to_value(l.min_rotation(), l), 0.0);
            assert_eq!(rotation_to_value(l.max_rotation(), l), 1.0);
        }
    }

    #[test]
    fn test_rotation_to_value_is_monotonic_and_bounded() {
        for l in [0.0, 25.0, 120.0] {
            let l = limit(l);
            let mut previous = f64::NEG_INFINITY;
            for i in 0..=1000 {
                let rotation = l.min_rotation() + l.sweep() * i as f64 / 1000.0;
                let value = rotation_to_value(rotation, l);
                assert!((0.0..=1.0).contains(&value));
                assert!(value > previous);
                previous = value;
            }
        }
    }

    #[test]
    fn test_value_round_trip() {
        let l = limit(25.0);
        for i in 0..=620 {
            let rotation = 25.0 + i as f64 * 0.5;
            let value = rotation_to_value(rotation, l);
            assert_close(value_to_rotation(value, l), rotation);
        }
    }

    #[test]
    fn test_scenarios_with_default_limit() {
        let l = LimitingAngle::default();

        assert_eq!(accepted_rotation(0.0, l), None);

        let rotation = accepted_rotation(90.0, l).unwrap();
        assert_eq!(rotation, 90.0);
        assert_close(rotation_to_value(rotation, l), 65.0 / 310.0);

        let rotation = accepted_rotation(-170.0, l).unwrap();
        assert_eq!(rotation, 190.0);
        assert_close(rotation_to_value(rotation, l), 165.0 / 310.0);
    }
}

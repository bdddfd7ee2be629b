//! Planar geometry shared by collision checks and navigation.
//!
//! Angles cross this interface in degrees; radians stay internal.

use serde::{Deserialize, Serialize};

/// A bare coordinate on the board. Radius 0, no owner, no id.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Anything with a center and a radius.
pub trait Body {
    fn position(&self) -> Position;

    fn radius(&self) -> f64 {
        0.0
    }
}

impl Body for Position {
    fn position(&self) -> Position {
        *self
    }
}

/// Euclidean distance between the two centers.
pub fn distance(a: &impl Body, b: &impl Body) -> f64 {
    let (a, b) = (a.position(), b.position());
    (b.x - a.x).hypot(b.y - a.y)
}

/// Center distance minus both radii.
pub fn surface_distance(a: &impl Body, b: &impl Body) -> f64 {
    distance(a, b) - a.radius() - b.radius()
}

/// Direction from `a` to `b` in degrees, in `[0, 360)`.
pub fn bearing(a: &impl Body, b: &impl Body) -> f64 {
    let (a, b) = (a.position(), b.position());
    normalize_degrees((b.y - a.y).atan2(b.x - a.x).to_degrees())
}

pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// The point `length` units away from `origin` along `bearing_deg`.
pub fn project(origin: Position, bearing_deg: f64, length: f64) -> Position {
    let rad = bearing_deg.to_radians();
    Position::new(origin.x + length * rad.cos(), origin.y + length * rad.sin())
}

/// Point on the circle of radius `target.radius() + clearance` around `target`
/// that is nearest to `from`.
///
/// Aiming here instead of at the center keeps a mover from ploughing into the
/// body it is heading for. When `from` sits on the target's center the point
/// falls on the zero-degree side.
pub fn closest_approach_point(target: &impl Body, from: &impl Body, clearance: f64) -> Position {
    project(
        target.position(),
        bearing(target, from),
        target.radius() + clearance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Disc {
        center: Position,
        radius: f64,
    }

    impl Body for Disc {
        fn position(&self) -> Position {
            self.center
        }

        fn radius(&self) -> f64 {
            self.radius
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn distance_is_symmetric_and_zero_to_self() {
        let samples = [
            Position::new(0.0, 0.0),
            Position::new(3.0, 4.0),
            Position::new(-12.5, 7.25),
            Position::new(240.0, 160.0),
        ];
        for a in samples {
            assert_eq!(distance(&a, &a), 0.0);
            for b in samples {
                assert_eq!(distance(&a, &b), distance(&b, &a));
            }
        }
        assert_close(distance(&samples[0], &samples[1]), 5.0);
    }

    #[test]
    fn bearing_covers_all_quadrants() {
        let origin = Position::new(10.0, 10.0);
        assert_close(bearing(&origin, &Position::new(20.0, 10.0)), 0.0);
        assert_close(bearing(&origin, &Position::new(10.0, 20.0)), 90.0);
        assert_close(bearing(&origin, &Position::new(0.0, 10.0)), 180.0);
        assert_close(bearing(&origin, &Position::new(10.0, 0.0)), 270.0);
        assert_close(bearing(&origin, &Position::new(20.0, 0.0)), 315.0);
    }

    #[test]
    fn normalize_never_returns_full_turn() {
        assert_eq!(normalize_degrees(-1e-18), 0.0);
        assert_close(normalize_degrees(-90.0), 270.0);
        assert_close(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }

    #[test]
    fn closest_approach_point_sits_on_inflated_boundary_facing_source() {
        let planet = Disc {
            center: Position::new(50.0, 50.0),
            radius: 5.0,
        };
        let ship = Position::new(20.0, 50.0);
        let point = closest_approach_point(&planet, &ship, 3.0);

        assert_close(point.x, 42.0);
        assert_close(point.y, 50.0);
        assert_close(distance(&planet, &point), 8.0);
    }

    #[test]
    fn closest_approach_point_for_coincident_source_is_well_defined() {
        let planet = Disc {
            center: Position::new(5.0, 5.0),
            radius: 2.0,
        };
        let point = closest_approach_point(&planet, &planet.center, 1.0);
        assert_close(point.x, 8.0);
        assert_close(point.y, 5.0);
    }

    #[test]
    fn surface_distance_subtracts_both_radii() {
        let a = Disc {
            center: Position::new(0.0, 0.0),
            radius: 1.0,
        };
        let b = Disc {
            center: Position::new(10.0, 0.0),
            radius: 2.5,
        };
        assert_close(surface_distance(&a, &b), 6.5);
    }
}

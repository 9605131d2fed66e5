use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Radius and `atan2` angle of an offset from the disc centre. `phi` lies in `(-PI, PI]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarPoint {
    pub r: f64,
    pub phi: f64,
}

pub fn to_polar(x: f64, y: f64) -> PolarPoint {
    PolarPoint {
        r: x.hypot(y),
        phi: y.atan2(x),
    }
}

pub fn to_cartesian(r: f64, phi: f64) -> Point {
    Point::new(r * phi.cos(), r * phi.sin())
}

/// Maps an angle to a hue. The phase is shifted by half a turn: angle 0 (positive x axis)
/// is hue 180, and the negative x axis is hue 0. The rasterized wheel and the handle placement
/// both depend on this, so it must not be "fixed".
pub fn angle_to_hue_degrees(phi: f64) -> f64 {
    ((phi + PI) / (2.0 * PI)) * 360.0
}

/// Plain degree to radian conversion. Callers placing a point from a hue subtract 180 first
/// to invert [`angle_to_hue_degrees`].
pub fn hue_degrees_to_angle(hue: f64) -> f64 {
    hue * (PI / 180.0)
}

/// Wraps any hue into `[0, 360)`.
pub fn wrap_hue(hue: f64) -> f64 {
    let mut wrapped = hue % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // -1e-14 + 360.0 rounds to 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_polar_round_trip() {
        let radius = 150.0;
        for ix in -15..=15 {
            for iy in -15..=15 {
                let (x, y) = (ix as f64 * 10.0, iy as f64 * 10.0);
                if x * x + y * y > radius * radius {
                    continue;
                }
                let polar = to_polar(x, y);
                let back = to_cartesian(polar.r, polar.phi);
                assert!((back.x - x).abs() < EPS, "x mismatch at ({x}, {y})");
                assert!((back.y - y).abs() < EPS, "y mismatch at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_origin_is_total() {
        let polar = to_polar(0.0, 0.0);
        assert_eq!(polar.r, 0.0);
        assert_eq!(polar.phi, 0.0);
        assert!((angle_to_hue_degrees(polar.phi) - 180.0).abs() < EPS);
    }

    #[test]
    fn test_hue_phase_shift() {
        assert!((angle_to_hue_degrees(0.0) - 180.0).abs() < EPS);
        assert!(angle_to_hue_degrees(-PI).abs() < EPS);
        assert!((angle_to_hue_degrees(PI / 2.0) - 270.0).abs() < EPS);
        assert!((angle_to_hue_degrees(-PI / 2.0) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_hue_to_angle_inverts_shift() {
        for hue in [0.0, 45.0, 180.0, 270.5, 359.0] {
            let phi = hue_degrees_to_angle(hue - 180.0);
            assert!((angle_to_hue_degrees(phi) - hue).abs() < EPS);
        }
    }

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(380.0), 20.0);
        assert_eq!(wrap_hue(-30.0), 330.0);
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(720.0), 0.0);
        assert_eq!(wrap_hue(-1e-14), 0.0);
        assert_eq!(wrap_hue(123.5), 123.5);
    }
}

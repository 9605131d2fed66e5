use crate::color::Hsv;
use crate::coords::{
    Point, angle_to_hue_degrees, hue_degrees_to_angle, to_cartesian, to_polar, wrap_hue,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("Disc radius must be a positive finite number, got {0}")]
    InvalidRadius(f64),
}

/// Geometry of the wheel. Disc offsets are relative to the centre; pixel coordinates have
/// their origin at the top-left corner, so a pixel is its offset plus `(radius, radius)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscFrame {
    radius: f64,
}

impl DiscFrame {
    pub fn new(radius: f64) -> Result<Self, FrameError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(FrameError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center(&self) -> Point {
        Point::new(self.radius, self.radius)
    }

    /// Side length of the square bitmap covering the disc.
    pub fn pixel_size(&self) -> u32 {
        ((2.0 * self.radius).round() as u32).max(1)
    }

    pub fn offset_of(&self, pixel: Point) -> Point {
        pixel - self.center()
    }

    pub fn pixel_of(&self, offset: Point) -> Point {
        offset + self.center()
    }

    pub fn contains(&self, pixel: Point) -> bool {
        let offset = self.offset_of(pixel);
        to_polar(offset.x, offset.y).r <= self.radius
    }

    /// Pulls a pixel-space point back onto the disc. Only the radial component is limited;
    /// the angle is kept as is.
    pub fn clamp(&self, pixel: Point) -> Point {
        let offset = self.offset_of(pixel);
        let polar = to_polar(offset.x, offset.y);
        if polar.r <= self.radius {
            return pixel;
        }
        self.pixel_of(to_cartesian(self.radius, polar.phi))
    }

    /// Colour shown at `pixel`: hue from the angle, saturation from the distance to the centre.
    /// Saturation is capped at 1 so points on the rim never read as oversaturated.
    pub fn hsv_at(&self, pixel: Point, value: f64) -> Hsv {
        let offset = self.offset_of(pixel);
        let polar = to_polar(offset.x, offset.y);
        Hsv::new(
            wrap_hue(angle_to_hue_degrees(polar.phi)),
            (polar.r / self.radius).min(1.0),
            value,
        )
    }

    /// Pixel-space position of a hue and saturation, the inverse of [`DiscFrame::hsv_at`].
    pub fn position_for(&self, hue: f64, saturation: f64) -> Point {
        let phi = hue_degrees_to_angle(hue - 180.0);
        self.pixel_of(to_cartesian(self.radius * saturation, phi))
    }
}

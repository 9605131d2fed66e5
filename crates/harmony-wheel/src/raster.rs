//! Hue/saturation field of the disc as an RGBA bitmap.
//!
//! The field never changes for a given frame size, so callers render it once per resize
//! (see [`RasterCache`]) and treat it as read-only afterwards.

use crate::coords::{Point, angle_to_hue_degrees, to_polar};
use crate::color::hsv_to_rgb;
use crate::frame::DiscFrame;

const BYTES_PER_PIXEL: usize = 4;
const OPAQUE: u8 = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, straight alpha. Pixels outside the disc stay fully transparent.
    pub data: Vec<u8>,
}

impl DiscImage {
    fn blank(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            data: vec![0; buffer_len(size)],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.data.get(i..i + BYTES_PER_PIXEL)?.try_into().ok()
    }
}

fn buffer_len(size: u32) -> usize {
    size as usize * size as usize * BYTES_PER_PIXEL
}

pub fn rasterize(frame: &DiscFrame) -> DiscImage {
    let mut image = DiscImage::blank(frame.pixel_size());
    rasterize_into(frame, &mut image.data);
    image
}

/// Paints the disc into an existing RGBA buffer of `pixel_size()²` pixels.
///
/// A buffer of any other length means the drawing surface isn't ready; nothing is written
/// and `false` is returned. Pixels farther than the radius from the centre are skipped.
pub fn rasterize_into(frame: &DiscFrame, data: &mut [u8]) -> bool {
    let size = frame.pixel_size();
    if data.len() != buffer_len(size) {
        log::warn!(
            "Skipping disc rasterization: buffer holds {} bytes, expected {}",
            data.len(),
            buffer_len(size)
        );
        return false;
    }

    let radius = frame.radius();
    let row_length = size as usize;

    for py in 0..size {
        for px in 0..size {
            let offset = frame.offset_of(Point::new(px as f64, py as f64));
            let polar = to_polar(offset.x, offset.y);

            if polar.r > radius {
                continue;
            }

            let hue = angle_to_hue_degrees(polar.phi);
            let saturation = polar.r / radius;
            let [r, g, b] = hsv_to_rgb(hue, saturation, 1.0).map(to_byte);

            let i = (px as usize + py as usize * row_length) * BYTES_PER_PIXEL;
            data[i..i + BYTES_PER_PIXEL].copy_from_slice(&[r, g, b, OPAQUE]);
        }
    }
    true
}

fn to_byte(channel: f64) -> u8 {
    channel.round().clamp(0.0, 255.0) as u8
}

/// Holds the last rendered disc and only re-renders when the frame radius changes.
#[derive(Debug, Default)]
pub struct RasterCache {
    image: Option<DiscImage>,
    radius: f64,
    renders: usize,
}

impl RasterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, frame: &DiscFrame) -> &DiscImage {
        // two radii can round to the same bitmap size but still place the centre differently
        if self.image.is_none() || self.radius != frame.radius() {
            let size = frame.pixel_size();
            log::debug!("Rasterizing {size}x{size} disc for radius {}", frame.radius());
            self.renders += 1;
            self.radius = frame.radius();
            self.image = Some(rasterize(frame));
        }
        self.image.get_or_insert_with(|| rasterize(frame))
    }

    pub fn invalidate(&mut self) {
        self.image = None;
    }

    /// How many times the disc has been rendered.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_dimensions() {
        let frame = DiscFrame::new(50.0).unwrap();
        let image = rasterize(&frame);
        assert_eq!((image.width, image.height), (100, 100));
        assert_eq!(image.data.len(), 100 * 100 * 4);
    }

    #[test]
    fn test_center_pixel_is_white() {
        let frame = DiscFrame::new(50.0).unwrap();
        let image = rasterize(&frame);
        assert_eq!(image.pixel(50, 50), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_rim_pixel_is_saturated() {
        let frame = DiscFrame::new(50.0).unwrap();
        let image = rasterize(&frame);
        // offset (49, 0): angle 0 maps to hue 180 (cyan), saturation 0.98
        let [r, g, b, a] = image.pixel(99, 50).unwrap();
        assert_eq!((g, b, a), (255, 255, 255));
        assert!(r <= 6, "red channel {r} should be near zero");
    }

    #[test]
    fn test_left_edge_is_red() {
        let frame = DiscFrame::new(50.0).unwrap();
        let image = rasterize(&frame);
        // offset (-50, 0) sits exactly on the rim, at hue 0 or 360
        assert_eq!(image.pixel(0, 50), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_outside_pixels_untouched() {
        let frame = DiscFrame::new(50.0).unwrap();
        let mut data = vec![7u8; 100 * 100 * 4];
        assert!(rasterize_into(&frame, &mut data));
        // top-left corner is ~70.7 px from the centre
        assert_eq!(&data[0..4], &[7, 7, 7, 7]);
        let last = data.len() - 4;
        assert_eq!(&data[last..], &[7, 7, 7, 7]);
    }

    #[test]
    fn test_wrong_buffer_is_noop() {
        let frame = DiscFrame::new(50.0).unwrap();
        let mut data = vec![1u8; 16];
        assert!(!rasterize_into(&frame, &mut data));
        assert!(data.iter().all(|&b| b == 1));
    }

    #[test]
    fn test_cache_renders_once_per_size() {
        let small = DiscFrame::new(10.0).unwrap();
        let large = DiscFrame::new(20.0).unwrap();
        let mut cache = RasterCache::new();

        cache.get(&small);
        cache.get(&small);
        assert_eq!(cache.renders(), 1);

        assert_eq!(cache.get(&large).width, 40);
        cache.get(&large);
        assert_eq!(cache.renders(), 2);
    }

    #[test]
    fn test_cache_tracks_radius_not_size() {
        let before = DiscFrame::new(50.0).unwrap();
        let after = DiscFrame::new(50.2).unwrap();
        assert_eq!(before.pixel_size(), after.pixel_size());

        let mut cache = RasterCache::new();
        cache.get(&before);
        assert_eq!(cache.get(&after), &rasterize(&after));
        assert_eq!(cache.renders(), 2);
    }

    #[test]
    fn test_invalidate_forces_render() {
        let frame = DiscFrame::new(10.0).unwrap();
        let mut cache = RasterCache::new();
        cache.get(&frame);
        cache.invalidate();
        cache.get(&frame);
        assert_eq!(cache.renders(), 2);
    }
}

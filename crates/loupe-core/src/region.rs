//! Captured pixel region buffer.

use crate::{CaptureError, CaptureResult, PixelColor, ScreenPoint};
use serde::{Deserialize, Serialize};

/// A rectangular block of screen pixels captured around a center point.
///
/// The origin is the top-left corner of the captured block in virtual-screen
/// coordinates: center minus half the dimensions, truncating toward the
/// lower coordinate on odd dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionBuffer {
    width: u32,
    height: u32,
    origin: ScreenPoint,
    pixels: Vec<PixelColor>,
}

impl RegionBuffer {
    /// Allocate a transparent buffer for a capture centered at `center`.
    ///
    /// This is also what a capture the OS quietly refused looks like: full
    /// size, no content. Fails only when either dimension is zero.
    pub fn blank(center: ScreenPoint, width: u32, height: u32) -> CaptureResult<Self> {
        if width == 0 || height == 0 {
            return Err(CaptureError::InvalidDimension { width, height });
        }

        Ok(Self {
            width,
            height,
            origin: region_origin(center, width, height),
            pixels: vec![PixelColor::TRANSPARENT; (width * height) as usize],
        })
    }

    /// Build a buffer from top-down 32bpp BGRA bytes, the layout a
    /// compatible bitmap reads back as. Short input leaves the tail
    /// transparent rather than failing.
    pub fn from_bgra(
        center: ScreenPoint,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> CaptureResult<Self> {
        let mut region = Self::blank(center, width, height)?;

        for (i, px) in region.pixels.iter_mut().enumerate() {
            let at = i * 4;
            if at + 3 >= data.len() {
                break;
            }
            // A block transfer leaves the alpha byte zeroed; the desktop is
            // opaque, so report it that way.
            *px = PixelColor::new(255, data[at + 2], data[at + 1], data[at]);
        }

        Ok(region)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Top-left corner of the capture in virtual-screen coordinates.
    pub fn origin(&self) -> ScreenPoint {
        self.origin
    }

    /// Pixel at buffer-local (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PixelColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Set the pixel at buffer-local (x, y). Out-of-bounds writes are
    /// ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: PixelColor) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(y * self.width + x) as usize] = color;
    }

    pub fn pixels(&self) -> &[PixelColor] {
        &self.pixels
    }

    /// Flatten to row-major RGBA8 bytes for image encoding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect()
    }
}

/// Top-left corner of a width x height capture centered at `center`.
fn region_origin(center: ScreenPoint, width: u32, height: u32) -> ScreenPoint {
    ScreenPoint::new(center.x - (width as i32) / 2, center.y - (height as i32) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_has_requested_size() {
        let region = RegionBuffer::blank(ScreenPoint::new(0, 0), 16, 16).unwrap();
        assert_eq!(region.width(), 16);
        assert_eq!(region.height(), 16);
        assert_eq!(region.pixels().len(), 256);
        assert!(region.pixels().iter().all(|p| *p == PixelColor::TRANSPARENT));
    }

    #[test]
    fn test_origin_is_center_minus_half_size() {
        let region = RegionBuffer::blank(ScreenPoint::new(100, 50), 16, 16).unwrap();
        assert_eq!(region.origin(), ScreenPoint::new(92, 42));
    }

    #[test]
    fn test_origin_truncates_on_odd_dimensions() {
        let region = RegionBuffer::blank(ScreenPoint::new(10, 10), 5, 5).unwrap();
        assert_eq!(region.origin(), ScreenPoint::new(8, 8));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert!(matches!(
            RegionBuffer::blank(ScreenPoint::ZERO, 0, 16),
            Err(CaptureError::InvalidDimension { width: 0, height: 16 })
        ));
        assert!(RegionBuffer::blank(ScreenPoint::ZERO, 16, 0).is_err());
    }

    #[test]
    fn test_from_bgra_channel_order() {
        // One pixel: B=0x10, G=0x20, R=0x30, zeroed alpha byte.
        let region =
            RegionBuffer::from_bgra(ScreenPoint::ZERO, 1, 1, &[0x10, 0x20, 0x30, 0x00]).unwrap();
        assert_eq!(region.pixel(0, 0), Some(PixelColor::new(255, 0x30, 0x20, 0x10)));
    }

    #[test]
    fn test_from_bgra_short_input_leaves_tail_transparent() {
        let region =
            RegionBuffer::from_bgra(ScreenPoint::ZERO, 2, 1, &[1, 2, 3, 0]).unwrap();
        assert_eq!(region.pixel(0, 0), Some(PixelColor::new(255, 3, 2, 1)));
        assert_eq!(region.pixel(1, 0), Some(PixelColor::TRANSPARENT));
    }

    #[test]
    fn test_pixel_access_is_bounds_checked() {
        let mut region = RegionBuffer::blank(ScreenPoint::ZERO, 4, 4).unwrap();
        assert_eq!(region.pixel(4, 0), None);
        assert_eq!(region.pixel(0, 4), None);

        region.set_pixel(5, 5, PixelColor::WHITE);
        assert!(region.pixels().iter().all(|p| *p == PixelColor::TRANSPARENT));

        region.set_pixel(1, 2, PixelColor::WHITE);
        assert_eq!(region.pixel(1, 2), Some(PixelColor::WHITE));
    }
}

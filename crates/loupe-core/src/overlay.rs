//! Center crosshair marker.

use crate::{CaptureError, CaptureResult, PixelColor, RegionBuffer};

/// Mark the geometric center of `region` with a fixed 2x2 two-tone block:
/// white on the falling diagonal, black on the rising one. The contrast pair
/// keeps the marker visible whatever the underlying pixels are.
///
/// Fails with `InvalidDimension` for regions smaller than 2x2, where the
/// center block does not exist.
pub fn draw_center_marker(region: &mut RegionBuffer) -> CaptureResult<()> {
    let (w, h) = (region.width(), region.height());
    if w < 2 || h < 2 {
        return Err(CaptureError::InvalidDimension { width: w, height: h });
    }

    let (cx, cy) = (w / 2, h / 2);
    region.set_pixel(cx - 1, cy - 1, PixelColor::WHITE);
    region.set_pixel(cx, cy, PixelColor::WHITE);
    region.set_pixel(cx, cy - 1, PixelColor::BLACK);
    region.set_pixel(cx - 1, cy, PixelColor::BLACK);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScreenPoint;

    #[test]
    fn test_marker_changes_exactly_four_center_pixels() {
        let fill = PixelColor::new(255, 10, 20, 30);
        let mut region = RegionBuffer::blank(ScreenPoint::ZERO, 16, 16).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                region.set_pixel(x, y, fill);
            }
        }

        draw_center_marker(&mut region).unwrap();

        for y in 0..16 {
            for x in 0..16 {
                let px = region.pixel(x, y).unwrap();
                match (x, y) {
                    (7, 7) | (8, 8) => assert_eq!(px, PixelColor::WHITE),
                    (8, 7) | (7, 8) => assert_eq!(px, PixelColor::BLACK),
                    _ => assert_eq!(px, fill, "pixel ({x}, {y}) should be untouched"),
                }
            }
        }
    }

    #[test]
    fn test_marker_fills_a_2x2_region_entirely() {
        let mut region = RegionBuffer::blank(ScreenPoint::ZERO, 2, 2).unwrap();
        draw_center_marker(&mut region).unwrap();

        assert_eq!(region.pixel(0, 0), Some(PixelColor::WHITE));
        assert_eq!(region.pixel(1, 1), Some(PixelColor::WHITE));
        assert_eq!(region.pixel(1, 0), Some(PixelColor::BLACK));
        assert_eq!(region.pixel(0, 1), Some(PixelColor::BLACK));
    }

    #[test]
    fn test_marker_rejects_regions_smaller_than_2x2() {
        let mut region = RegionBuffer::blank(ScreenPoint::ZERO, 1, 1).unwrap();
        assert!(matches!(
            draw_center_marker(&mut region),
            Err(CaptureError::InvalidDimension { width: 1, height: 1 })
        ));

        let mut region = RegionBuffer::blank(ScreenPoint::ZERO, 16, 1).unwrap();
        assert!(draw_center_marker(&mut region).is_err());
    }
}

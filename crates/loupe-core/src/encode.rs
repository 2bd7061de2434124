//! PNG encoding of the preview region.

use crate::{CaptureError, CaptureResult, RegionBuffer};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Encode the region as PNG bytes for display.
pub fn encode_png(region: &RegionBuffer) -> CaptureResult<Vec<u8>> {
    let img = RgbaImage::from_raw(region.width(), region.height(), region.to_rgba8())
        .ok_or_else(|| CaptureError::Encoding("pixel data does not match dimensions".into()))?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| CaptureError::Encoding(e.to_string()))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PixelColor, ScreenPoint};

    #[test]
    fn test_encodes_region_to_png() {
        let mut region = RegionBuffer::blank(ScreenPoint::ZERO, 16, 16).unwrap();
        region.set_pixel(3, 5, PixelColor::new(255, 200, 100, 50));

        let bytes = encode_png(&region).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
    }
}

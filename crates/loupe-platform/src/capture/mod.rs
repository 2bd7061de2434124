//! Desktop screen access.
//!
//! Platform implementations:
//! - Windows: GDI block transfer from the desktop window DC (`windows.rs`)
//! - elsewhere: stub returning `SurfaceAcquisition` for every call

use loupe_core::{CaptureResult, PixelColor, RegionBuffer, ScreenPoint, ScreenSource};

#[cfg(windows)]
mod windows;

/// Screen source backed by the OS desktop surface.
///
/// Stateless: every call opens and closes its own drawing handles, so a
/// single value can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopScreenSource;

impl DesktopScreenSource {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenSource for DesktopScreenSource {
    fn cursor_position(&self) -> CaptureResult<ScreenPoint> {
        #[cfg(windows)]
        {
            windows::cursor_position()
        }
        #[cfg(not(windows))]
        {
            unsupported()
        }
    }

    fn sample_point(&self, point: ScreenPoint) -> CaptureResult<PixelColor> {
        #[cfg(windows)]
        {
            windows::sample_point(point)
        }
        #[cfg(not(windows))]
        {
            let _ = point;
            unsupported()
        }
    }

    fn capture_region(
        &self,
        center: ScreenPoint,
        width: u32,
        height: u32,
    ) -> CaptureResult<RegionBuffer> {
        #[cfg(windows)]
        {
            windows::capture_region(center, width, height)
        }
        #[cfg(not(windows))]
        {
            let _ = (center, width, height);
            unsupported()
        }
    }
}

#[cfg(not(windows))]
fn unsupported<T>() -> CaptureResult<T> {
    Err(loupe_core::CaptureError::SurfaceAcquisition(
        "screen capture is not supported on this platform".into(),
    ))
}

//! Seam between the sampling loop and platform screen access.

use crate::{CaptureResult, PixelColor, RegionBuffer, ScreenPoint};

/// Platform access to the cursor and the desktop drawing surface
/// (implemented by loupe-platform, mocked in tests).
///
/// Every call is self-contained: implementations acquire and release their
/// own OS drawing handles within the call, on success and on error alike.
/// Nothing is cached between calls, so a poll loop running at 10 Hz for
/// arbitrarily long cannot exhaust handles.
pub trait ScreenSource: Send + Sync {
    /// Current cursor position in virtual-screen coordinates.
    fn cursor_position(&self) -> CaptureResult<ScreenPoint>;

    /// Color of the single pixel at `point`.
    fn sample_point(&self, point: ScreenPoint) -> CaptureResult<PixelColor>;

    /// A `width` x `height` block centered at `center`. A copy the OS
    /// quietly refuses still yields a blank buffer of the requested size;
    /// only a denied drawing handle is an error.
    fn capture_region(
        &self,
        center: ScreenPoint,
        width: u32,
        height: u32,
    ) -> CaptureResult<RegionBuffer>;
}

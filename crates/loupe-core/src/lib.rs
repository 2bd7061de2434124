//! loupe-core: screen sampling domain, UI-agnostic and platform-agnostic.
//!
//! This crate provides:
//! - The sample data model (points, pixel colors, capture regions)
//! - The crosshair overlay stamped onto captured regions
//! - PNG encoding of the preview image
//! - The sampling loop (state machine + worker thread) that polls the
//!   cursor and publishes one atomic [`Sample`] per tick
//!
//! Platform-specific screen access (cursor query, block transfer from the
//! desktop surface) lives behind the [`ScreenSource`] trait and is
//! implemented by `loupe-platform`.
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `color` - ARGB pixel color with hex formatting
//! - `region` - Captured pixel region buffer
//! - `overlay` - Center crosshair marker
//! - `encode` - PNG encoding of a region
//! - `source` - The platform screen-access seam
//! - `sampler` - Poll loop, commands, events

mod color;
mod encode;
mod error;
mod overlay;
mod region;
mod sampler;
mod source;

pub use color::PixelColor;
pub use encode::encode_png;
pub use error::{CaptureError, CaptureResult};
pub use overlay::draw_center_marker;
pub use region::RegionBuffer;
pub use sampler::{
    sample_once, Sampler, SamplerCommand, SamplerConfig, SamplerEvent, SamplerHandle, SamplerState,
};
pub use source::ScreenSource;

use serde::{Deserialize, Serialize};

/// A point in virtual-screen coordinates (origin top-left, y increasing
/// downward, spanning all connected displays).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const ZERO: ScreenPoint = ScreenPoint { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point expressed relative to `origin`.
    pub fn relative_to(&self, origin: ScreenPoint) -> ScreenPoint {
        ScreenPoint {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

/// One poll tick's combined result, published whole to subscribers.
///
/// Subscribers derive everything they display (hex string, channel values,
/// swatch color) from the fields here rather than receiving them as
/// separate notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Cursor position in virtual-screen coordinates.
    pub position: ScreenPoint,
    /// Cursor position minus the current origin offset.
    pub relative: ScreenPoint,
    /// Color of the pixel under the cursor.
    pub color: PixelColor,
    /// PNG-encoded preview of the overlayed capture region.
    /// `None` when the overlay or the encoder failed for this tick;
    /// position and color are still valid.
    pub image: Option<Vec<u8>>,
}

//! Common error types for loupe-core.

use thiserror::Error;

/// Errors from screen capture and preview generation.
///
/// None of these is fatal to the sampling loop: a failed tick is logged,
/// skipped, and retried on the next firing.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The OS denied a drawing handle; the whole tick is skipped.
    #[error("surface acquisition failed: {0}")]
    SurfaceAcquisition(String),
    /// A capture or overlay was requested with unusable dimensions.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },
    /// The region could not be encoded to a displayable image; only the
    /// preview is dropped for the tick.
    #[error("preview encoding failed: {0}")]
    Encoding(String),
}

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

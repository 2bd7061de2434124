//! loupe-platform: platform-specific screen access for loupe.
//!
//! Provides [`DesktopScreenSource`], the `ScreenSource` implementation
//! backed by the OS desktop surface:
//! - Windows: GDI block transfer (`capture/windows.rs`)
//! - elsewhere: a stub that fails every capture, so the sampling loop
//!   keeps running and skips ticks

mod capture;

pub use capture::DesktopScreenSource;

//! Windows implementation of desktop screen access using GDI.
//!
//! Every handle pair (window DC, memory DC, compatible bitmap, selected
//! object) is wrapped in a guard that releases on drop, so error returns
//! anywhere in a capture cannot leak GDI resources.

use loupe_core::{CaptureError, CaptureResult, PixelColor, RegionBuffer, ScreenPoint};
use std::mem;
use windows_sys::Win32::Foundation::{HWND, POINT};
use windows_sys::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDIBits,
    GetWindowDC, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, CAPTUREBLT,
    DIB_RGB_COLORS, HBITMAP, HDC, HGDIOBJ, SRCCOPY,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{GetCursorPos, GetDesktopWindow};

pub fn cursor_position() -> CaptureResult<ScreenPoint> {
    let mut pt = POINT { x: 0, y: 0 };
    let ok = unsafe { GetCursorPos(&mut pt) };
    if ok == 0 {
        return Err(CaptureError::SurfaceAcquisition(
            "GetCursorPos failed".into(),
        ));
    }
    Ok(ScreenPoint::new(pt.x, pt.y))
}

pub fn sample_point(point: ScreenPoint) -> CaptureResult<PixelColor> {
    // Same block-transfer path as capture_region: a fresh 1x1 compatible
    // bitmap per call, all handles released before returning.
    let region = capture_region(point, 1, 1)?;
    Ok(region.pixel(0, 0).unwrap_or_default())
}

pub fn capture_region(center: ScreenPoint, width: u32, height: u32) -> CaptureResult<RegionBuffer> {
    let mut region = RegionBuffer::blank(center, width, height)?;
    let origin = region.origin();

    let desktop = DesktopDc::acquire()?;
    let memory = MemoryDc::compatible(&desktop)?;
    let bitmap = CompatibleBitmap::create(&desktop, width, height)?;

    unsafe {
        {
            let _selected = Selection::select(&memory, &bitmap);
            // A copy the OS refuses (secure desktop, locked session) is not
            // an error: the caller keeps the blank buffer of the requested
            // size. CAPTUREBLT includes layered window content.
            BitBlt(
                memory.hdc,
                0,
                0,
                width as i32,
                height as i32,
                desktop.hdc,
                origin.x,
                origin.y,
                SRCCOPY | CAPTUREBLT,
            );
        }

        // The bitmap must be deselected before GetDIBits reads it back.
        let mut info: BITMAPINFO = mem::zeroed();
        info.bmiHeader.biSize = mem::size_of::<BITMAPINFOHEADER>() as u32;
        info.bmiHeader.biWidth = width as i32;
        info.bmiHeader.biHeight = -(height as i32); // top-down rows
        info.bmiHeader.biPlanes = 1;
        info.bmiHeader.biBitCount = 32;
        info.bmiHeader.biCompression = BI_RGB;

        let mut data = vec![0u8; (width as usize) * (height as usize) * 4];
        let lines = GetDIBits(
            memory.hdc,
            bitmap.hbm,
            0,
            height,
            data.as_mut_ptr() as *mut _,
            &mut info,
            DIB_RGB_COLORS,
        );
        if lines != 0 {
            region = RegionBuffer::from_bgra(center, width, height, &data)?;
        }
    }

    Ok(region)
}

/// Window DC for the whole desktop, spanning the virtual screen.
struct DesktopDc {
    hwnd: HWND,
    hdc: HDC,
}

impl DesktopDc {
    fn acquire() -> CaptureResult<Self> {
        unsafe {
            let hwnd = GetDesktopWindow();
            let hdc = GetWindowDC(hwnd);
            if hdc.is_null() {
                return Err(CaptureError::SurfaceAcquisition(
                    "GetWindowDC returned null for the desktop window".into(),
                ));
            }
            Ok(Self { hwnd, hdc })
        }
    }
}

impl Drop for DesktopDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(self.hwnd, self.hdc);
        }
    }
}

/// Off-screen DC compatible with the desktop surface.
struct MemoryDc {
    hdc: HDC,
}

impl MemoryDc {
    fn compatible(desktop: &DesktopDc) -> CaptureResult<Self> {
        unsafe {
            let hdc = CreateCompatibleDC(desktop.hdc);
            if hdc.is_null() {
                return Err(CaptureError::SurfaceAcquisition(
                    "CreateCompatibleDC failed".into(),
                ));
            }
            Ok(Self { hdc })
        }
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        unsafe {
            DeleteDC(self.hdc);
        }
    }
}

/// Bitmap matching the desktop surface format.
struct CompatibleBitmap {
    hbm: HBITMAP,
}

impl CompatibleBitmap {
    fn create(desktop: &DesktopDc, width: u32, height: u32) -> CaptureResult<Self> {
        unsafe {
            let hbm = CreateCompatibleBitmap(desktop.hdc, width as i32, height as i32);
            if hbm.is_null() {
                return Err(CaptureError::SurfaceAcquisition(
                    "CreateCompatibleBitmap failed".into(),
                ));
            }
            Ok(Self { hbm })
        }
    }
}

impl Drop for CompatibleBitmap {
    fn drop(&mut self) {
        unsafe {
            DeleteObject(self.hbm as HGDIOBJ);
        }
    }
}

/// Object selection into a DC, restoring the previous selection on drop.
struct Selection<'a> {
    dc: &'a MemoryDc,
    old: HGDIOBJ,
}

impl<'a> Selection<'a> {
    fn select(dc: &'a MemoryDc, bitmap: &CompatibleBitmap) -> Self {
        let old = unsafe { SelectObject(dc.hdc, bitmap.hbm as HGDIOBJ) };
        Self { dc, old }
    }
}

impl Drop for Selection<'_> {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc.hdc, self.old);
        }
    }
}

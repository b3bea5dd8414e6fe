//! The linked native engine

use std::ffi::{CStr, CString};

use crate::engine::{Backend, EngineControl, FormatKind};
use crate::error::{EngineStatus, RegistrationStatus};
use crate::ffi;
use crate::geometry::ScanRegion;

/// Handle to the engine linked into this process.
///
/// The engine keeps a single global configuration, so every `NativeEngine`
/// sees the settings applied through any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    /// Wrap the engine in the backend flavour this platform uses.
    pub fn backend() -> Backend {
        #[cfg(windows)]
        {
            Backend::caller_supplied(NativeEngine)
        }
        #[cfg(not(windows))]
        {
            Backend::callee_allocated(NativeEngine)
        }
    }
}

fn input_len(input: &[u8]) -> Option<i32> {
    i32::try_from(input.len()).ok()
}

impl EngineControl for NativeEngine {
    fn register_sdk(&mut self, key: &str) -> i32 {
        let Ok(key) = CString::new(key) else {
            return RegistrationStatus::InvalidKey.code();
        };
        unsafe { ffi::mwb_register_sdk(key.as_ptr()) }
    }

    fn set_active_codes(&mut self, code_mask: u32) -> i32 {
        unsafe { ffi::mwb_set_active_codes(code_mask) }
    }

    fn set_active_subcodes(&mut self, code_mask: u32, subcode_mask: u32) -> i32 {
        unsafe { ffi::mwb_set_active_subcodes(code_mask, subcode_mask) }
    }

    fn set_flags(&mut self, code_mask: u32, flags: u32) -> i32 {
        unsafe { ffi::mwb_set_flags(code_mask, flags) }
    }

    fn set_min_length(&mut self, code_mask: u32, min_length: u32) -> i32 {
        unsafe { ffi::mwb_set_min_length(code_mask, min_length) }
    }

    fn set_param(&mut self, code_mask: u32, param_id: u32, value: u32) -> i32 {
        unsafe { ffi::mwb_set_param(code_mask, param_id, value) }
    }

    fn set_level(&mut self, level: i32) -> i32 {
        unsafe { ffi::mwb_set_level(level) }
    }

    fn set_direction(&mut self, direction: u32) -> i32 {
        unsafe { ffi::mwb_set_direction(direction) }
    }

    fn set_scanning_rect(&mut self, code_mask: u32, rect: ScanRegion) -> i32 {
        unsafe {
            ffi::mwb_set_scanning_rect(
                code_mask,
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
            )
        }
    }

    fn set_result_type(&mut self, result_type: u32) -> i32 {
        unsafe { ffi::mwb_set_result_type(result_type) }
    }

    fn set_duplicates_timeout(&mut self, timeout_ms: u32) -> i32 {
        unsafe { ffi::mwb_set_duplicates_timeout(timeout_ms) }
    }

    fn lib_version_text(&self) -> String {
        let text = unsafe { ffi::mwb_get_lib_version_text() };
        if text.is_null() {
            return String::new();
        }
        // SAFETY: the engine returns a static NUL-terminated string.
        unsafe { CStr::from_ptr(text) }
            .to_string_lossy()
            .into_owned()
    }

    fn create_regions_from_tiles(
        &self,
        tiles_x: i32,
        tiles_y: i32,
        overlap_percent: i32,
        out: &mut [f32],
    ) -> i32 {
        let needed = i64::from(tiles_x) * i64::from(tiles_y) * 4;
        if needed < 0 || (out.len() as i64) < needed {
            return EngineStatus::BAD_PARAM;
        }
        unsafe {
            ffi::mwb_create_regions_from_tiles(tiles_x, tiles_y, overlap_percent, out.as_mut_ptr())
        }
    }
}

#[cfg(windows)]
mod platform {
    use super::*;
    use crate::engine::CallerBufferEngine;

    impl CallerBufferEngine for NativeEngine {
        fn scan_image(&self, pixels: &[u8], width: i32, height: i32, out: &mut [u8]) -> i32 {
            unsafe { ffi::mwb_scan_grayscale_image(pixels.as_ptr(), width, height, out.as_mut_ptr()) }
        }

        fn scan_regions(
            &self,
            pixels: &[u8],
            width: i32,
            height: i32,
            regions: &[f32],
            count: i32,
            max_threads: i32,
            out: &mut [u8],
        ) -> i32 {
            unsafe {
                ffi::mwb_scan_grayscale_regions(
                    pixels.as_ptr(),
                    width,
                    height,
                    regions.as_ptr(),
                    count,
                    max_threads,
                    out.as_mut_ptr(),
                )
            }
        }

        fn format_result(
            &self,
            parser_mask: u32,
            kind: FormatKind,
            input: &[u8],
            out: &mut [u8],
        ) -> i32 {
            let Some(len) = input_len(input) else {
                return EngineStatus::BAD_PARAM;
            };
            let parser = parser_mask as i32;
            let written = unsafe {
                match kind {
                    FormatKind::Json => {
                        ffi::mwp_get_json(parser, input.as_ptr(), len, out.as_mut_ptr())
                    }
                    FormatKind::Text => {
                        ffi::mwp_get_formatted_text(parser, input.as_ptr(), len, out.as_mut_ptr())
                    }
                }
            };
            written as i32
        }
    }
}

#[cfg(not(windows))]
mod platform {
    use std::ptr;

    use super::*;
    use crate::engine::{EngineAllocatedEngine, EngineOutput};

    impl EngineAllocatedEngine for NativeEngine {
        fn scan_image(&self, pixels: &[u8], width: i32, height: i32) -> EngineOutput {
            let mut out = ptr::null_mut();
            let len =
                unsafe { ffi::mwb_scan_grayscale_image(pixels.as_ptr(), width, height, &mut out) };
            EngineOutput { len, ptr: out }
        }

        fn scan_regions(
            &self,
            pixels: &[u8],
            width: i32,
            height: i32,
            regions: &[f32],
            count: i32,
            max_threads: i32,
        ) -> EngineOutput {
            let mut out = ptr::null_mut();
            let len = unsafe {
                ffi::mwb_scan_grayscale_regions(
                    pixels.as_ptr(),
                    width,
                    height,
                    regions.as_ptr(),
                    count,
                    max_threads,
                    &mut out,
                )
            };
            EngineOutput { len, ptr: out }
        }

        fn format_result(&self, parser_mask: u32, kind: FormatKind, input: &[u8]) -> EngineOutput {
            let Some(len) = input_len(input) else {
                return EngineOutput::null(EngineStatus::BAD_PARAM);
            };
            let parser = parser_mask as i32;
            let mut out = ptr::null_mut();
            let written = unsafe {
                match kind {
                    FormatKind::Json => ffi::mwp_get_json(parser, input.as_ptr(), len, &mut out),
                    FormatKind::Text => {
                        ffi::mwp_get_formatted_text(parser, input.as_ptr(), len, &mut out)
                    }
                }
            };
            EngineOutput {
                len: written as i32,
                ptr: out,
            }
        }

        unsafe fn release(&self, ptr: *mut u8) {
            // The engine allocates with malloc; free(NULL) is a no-op.
            libc::free(ptr.cast());
        }
    }
}

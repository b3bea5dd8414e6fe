//! Engine call surface
//!
//! The scan engine comes in two flavours that differ in who owns the output
//! memory:
//!
//! * [`CallerBufferEngine`] writes into a buffer the host provides and reports
//!   how many bytes it wrote.
//! * [`EngineAllocatedEngine`] allocates the output itself and hands the host
//!   a pointer that must be given back through
//!   [`EngineAllocatedEngine::release`] exactly once.
//!
//! Both share the settings surface in [`EngineControl`]. Only
//! [`crate::Scanner`] calls into these traits.

use std::ptr;
use std::slice;

use crate::geometry::ScanRegion;

/// Settings and queries common to both engine flavours.
///
/// Every setter returns the engine's status code: `0` on success, negative
/// on failure. Settings are global to the loaded engine.
pub trait EngineControl {
    /// Register a license key; returns a registration status code.
    fn register_sdk(&mut self, key: &str) -> i32;
    fn set_active_codes(&mut self, code_mask: u32) -> i32;
    fn set_active_subcodes(&mut self, code_mask: u32, subcode_mask: u32) -> i32;
    /// Per-symbology flags; a `code_mask` of 0 sets the global flags.
    fn set_flags(&mut self, code_mask: u32, flags: u32) -> i32;
    fn set_min_length(&mut self, code_mask: u32, min_length: u32) -> i32;
    fn set_param(&mut self, code_mask: u32, param_id: u32, value: u32) -> i32;
    fn set_level(&mut self, level: i32) -> i32;
    fn set_direction(&mut self, direction: u32) -> i32;
    fn set_scanning_rect(&mut self, code_mask: u32, rect: ScanRegion) -> i32;
    fn set_result_type(&mut self, result_type: u32) -> i32;
    fn set_duplicates_timeout(&mut self, timeout_ms: u32) -> i32;
    fn lib_version_text(&self) -> String;

    /// Fill `out` with `4 * tiles_x * tiles_y` floats describing the tiles;
    /// returns the region count or a negative status.
    fn create_regions_from_tiles(
        &self,
        tiles_x: i32,
        tiles_y: i32,
        overlap_percent: i32,
        out: &mut [f32],
    ) -> i32;
}

/// Output format of the engine's result parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Json,
    Text,
}

/// Engine that writes its output into host-provided memory.
///
/// Each call returns the number of bytes written, or a negative status. A
/// reported length larger than `out` means the engine overran the buffer.
pub trait CallerBufferEngine: EngineControl {
    fn scan_image(&self, pixels: &[u8], width: i32, height: i32, out: &mut [u8]) -> i32;

    /// `regions` holds `4 * count` floats: left, top, width, height per region.
    #[allow(clippy::too_many_arguments)]
    fn scan_regions(
        &self,
        pixels: &[u8],
        width: i32,
        height: i32,
        regions: &[f32],
        count: i32,
        max_threads: i32,
        out: &mut [u8],
    ) -> i32;

    fn format_result(&self, parser_mask: u32, kind: FormatKind, input: &[u8], out: &mut [u8])
        -> i32;
}

/// Result of a call to an [`EngineAllocatedEngine`].
///
/// `len` is the number of bytes at `ptr`, or a negative status. `ptr` may be
/// null and must be released even when `len` is not positive.
#[derive(Debug)]
pub struct EngineOutput {
    pub len: i32,
    pub ptr: *mut u8,
}

impl EngineOutput {
    pub fn null(len: i32) -> Self {
        Self {
            len,
            ptr: ptr::null_mut(),
        }
    }
}

/// Engine that allocates its own output.
pub trait EngineAllocatedEngine: EngineControl {
    fn scan_image(&self, pixels: &[u8], width: i32, height: i32) -> EngineOutput;

    fn scan_regions(
        &self,
        pixels: &[u8],
        width: i32,
        height: i32,
        regions: &[f32],
        count: i32,
        max_threads: i32,
    ) -> EngineOutput;

    fn format_result(&self, parser_mask: u32, kind: FormatKind, input: &[u8]) -> EngineOutput;

    /// Give memory from an [`EngineOutput`] back to the engine.
    ///
    /// # Safety
    /// `ptr` must be null or a pointer returned by this engine that has not
    /// been released yet.
    unsafe fn release(&self, ptr: *mut u8);
}

/// The engine a [`crate::Scanner`] drives, tagged by ownership flavour.
pub enum Backend {
    CallerSupplied(Box<dyn CallerBufferEngine>),
    CalleeAllocated(Box<dyn EngineAllocatedEngine>),
}

impl Backend {
    pub fn caller_supplied(engine: impl CallerBufferEngine + 'static) -> Self {
        Self::CallerSupplied(Box::new(engine))
    }

    pub fn callee_allocated(engine: impl EngineAllocatedEngine + 'static) -> Self {
        Self::CalleeAllocated(Box::new(engine))
    }

    /// The linked native engine, in the flavour of the current platform.
    #[cfg(feature = "native")]
    pub fn native() -> Self {
        crate::native::NativeEngine::backend()
    }

    pub fn is_caller_supplied(&self) -> bool {
        matches!(self, Self::CallerSupplied(_))
    }

    pub fn lib_version_text(&self) -> String {
        match self {
            Self::CallerSupplied(engine) => engine.lib_version_text(),
            Self::CalleeAllocated(engine) => engine.lib_version_text(),
        }
    }

    pub(crate) fn create_regions_from_tiles(
        &self,
        tiles_x: i32,
        tiles_y: i32,
        overlap_percent: i32,
        out: &mut [f32],
    ) -> i32 {
        match self {
            Self::CallerSupplied(engine) => {
                engine.create_regions_from_tiles(tiles_x, tiles_y, overlap_percent, out)
            }
            Self::CalleeAllocated(engine) => {
                engine.create_regions_from_tiles(tiles_x, tiles_y, overlap_percent, out)
            }
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CallerSupplied(_) => f.write_str("Backend::CallerSupplied"),
            Self::CalleeAllocated(_) => f.write_str("Backend::CalleeAllocated"),
        }
    }
}

/// Engine-owned output, released when dropped.
pub(crate) struct EngineAllocation<'e> {
    engine: &'e dyn EngineAllocatedEngine,
    ptr: *mut u8,
    len: usize,
}

impl<'e> EngineAllocation<'e> {
    /// Take charge of an engine output. Negative lengths read as empty.
    ///
    /// # Safety
    /// `output.ptr` must be null or point to at least `output.len` readable
    /// bytes owned by `engine`, and must not be released elsewhere.
    pub(crate) unsafe fn new(engine: &'e dyn EngineAllocatedEngine, output: EngineOutput) -> Self {
        Self {
            engine,
            ptr: output.ptr,
            len: usize::try_from(output.len).unwrap_or(0),
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        if self.ptr.is_null() || self.len == 0 {
            &[]
        } else {
            // SAFETY: guaranteed by the caller of `new`; the memory stays
            // alive until `drop`.
            unsafe { slice::from_raw_parts(self.ptr, self.len) }
        }
    }
}

impl Drop for EngineAllocation<'_> {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `engine` and is released only here.
        unsafe { self.engine.release(self.ptr) };
    }
}

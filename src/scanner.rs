//! Engine invocation

use tracing::debug;

use crate::buffer::{RawResultBuffer, PARSER_BUFFER_CAPACITY, SCAN_BUFFER_CAPACITY};
use crate::config::EngineConfig;
use crate::decoder::decode;
use crate::engine::{
    Backend, CallerBufferEngine, EngineAllocatedEngine, EngineAllocation, EngineOutput, FormatKind,
};
use crate::error::RegistrationStatus;
use crate::geometry::{regions_from_floats, regions_to_floats, validate_tiles, ScanRegion};
use crate::image::Image;
use crate::record::ResultSet;
use crate::{Error, Result};

/// Drives the scan engine and owns everything it hands back.
///
/// # Example
/// ```no_run
/// # #[cfg(feature = "native")]
/// # fn main() -> mwscan::Result<()> {
/// use mwscan::config::*;
/// use mwscan::geometry::tiles_to_regions;
/// use mwscan::{Backend, Image, Scanner};
///
/// let config = EngineConfig::new()
///     .enable(QrCode)
///     .enable(Pdf417)
///     .multi_code(true);
/// let scanner = Scanner::with_config(Backend::native(), &config)?;
///
/// let data = vec![0u8; 640 * 480];
/// let image = Image::from_gray(&data, 640, 480)?;
/// let regions = tiles_to_regions(2, 2, 10)?;
/// let results = scanner.scan_and_decode(&image, Some(&regions[..]), 4)?;
/// for record in &results {
///     println!("{}: {}", record.type_name(), record.display_text());
/// }
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "native"))]
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct Scanner {
    backend: Backend,
    registration: Option<RegistrationStatus>,
}

impl Scanner {
    /// Wrap an engine without touching its settings.
    pub fn new(backend: Backend) -> Self {
        Scanner {
            backend,
            registration: None,
        }
    }

    /// Wrap an engine and apply `config` to it.
    pub fn with_config(backend: Backend, config: &EngineConfig) -> Result<Self> {
        let mut scanner = Self::new(backend);
        scanner.configure(config)?;
        Ok(scanner)
    }

    /// Apply `config` to the engine.
    ///
    /// Takes `&mut self` so no scan on this scanner can run while settings
    /// change. Other scanners over the same native library still share the
    /// engine's global state.
    pub fn configure(&mut self, config: &EngineConfig) -> Result<Option<RegistrationStatus>> {
        let registration = match &mut self.backend {
            Backend::CallerSupplied(engine) => config.apply(engine.as_mut())?,
            Backend::CalleeAllocated(engine) => config.apply(engine.as_mut())?,
        };
        if registration.is_some() {
            self.registration = registration;
        }
        Ok(registration)
    }

    /// Outcome of the last license registration, if any was attempted.
    pub fn registration(&self) -> Option<RegistrationStatus> {
        self.registration
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn engine_version(&self) -> String {
        self.backend.lib_version_text()
    }

    /// Run the engine over the whole image, or over `regions` when given.
    ///
    /// Returns the engine's raw output; an empty buffer means nothing was
    /// found. Negative engine statuses come back as [`Error::Engine`].
    pub fn scan(
        &self,
        image: &Image<'_>,
        regions: Option<&[ScanRegion]>,
        max_threads: u32,
    ) -> Result<RawResultBuffer> {
        if max_threads == 0 {
            return Err(Error::InvalidParameter("max_threads must be at least 1"));
        }
        let max_threads = i32::try_from(max_threads)
            .map_err(|_| Error::InvalidParameter("max_threads too large"))?;
        let (width, height) = image.dimensions_i32();
        let pixels = image.data();

        let buffer = match regions {
            None => match &self.backend {
                Backend::CallerSupplied(engine) => {
                    invoke_with_scratch(SCAN_BUFFER_CAPACITY, |out| {
                        engine.scan_image(pixels, width, height, out)
                    })
                }
                Backend::CalleeAllocated(engine) => invoke_engine_allocated(engine.as_ref(), |e| {
                    e.scan_image(pixels, width, height)
                }),
            },
            Some([]) => return Err(Error::InvalidGeometry("region list is empty")),
            Some(regions) => {
                let count = i32::try_from(regions.len())
                    .map_err(|_| Error::InvalidGeometry("too many regions"))?;
                let floats = regions_to_floats(regions);
                match &self.backend {
                    Backend::CallerSupplied(engine) => {
                        invoke_with_scratch(SCAN_BUFFER_CAPACITY, |out| {
                            engine.scan_regions(
                                pixels,
                                width,
                                height,
                                &floats,
                                count,
                                max_threads,
                                out,
                            )
                        })
                    }
                    Backend::CalleeAllocated(engine) => {
                        invoke_engine_allocated(engine.as_ref(), |e| {
                            e.scan_regions(pixels, width, height, &floats, count, max_threads)
                        })
                    }
                }
            }
        };

        debug!(
            width,
            height,
            regions = regions.map_or(0, <[ScanRegion]>::len),
            max_threads,
            result = ?buffer.as_ref().map(RawResultBuffer::len),
            "scan"
        );
        buffer
    }

    /// [`Scanner::scan`] followed by [`decode`].
    pub fn scan_and_decode(
        &self,
        image: &Image<'_>,
        regions: Option<&[ScanRegion]>,
        max_threads: u32,
    ) -> Result<ResultSet> {
        let buffer = self.scan(image, regions, max_threads)?;
        if buffer.is_empty() {
            return Ok(ResultSet::default());
        }
        Ok(decode(buffer)?)
    }

    /// Ask the engine to tile the image, for comparison with
    /// [`crate::geometry::tiles_to_regions`].
    pub fn engine_regions(
        &self,
        tiles_x: i32,
        tiles_y: i32,
        overlap_percent: i32,
    ) -> Result<Vec<ScanRegion>> {
        validate_tiles(tiles_x, tiles_y, overlap_percent)?;
        // Both positive and their product fits: checked above.
        let tiles = tiles_x as usize * tiles_y as usize;
        let mut floats = vec![0f32; tiles * 4];

        let count =
            self.backend
                .create_regions_from_tiles(tiles_x, tiles_y, overlap_percent, &mut floats);
        debug!(tiles_x, tiles_y, overlap_percent, count, "createRegionsFromTiles");
        if count < 0 {
            return Err(Error::Engine(count));
        }
        let count = count as usize;
        if count > tiles {
            return Err(Error::BufferOverrunFatal {
                len: count * 4,
                capacity: floats.len(),
            });
        }
        Ok(regions_from_floats(&floats[..count * 4]))
    }

    /// Run one of the engine's result parsers over a record's parser input.
    ///
    /// `parser_mask` selects the parser (see [`crate::parser::ParserMask`]).
    pub fn format_parser_input(
        &self,
        parser_mask: u32,
        kind: FormatKind,
        input: &[u8],
    ) -> Result<RawResultBuffer> {
        let buffer = match &self.backend {
            Backend::CallerSupplied(engine) => invoke_with_scratch(PARSER_BUFFER_CAPACITY, |out| {
                engine.format_result(parser_mask, kind, input, out)
            }),
            Backend::CalleeAllocated(engine) => invoke_engine_allocated(engine.as_ref(), |e| {
                e.format_result(parser_mask, kind, input)
            }),
        };
        debug!(
            parser_mask,
            ?kind,
            input = input.len(),
            result = ?buffer.as_ref().map(RawResultBuffer::len),
            "format"
        );
        buffer
    }
}

/// Caller-buffer protocol: hand the engine a zeroed scratch buffer and
/// verify the reported length before trusting any of it.
fn invoke_with_scratch(
    capacity: usize,
    call: impl FnOnce(&mut [u8]) -> i32,
) -> Result<RawResultBuffer> {
    let mut scratch = vec![0u8; capacity];
    let len = call(&mut scratch);
    if len < 0 {
        return Err(Error::Engine(len));
    }
    RawResultBuffer::from_scratch(scratch, len as usize)
}

/// Engine-allocated protocol: the output is released when `allocation`
/// drops, whatever the outcome.
fn invoke_engine_allocated(
    engine: &dyn EngineAllocatedEngine,
    call: impl FnOnce(&dyn EngineAllocatedEngine) -> EngineOutput,
) -> Result<RawResultBuffer> {
    let output = call(engine);
    let status = output.len;
    // SAFETY: `output` was returned by `engine` just now and is owned by no
    // one else.
    let allocation = unsafe { EngineAllocation::new(engine, output) };
    if status < 0 {
        return Err(Error::Engine(status));
    }
    Ok(RawResultBuffer::copy_from(allocation.as_slice()))
}

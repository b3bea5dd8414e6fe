//! Host-side layer over an external barcode scan engine
//!
//! The engine itself is an opaque native library. This crate covers what
//! happens around it:
//!
//! - [`geometry`] splits an image into overlapping scan regions.
//! - [`Scanner`] calls the engine, under either of its buffer ownership
//!   conventions, and hands back an owned [`RawResultBuffer`].
//! - [`decoder`] turns that buffer into a [`ResultSet`] of [`ResultRecord`]s.
//!
//! Engine settings are collected in an [`EngineConfig`] and applied with
//! [`Scanner::with_config`]. The native binding is behind the `native`
//! feature; without it, any type implementing the traits in [`engine`] can
//! stand in for the engine.
//!
//! # Example
//!
//! ```
//! use mwscan::encoder::{RecordWriter, ResultBufferWriter};
//! use mwscan::ResultSet;
//!
//! let bytes = ResultBufferWriter::new(1)
//!     .record(RecordWriter::new().text("HELLO"))
//!     .finish();
//! let results = ResultSet::parse(&bytes).unwrap();
//! assert_eq!(results.records[0].text.as_deref(), Some("HELLO"));
//! ```

pub mod buffer;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod image;
pub mod parser;
pub mod record;
pub mod scanner;
pub mod symbology;

#[cfg(feature = "native")]
mod ffi;
#[cfg(feature = "native")]
pub mod native;

// Re-export main types
pub use buffer::RawResultBuffer;
pub use config::EngineConfig;
pub use decoder::decode;
pub use engine::{Backend, FormatKind};
pub use error::{DecodeError, EngineStatus, Error, RegistrationStatus, Result};
pub use geometry::{tiles_to_regions, ScanRegion};
pub use image::Image;
pub use parser::ParserMask;
pub use record::{Location, PointF, ResultRecord, ResultSet};
pub use scanner::Scanner;
pub use symbology::BarcodeType;

#[cfg(test)]
mod proptest_decode;

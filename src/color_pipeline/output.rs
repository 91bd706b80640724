//! Image output module
//!
//! This module writes rendered sRGB images to TIFF with various compression options.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{OutputConfig, OutputConfigBuilder, TiffCompression};
pub use writer::ImageWriter;

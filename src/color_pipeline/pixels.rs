//! Pixel container module
//!
//! This module provides the demosaiced pixel array and readers that load it
//! from a pixel container.

mod reader;
mod tiff_reader;
pub mod types;

#[cfg(test)]
mod tests;

pub use reader::PixelReader;
pub use tiff_reader::TiffPixelReader;
pub use types::PixelArray;

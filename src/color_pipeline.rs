//! Camera color pipeline module
//!
//! White balance and color correction of demosaiced camera images using
//! DNG dual-illuminant calibration: tag parsing, calibration loading,
//! illuminant interpolation, the camera to sRGB transform and TIFF I/O.

pub mod calibration;
pub mod colorimetry;
pub mod common;
pub mod conversions;
pub mod interpolation;
pub mod metadata;
pub mod output;
pub mod pixels;
pub mod render;
pub mod white_balance;

#[cfg(test)]
pub mod testing;

pub use common::{ProcessingError, Result};

pub use calibration::{CalibrationConfig, CalibrationSet, CameraCalibrationPolicy};

pub use colorimetry::{adaptation_matrix, ChromaticAdaptation, Illuminant};

pub use interpolation::{interpolate, InterpolationResult, Interpolator};

pub use metadata::{TagStore, TagValue};

pub use pixels::{PixelArray, PixelReader, TiffPixelReader};

pub use render::{render, Pipeline, RenderConfig, RenderConfigBuilder};

pub use output::{ImageWriter, OutputConfig, OutputConfigBuilder, StandardTiffWriter, TiffCompression};

pub use white_balance::{DngImage, WhiteBalanceMode};

pub use conversions::DngToSrgbPipeline;

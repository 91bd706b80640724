//! Conversion pipelines module
//!
//! Orchestrates pixel reading, calibration loading, white balance and image
//! writing.

mod dng_to_srgb;


pub use dng_to_srgb::DngToSrgbPipeline;

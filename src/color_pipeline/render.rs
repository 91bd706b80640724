//! Pixel transform engine
//!
//! Maps camera RGB pixels to clipped sRGB (D65) through either the
//! forward-matrix or the color-matrix method of the DNG color model.

mod engine;
pub mod types;


pub use engine::{camera_to_srgb_matrix, render, select_pipeline, transform_pixels};
pub use types::{Pipeline, RenderConfig, RenderConfigBuilder};

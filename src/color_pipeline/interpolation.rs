//! Illuminant interpolation module
//!
//! Finds the blend factor between the two calibration illuminants that is
//! consistent with an observed white point.

mod interpolator;


pub use crate::color_pipeline::calibration::blend;
pub use interpolator::{
    blend_factor, interpolate, normalize_white_point, IlluminantWhitePoint, InterpolationResult,
    Interpolator, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_KELVIN,
};

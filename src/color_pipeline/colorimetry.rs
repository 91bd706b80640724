//! Colorimetry primitives
//!
//! Chromaticity conversions, correlated color temperature estimation, the
//! standard illuminant table, chromatic adaptation and sRGB encoding used by
//! the calibration, interpolation and rendering stages.

mod adaptation;
mod chromaticity;
mod illuminants;
mod srgb;
mod temperature;


pub use adaptation::{adaptation_matrix, adaptation_matrix_with, ChromaticAdaptation};
pub use chromaticity::{xy_to_xyz, xyz_to_xy, WhiteReference};
pub use illuminants::{Illuminant, D50_XY, D65_XY};
pub use srgb::{encode_srgb, xyz_to_linear_srgb_matrix, XYZ_TO_SRGB};
pub use temperature::{cct_to_xy, xy_to_cct};

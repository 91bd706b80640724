//! XYZ to sRGB (D65) conversion.

use nalgebra::Matrix3;

use super::adaptation::{adaptation_matrix_with, ChromaticAdaptation};
use super::chromaticity::WhiteReference;
use super::illuminants::D65_XY;

/// XYZ (D65) to linear sRGB, derived from the sRGB primaries and the
/// D65 white at (0.3127, 0.3290).
#[rustfmt::skip]
pub const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [ 3.2409699, -1.5373832, -0.4986108],
    [-0.9692436,  1.8759675,  0.0415551],
    [ 0.0556301, -0.2039770,  1.0569715],
];

fn xyz_to_srgb() -> Matrix3<f64> {
    Matrix3::from_fn(|r, c| XYZ_TO_SRGB[r][c])
}

/// Linear map from XYZ referred to `source_white` into linear sRGB,
/// adapting the white to D65 with `method`.
pub fn xyz_to_linear_srgb_matrix(
    source_white: impl Into<WhiteReference>,
    method: ChromaticAdaptation,
) -> Matrix3<f64> {
    let cat = adaptation_matrix_with(method, source_white, D65_XY);
    xyz_to_srgb() * cat
}

/// sRGB transfer function (inverse EOTF). Negative values keep their sign.
pub fn encode_srgb(linear: f32) -> f32 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

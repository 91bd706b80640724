//! Shared fixtures for unit tests.

use nalgebra::Matrix3;

use crate::color_pipeline::metadata::TagStore;
use crate::color_pipeline::pixels::PixelArray;

/// XYZ -> camera under D65, modelled on a full-frame DSLR profile
pub const CM_D65: [f64; 9] = [
    0.4716, 0.0603, -0.0830, -0.7798, 1.5474, 0.2480, -0.1496, 0.1937, 0.6651,
];

/// XYZ -> camera under standard light A
pub const CM_A: [f64; 9] = [
    0.5309, -0.0229, -0.0336, -0.6241, 1.3265, 0.3337, -0.0817, 0.1215, 0.6664,
];

pub const FM_D65: [f64; 9] = [
    0.7763, 0.0065, 0.1815, 0.2393, 0.9474, -0.1867, -0.0078, -0.3220, 1.1550,
];

pub const FM_A: [f64; 9] = [
    0.8924, -0.1041, 0.1760, 0.4351, 0.6621, -0.0972, 0.0505, -0.1562, 0.9308,
];

/// Color matrices scaled so that a unit camera neutral sits between the
/// two calibration illuminants.
pub const UNIT_NEUTRAL_CM_1: [f64; 9] = [
    1.0679, 0.1365, -0.188, -0.7701, 1.5282, 0.2449, -0.2396, 0.3102, 1.0652,
];

pub const UNIT_NEUTRAL_CM_2: [f64; 9] = [
    1.0934, -0.0472, -0.0692, -0.6873, 1.4608, 0.3675, -0.1831, 0.2723, 1.4933,
];

pub const CAMERA_CALIBRATION: [f64; 3] = [1.0123, 1.0, 0.9871];

pub fn matrix(values: [f64; 9]) -> Matrix3<f64> {
    Matrix3::from_row_slice(&values)
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tags of a D65 / A calibrated camera, optionally with forward matrices.
pub fn camera_tags(with_forward_matrices: bool) -> TagStore {
    let mut tags = TagStore::new();
    tags.insert("UniqueCameraModel", "Canon EOS 5D Mark II");
    tags.insert("ColorMatrix1", join(&CM_D65));
    tags.insert("ColorMatrix2", join(&CM_A));
    tags.insert("CameraCalibration1", join(&CAMERA_CALIBRATION));
    tags.insert("CameraCalibration2", join(&CAMERA_CALIBRATION));
    tags.insert("CalibrationIlluminant1", "21");
    tags.insert("CalibrationIlluminant2", "17");
    tags.insert("AsShotNeutral", "[0.4738, 1.0, 0.6397]");
    if with_forward_matrices {
        tags.insert("ForwardMatrix1", join(&FM_D65));
        tags.insert("ForwardMatrix2", join(&FM_A));
    }
    tags
}

/// D65 / A calibration whose as-shot neutral is `[1, 1, 1]`.
pub fn unit_neutral_tags() -> TagStore {
    let mut tags = camera_tags(false);
    tags.insert("ColorMatrix1", join(&UNIT_NEUTRAL_CM_1));
    tags.insert("ColorMatrix2", join(&UNIT_NEUTRAL_CM_2));
    tags.insert("AsShotNeutral", "[1.0, 1.0, 1.0]");
    tags
}

/// Pixels covering negative, in-range and over-range values.
pub fn stress_pixels(width: usize, height: usize) -> PixelArray {
    let data = (0..width * height * 3)
        .map(|i| ((i * 37) % 101) as f32 / 25.0 - 1.0)
        .collect();
    PixelArray::new(width, height, data).unwrap()
}

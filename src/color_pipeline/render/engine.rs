//! Camera RGB to sRGB transform.
//!
//! Both methods reduce to a single 3x3 matrix from camera RGB to linear
//! sRGB, applied per pixel and followed by optional sRGB encoding and
//! clipping to [0, 1].

use nalgebra::{Matrix3, Vector3};
use tracing::{debug, instrument};

use crate::color_pipeline::calibration::CalibrationSet;
use crate::color_pipeline::colorimetry::{
    encode_srgb, xyz_to_linear_srgb_matrix, xyz_to_xy, ChromaticAdaptation, D50_XY,
};
use crate::color_pipeline::common::error::{ProcessingError, Result};
use crate::color_pipeline::interpolation::normalize_white_point;
use crate::color_pipeline::pixels::PixelArray;
use crate::color_pipeline::render::types::Pipeline;

/// Forward-matrix method when both forward matrices are present.
pub fn select_pipeline(calibration: &CalibrationSet) -> Pipeline {
    if calibration.has_forward_matrices() {
        Pipeline::ForwardMatrix
    } else {
        Pipeline::ColorMatrix
    }
}

/// Builds the camera RGB -> linear sRGB (D65) matrix for a white point in
/// reference camera space and a blend factor.
pub fn camera_to_srgb_matrix(
    white_point: &Vector3<f64>,
    alpha: f64,
    calibration: &CalibrationSet,
) -> Result<(Pipeline, Matrix3<f64>)> {
    let white_point = normalize_white_point(white_point)?;
    let pipeline = select_pipeline(calibration);

    let matrix = match calibration.forward_matrix(alpha) {
        Some(forward_matrix) => forward_matrix_transform(&white_point, &forward_matrix)?,
        None => color_matrix_transform(&white_point, alpha, calibration)?,
    };

    Ok((pipeline, matrix))
}

fn forward_matrix_transform(
    white_point: &Vector3<f64>,
    forward_matrix: &Matrix3<f64>,
) -> Result<Matrix3<f64>> {
    if white_point.iter().any(|&v| v == 0.0) {
        return Err(ProcessingError::InvalidWhitePoint(format!(
            "zero component in {:?}",
            white_point.as_slice()
        )));
    }

    let white_balance = Matrix3::from_diagonal(&white_point.map(|v| 1.0 / v));
    let camera_to_xyz = forward_matrix * white_balance;

    Ok(xyz_to_linear_srgb_matrix(D50_XY, ChromaticAdaptation::Bradford) * camera_to_xyz)
}

fn color_matrix_transform(
    white_point: &Vector3<f64>,
    alpha: f64,
    calibration: &CalibrationSet,
) -> Result<Matrix3<f64>> {
    let color_matrix = calibration.color_matrix(alpha);
    let camera_calibration = calibration.camera_calibration(alpha);

    let reference_to_xyz = color_matrix
        .try_inverse()
        .ok_or_else(|| ProcessingError::SingularMatrix("blended color matrix".to_string()))?;
    let camera_to_xyz = (camera_calibration * color_matrix)
        .try_inverse()
        .ok_or_else(|| {
            ProcessingError::SingularMatrix(
                "blended camera calibration x color matrix".to_string(),
            )
        })?;

    let scene_white = xyz_to_xy(&(reference_to_xyz * white_point));
    debug!(x = scene_white.x, y = scene_white.y, "Scene illuminant");

    Ok(xyz_to_linear_srgb_matrix(scene_white, ChromaticAdaptation::Cat02) * camera_to_xyz)
}

/// Applies `matrix` to every pixel, then the optional sRGB encoding, then
/// clips to [0, 1].
pub fn transform_pixels(pixels: &PixelArray, matrix: &Matrix3<f64>, apply_gamma: bool) -> PixelArray {
    let m: [[f32; 3]; 3] = std::array::from_fn(|r| std::array::from_fn(|c| matrix[(r, c)] as f32));

    pixels.map_pixels(|[r, g, b]| {
        std::array::from_fn(|i| {
            let linear = m[i][0] * r + m[i][1] * g + m[i][2] * b;
            let value = if apply_gamma { encode_srgb(linear) } else { linear };
            // NaN maps to 0
            value.max(0.0).min(1.0)
        })
    })
}

/// Renders `pixels` to sRGB for a white point in reference camera space and
/// the blend factor that goes with it.
#[instrument(level = "debug", skip(pixels, calibration), fields(width = pixels.width(), height = pixels.height()))]
pub fn render(
    pixels: &PixelArray,
    white_point: &Vector3<f64>,
    alpha: f64,
    apply_gamma: bool,
    calibration: &CalibrationSet,
) -> Result<PixelArray> {
    let (pipeline, matrix) = camera_to_srgb_matrix(white_point, alpha, calibration)?;
    debug!(?pipeline, "Camera to sRGB matrix ready");

    Ok(transform_pixels(pixels, &matrix, apply_gamma))
}

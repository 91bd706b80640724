//! Dual-illuminant calibration data.
//!
//! Sources:
//! - DNG Specification 1.6, chapter 6 "Mapping Camera Color Space to CIE XYZ Space"
//! - Rowlands, "Color conversion matrices in digital cameras: a tutorial",
//!   Optical Engineering 59(11), 2020

use nalgebra::{Matrix3, Vector3};
use tracing::{debug, warn};

use crate::color_pipeline::calibration::tags;
use crate::color_pipeline::calibration::types::{CalibrationConfig, CameraCalibrationPolicy};
use crate::color_pipeline::colorimetry::Illuminant;
use crate::color_pipeline::common::error::{ProcessingError, Result};
use crate::color_pipeline::metadata::{TagStore, TagValue};

/// `alpha · m2 + (1 − alpha) · m1`
pub fn blend(alpha: f64, m1: &Matrix3<f64>, m2: &Matrix3<f64>) -> Matrix3<f64> {
    m2 * alpha + m1 * (1.0 - alpha)
}

/// Forward matrices (device camera RGB -> XYZ D50) for both illuminants.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardMatrices {
    pub forward_matrix_1: Matrix3<f64>,
    pub forward_matrix_2: Matrix3<f64>,
}

/// Per-camera calibration, built once per image and immutable afterwards.
///
/// Every color, camera calibration and forward matrix is finite and invertible.
#[derive(Debug, Clone)]
pub struct CalibrationSet {
    camera_model: String,
    /// XYZ -> reference camera RGB under illuminant 1
    color_matrix_1: Matrix3<f64>,
    /// XYZ -> reference camera RGB under illuminant 2
    color_matrix_2: Matrix3<f64>,
    /// reference camera RGB -> device camera RGB
    camera_calibration_1: Matrix3<f64>,
    camera_calibration_2: Matrix3<f64>,
    forward_matrices: Option<ForwardMatrices>,
    illuminant_1: Illuminant,
    illuminant_2: Illuminant,
    illuminant_1_cct: f64,
    illuminant_2_cct: f64,
    /// Camera AWB white point in reference camera RGB
    as_shot_neutral: Vector3<f64>,
}

impl CalibrationSet {
    /// Builds a calibration set from explicit values.
    pub fn new(
        camera_model: impl Into<String>,
        color_matrices: (Matrix3<f64>, Matrix3<f64>),
        camera_calibrations: (Matrix3<f64>, Matrix3<f64>),
        forward_matrices: Option<ForwardMatrices>,
        illuminants: (Illuminant, Illuminant),
        as_shot_neutral: Vector3<f64>,
    ) -> Result<Self> {
        ensure_invertible(&color_matrices.0, tags::COLOR_MATRIX_1)?;
        ensure_invertible(&color_matrices.1, tags::COLOR_MATRIX_2)?;
        ensure_invertible(&camera_calibrations.0, tags::CAMERA_CALIBRATION_1)?;
        ensure_invertible(&camera_calibrations.1, tags::CAMERA_CALIBRATION_2)?;
        if let Some(fm) = &forward_matrices {
            ensure_invertible(&fm.forward_matrix_1, tags::FORWARD_MATRIX_1)?;
            ensure_invertible(&fm.forward_matrix_2, tags::FORWARD_MATRIX_2)?;
        }
        ensure_finite(as_shot_neutral.as_slice(), tags::AS_SHOT_NEUTRAL)?;

        let calibration = Self {
            camera_model: camera_model.into(),
            color_matrix_1: color_matrices.0,
            color_matrix_2: color_matrices.1,
            camera_calibration_1: camera_calibrations.0,
            camera_calibration_2: camera_calibrations.1,
            forward_matrices,
            illuminant_1: illuminants.0,
            illuminant_2: illuminants.1,
            illuminant_1_cct: illuminants.0.cct(),
            illuminant_2_cct: illuminants.1.cct(),
            as_shot_neutral,
        };

        debug!(
            camera = %calibration.camera_model,
            illuminant_1 = %calibration.illuminant_1,
            cct_1 = calibration.illuminant_1_cct,
            illuminant_2 = %calibration.illuminant_2,
            cct_2 = calibration.illuminant_2_cct,
            forward_matrices = calibration.has_forward_matrices(),
            "Calibration loaded"
        );

        Ok(calibration)
    }

    /// Reads the calibration tags of a raw file.
    pub fn from_tags(tags: &TagStore, config: &CalibrationConfig) -> Result<Self> {
        let camera_model = tags.require(tags::UNIQUE_CAMERA_MODEL)?;
        let camera_model = match &camera_model.value {
            TagValue::Text(text) => text.clone(),
            _ => camera_model.raw.trim().to_string(),
        };

        let color_matrices = (
            read_matrix(tags, tags::COLOR_MATRIX_1)?,
            read_matrix(tags, tags::COLOR_MATRIX_2)?,
        );
        let camera_calibrations = (
            read_camera_calibration(tags, tags::CAMERA_CALIBRATION_1, config.camera_calibration)?,
            read_camera_calibration(tags, tags::CAMERA_CALIBRATION_2, config.camera_calibration)?,
        );

        let forward_matrices = match (
            tags.contains(tags::FORWARD_MATRIX_1),
            tags.contains(tags::FORWARD_MATRIX_2),
        ) {
            (true, true) => Some(ForwardMatrices {
                forward_matrix_1: read_matrix(tags, tags::FORWARD_MATRIX_1)?,
                forward_matrix_2: read_matrix(tags, tags::FORWARD_MATRIX_2)?,
            }),
            (false, false) => None,
            _ => {
                warn!("Only one forward matrix present, using the color matrix method");
                None
            }
        };

        let illuminants = (
            read_illuminant(tags, tags::CALIBRATION_ILLUMINANT_1)?,
            read_illuminant(tags, tags::CALIBRATION_ILLUMINANT_2)?,
        );

        let as_shot_neutral = read_numbers(tags, tags::AS_SHOT_NEUTRAL)?;
        if as_shot_neutral.len() != 3 {
            return Err(malformed(
                tags::AS_SHOT_NEUTRAL,
                format!("expected 3 values, found {}", as_shot_neutral.len()),
            ));
        }

        Self::new(
            camera_model,
            color_matrices,
            camera_calibrations,
            forward_matrices,
            illuminants,
            Vector3::from_column_slice(&as_shot_neutral),
        )
    }

    pub fn camera_model(&self) -> &str {
        &self.camera_model
    }

    pub fn color_matrix_1(&self) -> &Matrix3<f64> {
        &self.color_matrix_1
    }

    pub fn color_matrix_2(&self) -> &Matrix3<f64> {
        &self.color_matrix_2
    }

    pub fn camera_calibration_1(&self) -> &Matrix3<f64> {
        &self.camera_calibration_1
    }

    pub fn camera_calibration_2(&self) -> &Matrix3<f64> {
        &self.camera_calibration_2
    }

    pub fn forward_matrices(&self) -> Option<&ForwardMatrices> {
        self.forward_matrices.as_ref()
    }

    pub fn has_forward_matrices(&self) -> bool {
        self.forward_matrices.is_some()
    }

    pub fn illuminant_1(&self) -> Illuminant {
        self.illuminant_1
    }

    pub fn illuminant_2(&self) -> Illuminant {
        self.illuminant_2
    }

    pub fn illuminant_1_cct(&self) -> f64 {
        self.illuminant_1_cct
    }

    pub fn illuminant_2_cct(&self) -> f64 {
        self.illuminant_2_cct
    }

    pub fn as_shot_neutral(&self) -> &Vector3<f64> {
        &self.as_shot_neutral
    }

    pub fn color_matrix(&self, alpha: f64) -> Matrix3<f64> {
        blend(alpha, &self.color_matrix_1, &self.color_matrix_2)
    }

    pub fn camera_calibration(&self, alpha: f64) -> Matrix3<f64> {
        blend(alpha, &self.camera_calibration_1, &self.camera_calibration_2)
    }

    pub fn forward_matrix(&self, alpha: f64) -> Option<Matrix3<f64>> {
        self.forward_matrices
            .as_ref()
            .map(|fm| blend(alpha, &fm.forward_matrix_1, &fm.forward_matrix_2))
    }
}

fn malformed(tag: &str, reason: impl Into<String>) -> ProcessingError {
    ProcessingError::MalformedTag {
        tag: tag.to_string(),
        reason: reason.into(),
    }
}

fn ensure_finite(values: &[f64], tag: &str) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(malformed(tag, "non-finite value"))
    }
}

fn ensure_invertible(matrix: &Matrix3<f64>, tag: &str) -> Result<()> {
    ensure_finite(matrix.as_slice(), tag)?;
    if matrix.try_inverse().is_none() {
        return Err(ProcessingError::SingularMatrix(tag.to_string()));
    }
    Ok(())
}

fn read_numbers(tags: &TagStore, name: &str) -> Result<Vec<f64>> {
    tags.require(name)?
        .value
        .as_numbers()
        .ok_or_else(|| malformed(name, "expected numeric values"))
}

fn read_matrix(tags: &TagStore, name: &str) -> Result<Matrix3<f64>> {
    let values = read_numbers(tags, name)?;
    if values.len() != 9 {
        return Err(malformed(name, format!("expected 9 values, found {}", values.len())));
    }
    Ok(Matrix3::from_row_slice(&values))
}

/// Three values are the diagonal of the matrix, nine are the full matrix.
fn read_camera_calibration(
    tags: &TagStore,
    name: &str,
    policy: CameraCalibrationPolicy,
) -> Result<Matrix3<f64>> {
    if !tags.contains(name) && policy == CameraCalibrationPolicy::Identity {
        debug!("{} not present, using identity", name);
        return Ok(Matrix3::identity());
    }

    let values = read_numbers(tags, name)?;
    match values.len() {
        3 => Ok(Matrix3::from_diagonal(&Vector3::from_column_slice(&values))),
        9 => Ok(Matrix3::from_row_slice(&values)),
        n => Err(malformed(name, format!("expected 3 or 9 values, found {}", n))),
    }
}

fn read_illuminant(tags: &TagStore, name: &str) -> Result<Illuminant> {
    let entry = tags.require(name)?;
    let by_code = match entry.value.as_scalar() {
        Some(code) if code.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(&code) => {
            Some(Illuminant::from_code(code as u16))
        }
        Some(code) => Some(Err(ProcessingError::UnknownIlluminant(code.to_string()))),
        None => None,
    };

    // Names such as "D65" also parse as numbers, so fall back to the name.
    match by_code {
        Some(Ok(illuminant)) => Ok(illuminant),
        Some(Err(err)) => Illuminant::from_name(&entry.raw).map_err(|_| err),
        None => Illuminant::from_name(&entry.raw),
    }
}

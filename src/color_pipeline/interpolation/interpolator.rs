//! Self-consistent interpolation of dual-illuminant calibration data.
//!
//! The blend factor depends on the scene CCT, which in turn depends on the
//! blended matrices, so the two are solved by fixed-point iteration
//! (DNG Specification 1.6, p. 86; Rowlands 2020, section 7.3).

use nalgebra::{Matrix3, Vector2, Vector3};
use tracing::{debug, instrument, warn};

use crate::color_pipeline::calibration::CalibrationSet;
use crate::color_pipeline::colorimetry::{cct_to_xy, xy_to_cct, xy_to_xyz, xyz_to_xy};
use crate::color_pipeline::common::error::{ProcessingError, Result};

pub const DEFAULT_TOLERANCE_KELVIN: f64 = 1.0;
pub const DEFAULT_MAX_ITERATIONS: usize = 30;

/// Solution of the interpolation for one white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationResult {
    /// Weight of the illuminant 2 calibration, in [0, 1]
    pub alpha: f64,
    /// Correlated color temperature of the white point (Kelvin)
    pub cct: f64,
    /// Number of update steps taken
    pub iterations: usize,
    /// False when the iteration budget ran out before the tolerance was met
    pub converged: bool,
}

/// A measured illuminant expressed as a reference camera white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IlluminantWhitePoint {
    pub alpha: f64,
    pub cct: f64,
    /// White point in reference camera RGB
    pub white_point: Vector3<f64>,
}

/// Blend weight of illuminant 2 for a scene at `cct`.
///
/// Linear in reciprocal CCT between the two calibration temperatures and
/// clamped to the nearer illuminant outside them. Which illuminant is the
/// warmer one is decided by comparing the temperatures.
pub fn blend_factor(cct: f64, cct_1: f64, cct_2: f64) -> f64 {
    if cct_1 == cct_2 {
        return 0.0;
    }

    let (past_1, past_2) = if cct_1 > cct_2 {
        (cct > cct_1, cct < cct_2)
    } else {
        (cct < cct_1, cct > cct_2)
    };

    if past_1 {
        0.0
    } else if past_2 {
        1.0
    } else {
        (1.0 / cct - 1.0 / cct_1) / (1.0 / cct_2 - 1.0 / cct_1)
    }
}

/// Scales a camera white point so its green component is 1.
pub fn normalize_white_point(white_point: &Vector3<f64>) -> Result<Vector3<f64>> {
    if !white_point.iter().all(|v| v.is_finite()) {
        return Err(ProcessingError::InvalidWhitePoint(format!(
            "non-finite component in {:?}",
            white_point.as_slice()
        )));
    }
    if white_point.y == 0.0 {
        return Err(ProcessingError::InvalidWhitePoint(
            "green component is zero".to_string(),
        ));
    }
    Ok(white_point / white_point.y)
}

/// [`Interpolator::interpolate`] with the default tolerance and iteration budget.
pub fn interpolate(
    white_point: &Vector3<f64>,
    white_point_is_reference_space: bool,
    calibration: &CalibrationSet,
) -> Result<InterpolationResult> {
    Interpolator::new(calibration).interpolate(white_point, white_point_is_reference_space)
}

/// McCamy CCT of `xy`, which must be a positive finite temperature.
fn estimate_cct(xy: &Vector2<f64>) -> Result<f64> {
    let cct = xy_to_cct(xy);
    if !cct.is_finite() || cct <= 0.0 {
        return Err(ProcessingError::InvalidWhitePoint(format!(
            "no color temperature for chromaticity {:?}",
            xy.as_slice()
        )));
    }
    Ok(cct)
}

fn invert(matrix: &Matrix3<f64>, what: &str) -> Result<Matrix3<f64>> {
    matrix
        .try_inverse()
        .ok_or_else(|| ProcessingError::SingularMatrix(what.to_string()))
}

#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
    calibration: &'a CalibrationSet,
    tolerance_kelvin: f64,
    max_iterations: usize,
}

impl<'a> Interpolator<'a> {
    pub fn new(calibration: &'a CalibrationSet) -> Self {
        Self {
            calibration,
            tolerance_kelvin: DEFAULT_TOLERANCE_KELVIN,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_tolerance(mut self, tolerance_kelvin: f64) -> Self {
        self.tolerance_kelvin = tolerance_kelvin;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn blend_factor(&self, cct: f64) -> f64 {
        blend_factor(
            cct,
            self.calibration.illuminant_1_cct(),
            self.calibration.illuminant_2_cct(),
        )
    }

    /// One update of the fixed-point iteration: the blend factor for `cct`
    /// and the CCT that the resulting matrices assign to the white point.
    pub fn step(
        &self,
        cct: f64,
        white_point: &Vector3<f64>,
        white_point_is_reference_space: bool,
    ) -> Result<(f64, f64)> {
        let white_point = normalize_white_point(white_point)?;
        let alpha = self.blend_factor(cct);

        let color_matrix = self.calibration.color_matrix(alpha);
        let camera_to_xyz = if white_point_is_reference_space {
            invert(&color_matrix, "blended color matrix")?
        } else {
            let camera_calibration = self.calibration.camera_calibration(alpha);
            invert(
                &(camera_calibration * color_matrix),
                "blended camera calibration x color matrix",
            )?
        };

        let xy = xyz_to_xy(&(camera_to_xyz * white_point));
        Ok((alpha, estimate_cct(&xy)?))
    }

    /// Solves for the blend factor and CCT of `white_point`.
    ///
    /// `white_point_is_reference_space` is true for `AsShotNeutral`-style
    /// values and false for raw samples in device camera space. If the
    /// tolerance is not met within the iteration budget the last estimate is
    /// returned with `converged` unset.
    #[instrument(level = "debug", skip(self))]
    pub fn interpolate(
        &self,
        white_point: &Vector3<f64>,
        white_point_is_reference_space: bool,
    ) -> Result<InterpolationResult> {
        let white_point = normalize_white_point(white_point)?;

        let mut cct =
            (self.calibration.illuminant_1_cct() + self.calibration.illuminant_2_cct()) / 2.0;
        let mut alpha = self.blend_factor(cct);
        let mut delta = f64::INFINITY;
        let mut iterations = 0;

        while iterations < self.max_iterations {
            let (step_alpha, new_cct) =
                self.step(cct, &white_point, white_point_is_reference_space)?;
            delta = (new_cct - cct).abs();
            alpha = step_alpha;
            cct = new_cct;
            iterations += 1;

            if delta <= self.tolerance_kelvin {
                break;
            }
        }

        let converged = delta <= self.tolerance_kelvin;
        if converged {
            debug!(alpha, cct, iterations, "Illuminant interpolation converged");
        } else {
            warn!(
                alpha,
                cct,
                iterations,
                delta,
                "Illuminant interpolation did not converge, using last estimate"
            );
        }

        Ok(InterpolationResult {
            alpha,
            cct,
            iterations,
            converged,
        })
    }

    /// Converts a measured illuminant chromaticity into a reference camera
    /// white point.
    ///
    /// The chromaticity is snapped to the daylight locus at its own CCT, and
    /// the blend factor is evaluated once for that CCT. Only the color
    /// matrices are blended.
    pub fn white_point_for_illuminant(&self, xy: &Vector2<f64>) -> Result<IlluminantWhitePoint> {
        if !xy.iter().all(|v| v.is_finite()) || xy.y == 0.0 {
            return Err(ProcessingError::InvalidWhitePoint(format!(
                "invalid illuminant chromaticity {:?}",
                xy.as_slice()
            )));
        }

        let cct = estimate_cct(xy)?;
        let xyz_on_locus = xy_to_xyz(&cct_to_xy(cct));
        let alpha = self.blend_factor(cct);
        let white_point = self.calibration.color_matrix(alpha) * xyz_on_locus;

        debug!(cct, alpha, "Measured illuminant mapped to camera white point");

        Ok(IlluminantWhitePoint {
            alpha,
            cct,
            white_point,
        })
    }
}

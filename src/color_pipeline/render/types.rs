//! Rendering configuration types

use crate::color_pipeline::calibration::CalibrationConfig;
use crate::color_pipeline::interpolation::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_KELVIN};

/// Camera to sRGB method, chosen from the available calibration data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// White balance in camera space, then `ForwardMatrix` to XYZ (D50)
    ForwardMatrix,
    /// Inverse of `CameraCalibration · ColorMatrix` to XYZ, then adaptation
    /// from the scene illuminant
    ColorMatrix,
}

/// Configuration for white balancing and rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Apply the sRGB transfer function to the output
    pub apply_gamma: bool,
    /// Convergence threshold of the illuminant interpolation (Kelvin)
    pub tolerance_kelvin: f64,
    /// Iteration budget of the illuminant interpolation
    pub max_iterations: usize,
    pub calibration: CalibrationConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            apply_gamma: true,
            tolerance_kelvin: DEFAULT_TOLERANCE_KELVIN,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            calibration: CalibrationConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }
}

/// Builder for RenderConfig
#[derive(Default)]
pub struct RenderConfigBuilder {
    apply_gamma: Option<bool>,
    tolerance_kelvin: Option<f64>,
    max_iterations: Option<usize>,
    calibration: Option<CalibrationConfig>,
}

impl RenderConfigBuilder {
    pub fn apply_gamma(mut self, apply_gamma: bool) -> Self {
        self.apply_gamma = Some(apply_gamma);
        self
    }

    pub fn tolerance_kelvin(mut self, tolerance_kelvin: f64) -> Self {
        self.tolerance_kelvin = Some(tolerance_kelvin);
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration = Some(calibration);
        self
    }

    pub fn build(self) -> RenderConfig {
        let default = RenderConfig::default();
        RenderConfig {
            apply_gamma: self.apply_gamma.unwrap_or(default.apply_gamma),
            tolerance_kelvin: self.tolerance_kelvin.unwrap_or(default.tolerance_kelvin),
            max_iterations: self.max_iterations.unwrap_or(default.max_iterations),
            calibration: self.calibration.unwrap_or(default.calibration),
        }
    }
}

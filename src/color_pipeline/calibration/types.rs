//! Calibration loading configuration types

/// What to do when a `CameraCalibration` tag is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraCalibrationPolicy {
    /// Substitute the identity matrix (no per-unit correction)
    #[default]
    Identity,
    /// Fail with a missing tag error
    Require,
}

/// Configuration for building a calibration set from tags
#[derive(Debug, Clone, Default)]
pub struct CalibrationConfig {
    /// Handling of missing `CameraCalibration1/2` tags
    pub camera_calibration: CameraCalibrationPolicy,
}

impl CalibrationConfig {
    pub fn builder() -> CalibrationConfigBuilder {
        CalibrationConfigBuilder::default()
    }
}

/// Builder for CalibrationConfig
#[derive(Default)]
pub struct CalibrationConfigBuilder {
    camera_calibration: Option<CameraCalibrationPolicy>,
}

impl CalibrationConfigBuilder {
    pub fn camera_calibration(mut self, policy: CameraCalibrationPolicy) -> Self {
        self.camera_calibration = Some(policy);
        self
    }

    pub fn build(self) -> CalibrationConfig {
        let default = CalibrationConfig::default();
        CalibrationConfig {
            camera_calibration: self.camera_calibration.unwrap_or(default.camera_calibration),
        }
    }
}

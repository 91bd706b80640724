//! DNG tag names read by the calibration model.

pub const UNIQUE_CAMERA_MODEL: &str = "UniqueCameraModel";
pub const COLOR_MATRIX_1: &str = "ColorMatrix1";
pub const COLOR_MATRIX_2: &str = "ColorMatrix2";
pub const CAMERA_CALIBRATION_1: &str = "CameraCalibration1";
pub const CAMERA_CALIBRATION_2: &str = "CameraCalibration2";
pub const FORWARD_MATRIX_1: &str = "ForwardMatrix1";
pub const FORWARD_MATRIX_2: &str = "ForwardMatrix2";
pub const CALIBRATION_ILLUMINANT_1: &str = "CalibrationIlluminant1";
pub const CALIBRATION_ILLUMINANT_2: &str = "CalibrationIlluminant2";
pub const AS_SHOT_NEUTRAL: &str = "AsShotNeutral";

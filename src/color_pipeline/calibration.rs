//! Camera calibration module
//!
//! This module builds the dual-illuminant calibration data of a camera from
//! its raw metadata tags.

mod calibration_set;
pub mod tags;
pub mod types;


pub use calibration_set::{blend, CalibrationSet, ForwardMatrices};
pub use types::{CalibrationConfig, CalibrationConfigBuilder, CameraCalibrationPolicy};

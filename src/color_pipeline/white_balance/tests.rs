use std::fs;

use approx::assert_relative_eq;
use nalgebra::Vector3;
use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::color_pipeline::colorimetry::{cct_to_xy, xy_to_cct, xy_to_xyz, xyz_to_xy, D65_XY};
use crate::color_pipeline::common::error::ProcessingError;
use crate::color_pipeline::metadata::TagStore;
use crate::color_pipeline::output::{ImageWriter, OutputConfig, StandardTiffWriter};
use crate::color_pipeline::pixels::PixelArray;
use crate::color_pipeline::render::RenderConfig;
use crate::color_pipeline::testing::{self, camera_tags, matrix, stress_pixels};

fn image(tags: &TagStore) -> DngImage {
    DngImage::from_tags(stress_pixels(8, 6), tags, RenderConfig::default()).unwrap()
}

/// Camera tags with an identity per-unit calibration, so device and
/// reference camera spaces coincide.
fn uncorrected_tags() -> TagStore {
    let mut tags = camera_tags(false);
    tags.insert("CameraCalibration1", "1 1 1");
    tags.insert("CameraCalibration2", "1 1 1");
    tags
}

fn assert_gray(rgb: [f32; 3]) {
    assert!(rgb[1] > 0.05, "too dark to judge: {:?}", rgb);
    assert!((rgb[0] - rgb[1]).abs() < 2e-3, "not gray: {:?}", rgb);
    assert!((rgb[2] - rgb[1]).abs() < 2e-3, "not gray: {:?}", rgb);
}

#[test]
fn test_auto_interpolation_on_load() {
    let image = image(&camera_tags(false));

    assert_eq!(image.camera_model(), "Canon EOS 5D Mark II");
    assert_eq!(image.pixels().width(), 8);
    let auto = image.auto_interpolation();
    assert!(auto.converged);
    assert_relative_eq!(auto.alpha, 0.263558380876, epsilon = 1e-6);
    assert_relative_eq!(auto.cct, 4867.777092, epsilon = 1e-3);
}

#[test]
fn test_awb_estimated_xyz_matches_auto_cct() {
    let image = image(&camera_tags(false));
    let xyz = image.awb_estimated_xyz().unwrap();

    assert!(xyz.iter().all(|v| *v > 0.0));
    assert_relative_eq!(xy_to_cct(&xyz_to_xy(&xyz)), image.auto_interpolation().cct, epsilon = 1e-6);
}

#[test]
fn test_auto_renders_are_cached() {
    let image = image(&camera_tags(true));

    let first = image.white_balanced_image().unwrap();
    let second = image.white_balanced_image().unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, image.white_balance_auto(true).unwrap()));

    let linear = image.white_balanced_image_linear().unwrap();
    assert!(std::ptr::eq(linear, image.white_balance_auto(false).unwrap()));
    assert_ne!(first, linear);
}

#[test]
fn test_white_balance_mode_dispatch() {
    let image = image(&camera_tags(false));

    let as_shot = image.white_balance(WhiteBalanceMode::AsShot, true).unwrap();
    assert_eq!(&as_shot, image.white_balanced_image().unwrap());

    let patch = [0.45, 1.0, 0.62];
    assert_eq!(
        image.white_balance(WhiteBalanceMode::RawPatch(patch), false).unwrap(),
        image.white_balance_from_raw_patch(patch, false).unwrap()
    );

    assert_eq!(
        image
            .white_balance(WhiteBalanceMode::MeasuredIlluminant(D65_XY), true)
            .unwrap(),
        image.white_balance_from_measured_illuminant(D65_XY, true).unwrap()
    );
}

#[test]
fn test_raw_patch_renders_gray() {
    let tags = uncorrected_tags();
    let patch = Vector3::new(0.25, 0.5, 0.35);
    let pixels = PixelArray::filled(3, 3, [0.25, 0.5, 0.35]);
    let image = DngImage::from_tags(pixels, &tags, RenderConfig::default()).unwrap();

    let out = image.white_balance_from_raw_patch(patch, true).unwrap();
    assert_gray(out.pixel(2, 2).unwrap());
    assert!(out.data().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_raw_patch_rejects_zero_green() {
    let image = image(&camera_tags(false));
    assert!(matches!(
        image.white_balance_from_raw_patch([0.4, 0.0, 0.3], true),
        Err(ProcessingError::InvalidWhitePoint(_))
    ));
}

#[test]
fn test_measured_daylight_renders_daylight_neutral_gray() {
    let tags = uncorrected_tags();
    let neutral = matrix(testing::CM_D65) * xy_to_xyz(&cct_to_xy(6505.08));
    let gray = (neutral / neutral.y * 0.4).map(|v| v as f32);
    let pixels = PixelArray::filled(2, 2, [gray.x, gray.y, gray.z]);
    let image = DngImage::from_tags(pixels, &tags, RenderConfig::default()).unwrap();

    let out = image.white_balance_from_measured_illuminant(D65_XY, false).unwrap();
    assert_gray(out.pixel(0, 0).unwrap());
}

#[test]
fn test_measured_illuminant_output_is_clipped() {
    let image = image(&camera_tags(true));
    for cct in [2000.0, 3500.0, 5000.0, 9000.0] {
        let xy = cct_to_xy(cct);
        let out = image.white_balance_from_measured_illuminant(xy, true).unwrap();
        assert!(out.data().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn test_invalid_as_shot_neutral() {
    let mut tags = camera_tags(false);
    tags.insert("AsShotNeutral", "[0.5, 0.0, 0.5]");

    assert!(matches!(
        DngImage::from_tags(stress_pixels(2, 2), &tags, RenderConfig::default()),
        Err(ProcessingError::InvalidWhitePoint(_))
    ));
}

#[test]
fn test_open_from_files() {
    let dir = TempDir::new().unwrap();
    let pixel_path = dir.path().join("image.tiff");
    let tags_path = dir.path().join("image.json");

    let mut encoded: Vec<u8> = Vec::new();
    StandardTiffWriter
        .write_image(&stress_pixels(5, 4), &mut encoded, &OutputConfig::default())
        .unwrap();
    fs::write(&pixel_path, encoded).unwrap();

    let tags = json!({
        "UniqueCameraModel": "Canon EOS 5D Mark II",
        "ColorMatrix1": testing::CM_D65,
        "ColorMatrix2": testing::CM_A,
        "CameraCalibration1": "[1.0123, 1.0, 0.9871]",
        "CameraCalibration2": "[1.0123, 1.0, 0.9871]",
        "CalibrationIlluminant1": 21,
        "CalibrationIlluminant2": "Standard Light A",
        "AsShotNeutral": [0.4738, 1.0, 0.6397],
    });
    fs::write(&tags_path, tags.to_string()).unwrap();

    let image = DngImage::open(&pixel_path, &tags_path, RenderConfig::default()).unwrap();
    assert_eq!(image.pixels().width(), 5);
    assert_eq!(image.pixels().height(), 4);
    assert_relative_eq!(image.auto_interpolation().alpha, 0.263558380876, epsilon = 1e-6);

    assert!(matches!(
        DngImage::open(dir.path().join("missing.tiff"), &tags_path, RenderConfig::default()),
        Err(ProcessingError::InputReadError(_))
    ));
}

#[test]
fn test_raw_patch_without_color_temperature() {
    let mut tags = uncorrected_tags();
    tags.insert("ColorMatrix1", "1 0 0 0 1 0 0 0 1");
    tags.insert("ColorMatrix2", "1 0 0 0 1 0 0 0 1");
    let image = image(&tags);

    assert!(matches!(
        image.white_balance_from_raw_patch([3.3821313240043063, 1.0, 1.0], true),
        Err(ProcessingError::InvalidWhitePoint(_))
    ));

    tags.insert("AsShotNeutral", "[3.3821313240043063, 1.0, 1.0]");
    assert!(matches!(
        DngImage::from_tags(stress_pixels(2, 2), &tags, RenderConfig::default()),
        Err(ProcessingError::InvalidWhitePoint(_))
    ));
}

use std::path::Path;
use std::sync::OnceLock;

use nalgebra::{Vector2, Vector3};
use tracing::{debug, info, instrument};

use crate::color_pipeline::calibration::CalibrationSet;
use crate::color_pipeline::common::error::{ProcessingError, Result};
use crate::color_pipeline::interpolation::{InterpolationResult, Interpolator};
use crate::color_pipeline::metadata::TagStore;
use crate::color_pipeline::pixels::{PixelArray, PixelReader, TiffPixelReader};
use crate::color_pipeline::render::{render, RenderConfig};
use crate::color_pipeline::white_balance::types::WhiteBalanceMode;

/// A demosaiced camera image together with its dual-illuminant calibration.
///
/// The camera white balance is solved once on construction. The two
/// as-shot renders are computed on first use and cached.
#[derive(Debug)]
pub struct DngImage {
    pixels: PixelArray,
    calibration: CalibrationSet,
    config: RenderConfig,
    auto_interpolation: InterpolationResult,
    white_balanced: OnceLock<PixelArray>,
    white_balanced_linear: OnceLock<PixelArray>,
}

impl DngImage {
    pub fn new(pixels: PixelArray, calibration: CalibrationSet, config: RenderConfig) -> Result<Self> {
        let auto_interpolation = Interpolator::new(&calibration)
            .with_tolerance(config.tolerance_kelvin)
            .with_max_iterations(config.max_iterations)
            .interpolate(calibration.as_shot_neutral(), true)?;

        info!(
            camera = %calibration.camera_model(),
            width = pixels.width(),
            height = pixels.height(),
            cct = auto_interpolation.cct,
            alpha = auto_interpolation.alpha,
            "Image loaded"
        );

        Ok(Self {
            pixels,
            calibration,
            config,
            auto_interpolation,
            white_balanced: OnceLock::new(),
            white_balanced_linear: OnceLock::new(),
        })
    }

    pub fn from_tags(pixels: PixelArray, tags: &TagStore, config: RenderConfig) -> Result<Self> {
        let calibration = CalibrationSet::from_tags(tags, &config.calibration)?;
        Self::new(pixels, calibration, config)
    }

    /// Loads a TIFF pixel container holding a single image and a JSON tag dump.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        pixel_path: P,
        tags_path: Q,
        config: RenderConfig,
    ) -> Result<Self> {
        Self::open_with(&TiffPixelReader::new(), pixel_path, tags_path, config)
    }

    pub fn open_with<R: PixelReader, P: AsRef<Path>, Q: AsRef<Path>>(
        reader: &R,
        pixel_path: P,
        tags_path: Q,
        config: RenderConfig,
    ) -> Result<Self> {
        let pixel_path = pixel_path.as_ref();
        let data = std::fs::read(pixel_path).map_err(|e| {
            ProcessingError::InputReadError(format!("{}: {}", pixel_path.display(), e))
        })?;
        let pixels = reader.read_pixels(&data)?;
        let tags = TagStore::from_json_file(tags_path)?;

        Self::from_tags(pixels, &tags, config)
    }

    pub fn camera_model(&self) -> &str {
        self.calibration.camera_model()
    }

    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    pub fn pixels(&self) -> &PixelArray {
        &self.pixels
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Blend factor and CCT of the camera's own white balance estimate.
    pub fn auto_interpolation(&self) -> &InterpolationResult {
        &self.auto_interpolation
    }

    /// XYZ of the scene illuminant estimated by the camera.
    pub fn awb_estimated_xyz(&self) -> Result<Vector3<f64>> {
        let color_matrix = self.calibration.color_matrix(self.auto_interpolation.alpha);
        let reference_to_xyz = color_matrix
            .try_inverse()
            .ok_or_else(|| ProcessingError::SingularMatrix("blended color matrix".to_string()))?;

        Ok(reference_to_xyz * self.calibration.as_shot_neutral())
    }

    /// sRGB render under the camera white balance, gamma encoded.
    pub fn white_balanced_image(&self) -> Result<&PixelArray> {
        self.cached_auto(&self.white_balanced, true)
    }

    /// Linear sRGB render under the camera white balance.
    pub fn white_balanced_image_linear(&self) -> Result<&PixelArray> {
        self.cached_auto(&self.white_balanced_linear, false)
    }

    fn cached_auto<'a>(&'a self, cell: &'a OnceLock<PixelArray>, apply_gamma: bool) -> Result<&'a PixelArray> {
        if let Some(image) = cell.get() {
            return Ok(image);
        }

        let image = render(
            &self.pixels,
            self.calibration.as_shot_neutral(),
            self.auto_interpolation.alpha,
            apply_gamma,
            &self.calibration,
        )?;
        // A concurrent caller may have filled the cell first with an identical image.
        Ok(cell.get_or_init(|| image))
    }

    pub fn white_balance_auto(&self, apply_gamma: bool) -> Result<&PixelArray> {
        if apply_gamma {
            self.white_balanced_image()
        } else {
            self.white_balanced_image_linear()
        }
    }

    /// White balance from a gray patch sampled from the raw image.
    #[instrument(level = "debug", skip(self, patch_rgb))]
    pub fn white_balance_from_raw_patch(
        &self,
        patch_rgb: impl Into<Vector3<f64>>,
        apply_gamma: bool,
    ) -> Result<PixelArray> {
        let white_point = patch_rgb.into();
        let interpolation = self.interpolator().interpolate(&white_point, false)?;
        debug!(alpha = interpolation.alpha, cct = interpolation.cct, "Raw patch interpolated");

        render(
            &self.pixels,
            &white_point,
            interpolation.alpha,
            apply_gamma,
            &self.calibration,
        )
    }

    /// White balance from the xy chromaticity of a measured illuminant.
    #[instrument(level = "debug", skip(self, xy))]
    pub fn white_balance_from_measured_illuminant(
        &self,
        xy: impl Into<Vector2<f64>>,
        apply_gamma: bool,
    ) -> Result<PixelArray> {
        let measured = self.interpolator().white_point_for_illuminant(&xy.into())?;

        render(
            &self.pixels,
            &measured.white_point,
            measured.alpha,
            apply_gamma,
            &self.calibration,
        )
    }

    /// Renders with the given white balance source.
    pub fn white_balance(&self, mode: WhiteBalanceMode, apply_gamma: bool) -> Result<PixelArray> {
        match mode {
            WhiteBalanceMode::AsShot => self.white_balance_auto(apply_gamma).cloned(),
            WhiteBalanceMode::RawPatch(rgb) => self.white_balance_from_raw_patch(rgb, apply_gamma),
            WhiteBalanceMode::MeasuredIlluminant(xy) => {
                self.white_balance_from_measured_illuminant(xy, apply_gamma)
            }
        }
    }

    fn interpolator(&self) -> Interpolator<'_> {
        Interpolator::new(&self.calibration)
            .with_tolerance(self.config.tolerance_kelvin)
            .with_max_iterations(self.config.max_iterations)
    }
}

use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::color_pipeline::{
    common::error::{ProcessingError, Result},
    metadata::TagStore,
    output::{ImageWriter, OutputConfig, StandardTiffWriter},
    pixels::{PixelReader, TiffPixelReader},
    render::RenderConfig,
    white_balance::{DngImage, WhiteBalanceMode},
};

/// Demosaiced camera image + calibration tags -> white-balanced sRGB image.
pub struct DngToSrgbPipeline<R: PixelReader, W: ImageWriter> {
    reader: R,
    writer: W,
    render_config: RenderConfig,
    output_config: OutputConfig,
}

impl DngToSrgbPipeline<TiffPixelReader, StandardTiffWriter> {
    pub fn new(render_config: RenderConfig, output_config: OutputConfig) -> Self {
        Self {
            reader: TiffPixelReader::new(),
            writer: StandardTiffWriter,
            render_config,
            output_config,
        }
    }
}

impl<R: PixelReader, W: ImageWriter> DngToSrgbPipeline<R, W> {
    pub fn with_custom(
        reader: R,
        writer: W,
        render_config: RenderConfig,
        output_config: OutputConfig,
    ) -> Self {
        Self {
            reader,
            writer,
            render_config,
            output_config,
        }
    }

    fn validate_dimensions(width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(ProcessingError::InvalidDimensions(width, height));
        }
        Ok(())
    }

    #[instrument(skip(self, pixel_data, tags, output), fields(input_size = pixel_data.len()))]
    pub fn convert(
        &self,
        pixel_data: &[u8],
        tags: &TagStore,
        output: &mut dyn Write,
        mode: WhiteBalanceMode,
    ) -> Result<()> {
        info!("Starting white balance conversion");

        let pixels = {
            let _span = tracing::info_span!("decode_pixels").entered();
            self.reader.read_pixels(pixel_data)?
        };

        {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = pixels.width(),
                height = pixels.height()
            )
            .entered();
            Self::validate_dimensions(pixels.width(), pixels.height())?;
        }

        let image = {
            let _span = tracing::info_span!("load_calibration").entered();
            DngImage::from_tags(pixels, tags, self.render_config.clone())?
        };

        let rendered = {
            let _span = tracing::info_span!("white_balance").entered();
            image.white_balance(mode, self.render_config.apply_gamma)?
        };

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer
                .write_image(&rendered, output, &self.output_config)?;
        }

        info!(
            camera = %image.camera_model(),
            width = rendered.width(),
            height = rendered.height(),
            cct = image.auto_interpolation().cct,
            "Conversion complete"
        );
        Ok(())
    }

    #[instrument(skip(self, pixel_path, tags_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, T: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        pixel_path: P,
        tags_path: T,
        output_path: Q,
        mode: WhiteBalanceMode,
    ) -> Result<()> {
        let pixel_path = pixel_path.as_ref();
        let tags_path = tags_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            pixels = %pixel_path.display(),
            tags = %tags_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let pixel_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(pixel_path).map_err(|e| {
                ProcessingError::InputReadError(format!("{}: {}", pixel_path.display(), e))
            })?
        };

        let tags = {
            let _span = tracing::info_span!("read_tags").entered();
            TagStore::from_json_file(tags_path)?
        };

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ProcessingError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&pixel_data, &tags, &mut output_file, mode)
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    pub fn output_config(&self) -> &OutputConfig {
        &self.output_config
    }

    pub fn set_render_config(&mut self, config: RenderConfig) {
        self.render_config = config;
    }

    pub fn set_output_config(&mut self, config: OutputConfig) {
        self.output_config = config;
    }
}

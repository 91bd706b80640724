use std::io::Write;

use tracing::debug;

use crate::color_pipeline::common::error::{ProcessingError, Result};
use crate::color_pipeline::output::types::{predictor_tag, OutputConfig};
use crate::color_pipeline::output::writer::ImageWriter;
use crate::color_pipeline::pixels::PixelArray;

/// Writes images as 16-bit RGB TIFF, mapping [0, 1] onto the full u16 range.
pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &PixelArray, output: &mut dyn Write, config: &OutputConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width(), image.height());

        let samples: Vec<u16> = image
            .data()
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16)
            .collect();

        let mut buffer = Vec::new();

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ProcessingError::EncodeError(e.to_string()))?
            .with_compression(config.compression.into());

        if let Some(predictor) = config.predictor {
            encoder = encoder.with_predictor(predictor_tag(predictor));
        }

        encoder.write_image::<tiff::encoder::colortype::RGB16>(
            image.width() as u32,
            image.height() as u32,
            &samples,
        ).map_err(|e| ProcessingError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

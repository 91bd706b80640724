//! Pixel container reader backed by TIFF.
//!
//! Every page (IFD) of the file is one dataset. A reader either targets an
//! explicit page, or requires the file to hold exactly one.

use std::io::Cursor;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::ColorType;
use tracing::debug;

use crate::color_pipeline::common::error::{ProcessingError, Result};
use crate::color_pipeline::pixels::reader::PixelReader;
use crate::color_pipeline::pixels::types::PixelArray;

/// Reads a 3-channel RGB page of a TIFF file.
///
/// Integer samples are normalized to [0, 1]; float samples are taken as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffPixelReader {
    dataset: Option<usize>,
}

impl TiffPixelReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads page `index` instead of requiring a single-page file.
    pub fn with_dataset(index: usize) -> Self {
        Self {
            dataset: Some(index),
        }
    }

    pub fn dataset(&self) -> Option<usize> {
        self.dataset
    }
}

fn decode_error(e: tiff::TiffError) -> ProcessingError {
    ProcessingError::DecodeError(e.to_string())
}

fn count_datasets(data: &[u8]) -> Result<usize> {
    let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_error)?;
    let mut count = 1;
    while decoder.more_images() {
        decoder.next_image().map_err(decode_error)?;
        count += 1;
    }
    Ok(count)
}

impl PixelReader for TiffPixelReader {
    fn read_pixels(&self, data: &[u8]) -> Result<PixelArray> {
        debug!("Decoding TIFF pixel container, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_error)?;
        match self.dataset {
            Some(index) => decoder.seek_to_image(index).map_err(decode_error)?,
            None => {
                let datasets = count_datasets(data)?;
                if datasets != 1 {
                    return Err(ProcessingError::AmbiguousDataset(datasets));
                }
            }
        }

        let (width, height) = decoder.dimensions().map_err(decode_error)?;
        let color_type = decoder.colortype().map_err(decode_error)?;
        if !matches!(color_type, ColorType::RGB(_)) {
            return Err(ProcessingError::UnsupportedFormat(format!(
                "expected RGB samples, found {:?}",
                color_type
            )));
        }

        debug!("Dataset: {}x{} {:?}", width, height, color_type);

        let samples: Vec<f32> = match decoder.read_image().map_err(decode_error)? {
            DecodingResult::U8(values) => values
                .iter()
                .map(|&v| v as f32 / u8::MAX as f32)
                .collect(),
            DecodingResult::U16(values) => values
                .iter()
                .map(|&v| v as f32 / u16::MAX as f32)
                .collect(),
            DecodingResult::F32(values) => values,
            DecodingResult::F64(values) => values.iter().map(|&v| v as f32).collect(),
            _ => {
                return Err(ProcessingError::UnsupportedFormat(format!(
                    "unsupported sample type for {:?}",
                    color_type
                )));
            }
        };

        PixelArray::new(width as usize, height as usize, samples)
    }
}

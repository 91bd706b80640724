use std::io::Write;

use crate::color_pipeline::common::error::Result;
use crate::color_pipeline::output::types::OutputConfig;
use crate::color_pipeline::pixels::PixelArray;

pub trait ImageWriter {
    fn write_image(&self, image: &PixelArray, output: &mut dyn Write, config: &OutputConfig) -> Result<()>;
}

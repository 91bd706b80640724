use crate::color_pipeline::common::error::Result;
use crate::color_pipeline::pixels::types::PixelArray;

pub trait PixelReader {
    fn read_pixels(&self, data: &[u8]) -> Result<PixelArray>;
}

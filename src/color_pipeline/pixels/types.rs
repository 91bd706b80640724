//! Pixel array types

use rayon::prelude::*;

use crate::color_pipeline::common::error::{ProcessingError, Result};

/// Height x width x 3 array of real-valued RGB samples.
///
/// Transforms never mutate an array in place; they return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelArray {
    width: usize,
    height: usize,
    /// Interleaved [R, G, B, R, G, B, ...], row-major
    data: Vec<f32>,
}

impl PixelArray {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if width.checked_mul(height).and_then(|n| n.checked_mul(3)) != Some(data.len()) {
            return Err(ProcessingError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    /// An array with every pixel set to `rgb`.
    pub fn filled(width: usize, height: usize, rgb: [f32; 3]) -> Self {
        Self {
            width,
            height,
            data: rgb.repeat(width * height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Applies `f` to every pixel independently, in parallel.
    pub fn map_pixels<F>(&self, f: F) -> PixelArray
    where
        F: Fn([f32; 3]) -> [f32; 3] + Sync + Send,
    {
        let mut data = vec![0.0f32; self.data.len()];
        data.par_chunks_exact_mut(3)
            .zip(self.data.par_chunks_exact(3))
            .for_each(|(out, rgb)| {
                out.copy_from_slice(&f([rgb[0], rgb[1], rgb[2]]));
            });

        PixelArray {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

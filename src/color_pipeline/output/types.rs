//! TIFF output configuration types

use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::Compression;
use tiff::tags::Predictor;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

impl From<TiffCompression> for Compression {
    fn from(compression: TiffCompression) -> Self {
        match compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        }
    }
}

/// TIFF predictor tag for a numeric predictor value; only 2 (horizontal
/// differencing) enables prediction.
pub(crate) fn predictor_tag(value: u16) -> Predictor {
    match value {
        2 => Predictor::Horizontal,
        _ => Predictor::None,
    }
}

/// Configuration for writing rendered images
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    /// Note: Predictor adds processing time, set to None for maximum speed
    pub predictor: Option<u16>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
        }
    }
}

impl OutputConfig {
    pub fn builder() -> OutputConfigBuilder {
        OutputConfigBuilder::default()
    }
}

/// Builder for OutputConfig
#[derive(Default)]
pub struct OutputConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
}

impl OutputConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> OutputConfig {
        let default = OutputConfig::default();
        OutputConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}

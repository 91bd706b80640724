//! White balance selection types

/// Source of the scene white point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WhiteBalanceMode {
    /// The camera estimate stored in `AsShotNeutral`
    #[default]
    AsShot,
    /// RGB of a gray patch sampled from the raw image (device camera space)
    RawPatch([f64; 3]),
    /// CIE xy chromaticity of an externally measured illuminant
    MeasuredIlluminant([f64; 2]),
}


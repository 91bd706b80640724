//! Standard illuminants referenced by the DNG `CalibrationIlluminant` tags.
//!
//! Codes follow the EXIF LightSource enumeration. Only the entries with a
//! well-defined CIE 1931 2° chromaticity are supported.

use std::fmt;

use nalgebra::Vector2;

use crate::color_pipeline::common::error::{ProcessingError, Result};
use super::temperature::xy_to_cct;

/// CIE 1931 2° chromaticity of D50, the forward-matrix connection white.
pub const D50_XY: [f64; 2] = [0.34570, 0.35850];

/// CIE 1931 2° chromaticity of D65, the sRGB reference white.
pub const D65_XY: [f64; 2] = [0.31270, 0.32900];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Illuminant {
    /// Standard light A (incandescent, ~2856K)
    A,
    B,
    C,
    D55,
    D65,
    D75,
    D50,
    /// ISO 7589 studio tungsten
    IsoStudioTungsten,
}

impl Illuminant {
    pub const ALL: [Illuminant; 8] = [
        Illuminant::A,
        Illuminant::B,
        Illuminant::C,
        Illuminant::D55,
        Illuminant::D65,
        Illuminant::D75,
        Illuminant::D50,
        Illuminant::IsoStudioTungsten,
    ];

    /// Looks up an illuminant by its EXIF LightSource code.
    pub fn from_code(code: u16) -> Result<Self> {
        match code {
            17 => Ok(Illuminant::A),
            18 => Ok(Illuminant::B),
            19 => Ok(Illuminant::C),
            20 => Ok(Illuminant::D55),
            21 => Ok(Illuminant::D65),
            22 => Ok(Illuminant::D75),
            23 => Ok(Illuminant::D50),
            24 => Ok(Illuminant::IsoStudioTungsten),
            other => Err(ProcessingError::UnknownIlluminant(other.to_string())),
        }
    }

    /// Looks up an illuminant by the name metadata tools print for it,
    /// e.g. `"D65"`, `"Standard Light A"` or `"ISO Studio Tungsten"`.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "a" | "standardlighta" | "standardilluminanta" => Ok(Illuminant::A),
            "b" | "standardlightb" | "standardilluminantb" => Ok(Illuminant::B),
            "c" | "standardlightc" | "standardilluminantc" => Ok(Illuminant::C),
            "d55" => Ok(Illuminant::D55),
            "d65" => Ok(Illuminant::D65),
            "d75" => Ok(Illuminant::D75),
            "d50" => Ok(Illuminant::D50),
            "isostudiotungsten" | "studiotungsten" => Ok(Illuminant::IsoStudioTungsten),
            _ => Err(ProcessingError::UnknownIlluminant(name.to_string())),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Illuminant::A => 17,
            Illuminant::B => 18,
            Illuminant::C => 19,
            Illuminant::D55 => 20,
            Illuminant::D65 => 21,
            Illuminant::D75 => 22,
            Illuminant::D50 => 23,
            Illuminant::IsoStudioTungsten => 24,
        }
    }

    pub fn chromaticity(&self) -> Vector2<f64> {
        let xy = match self {
            Illuminant::A => [0.44757, 0.40745],
            Illuminant::B => [0.34842, 0.35161],
            Illuminant::C => [0.31006, 0.31616],
            Illuminant::D55 => [0.33242, 0.34743],
            Illuminant::D65 => D65_XY,
            Illuminant::D75 => [0.29902, 0.31485],
            Illuminant::D50 => D50_XY,
            Illuminant::IsoStudioTungsten => [0.43088, 0.40784],
        };
        Vector2::from(xy)
    }

    pub fn cct(&self) -> f64 {
        xy_to_cct(&self.chromaticity())
    }
}

impl TryFrom<u16> for Illuminant {
    type Error = ProcessingError;

    fn try_from(code: u16) -> Result<Self> {
        Illuminant::from_code(code)
    }
}

impl fmt::Display for Illuminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Illuminant::A => "Standard Light A",
            Illuminant::B => "Standard Light B",
            Illuminant::C => "Standard Light C",
            Illuminant::D55 => "D55",
            Illuminant::D65 => "D65",
            Illuminant::D75 => "D75",
            Illuminant::D50 => "D50",
            Illuminant::IsoStudioTungsten => "ISO Studio Tungsten",
        };
        write!(f, "{}", name)
    }
}

use nalgebra::{Vector2, Vector3};

use super::illuminants::D65_XY;

/// A reference white given either as tristimulus values or as chromaticity.
///
/// Chromaticity inputs are promoted to XYZ with `Y = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WhiteReference {
    Xy(Vector2<f64>),
    Xyz(Vector3<f64>),
}

impl WhiteReference {
    pub fn to_xyz(&self) -> Vector3<f64> {
        match self {
            WhiteReference::Xy(xy) => xy_to_xyz(xy),
            WhiteReference::Xyz(xyz) => *xyz,
        }
    }

    pub fn to_xy(&self) -> Vector2<f64> {
        match self {
            WhiteReference::Xy(xy) => *xy,
            WhiteReference::Xyz(xyz) => xyz_to_xy(xyz),
        }
    }
}

impl From<[f64; 2]> for WhiteReference {
    fn from(xy: [f64; 2]) -> Self {
        WhiteReference::Xy(Vector2::from(xy))
    }
}

impl From<[f64; 3]> for WhiteReference {
    fn from(xyz: [f64; 3]) -> Self {
        WhiteReference::Xyz(Vector3::from(xyz))
    }
}

impl From<Vector2<f64>> for WhiteReference {
    fn from(xy: Vector2<f64>) -> Self {
        WhiteReference::Xy(xy)
    }
}

impl From<Vector3<f64>> for WhiteReference {
    fn from(xyz: Vector3<f64>) -> Self {
        WhiteReference::Xyz(xyz)
    }
}

/// Chromaticity to tristimulus values with unit luminance.
pub fn xy_to_xyz(xy: &Vector2<f64>) -> Vector3<f64> {
    let (x, y) = (xy.x, xy.y);
    Vector3::new(x / y, 1.0, (1.0 - x - y) / y)
}

/// Tristimulus values to chromaticity.
///
/// Black has no chromaticity; it maps to the D65 white so downstream
/// temperature estimates stay finite.
pub fn xyz_to_xy(xyz: &Vector3<f64>) -> Vector2<f64> {
    let sum = xyz.x + xyz.y + xyz.z;
    if sum == 0.0 {
        return Vector2::from(D65_XY);
    }
    Vector2::new(xyz.x / sum, xyz.y / sum)
}

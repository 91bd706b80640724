//! von Kries style chromatic adaptation.
//!
//! Reference: http://www.brucelindbloom.com/index.html?Eqn_ChromAdapt.html

use nalgebra::Matrix3;

use super::chromaticity::WhiteReference;

/// Cone response basis used for chromatic adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromaticAdaptation {
    #[default]
    Bradford,
    /// CIECAM02 basis
    Cat02,
}

impl ChromaticAdaptation {
    pub fn cone_response(&self) -> Matrix3<f64> {
        match self {
            ChromaticAdaptation::Bradford => Matrix3::new(
                0.8951, 0.2664, -0.1614,
                -0.7502, 1.7135, 0.0367,
                0.0389, -0.0685, 1.0296,
            ),
            ChromaticAdaptation::Cat02 => Matrix3::new(
                0.7328, 0.4296, -0.1624,
                -0.7036, 1.6975, 0.0061,
                0.0030, 0.0136, 0.9834,
            ),
        }
    }

    pub fn inverse_cone_response(&self) -> Matrix3<f64> {
        match self {
            ChromaticAdaptation::Bradford => Matrix3::new(
                0.9869929, -0.1470543, 0.1599627,
                0.4323053, 0.5183603, 0.0492912,
                -0.0085287, 0.0400428, 0.9684867,
            ),
            ChromaticAdaptation::Cat02 => Matrix3::new(
                1.0961238, -0.2788690, 0.1827452,
                0.4543690, 0.4735332, 0.0720978,
                -0.0096276, -0.0056980, 1.0153256,
            ),
        }
    }
}

/// Bradford adaptation matrix from `source_white` to `dest_white`.
///
/// Either white may be given as XYZ (3 values) or xy chromaticity (2 values).
pub fn adaptation_matrix(
    source_white: impl Into<WhiteReference>,
    dest_white: impl Into<WhiteReference>,
) -> Matrix3<f64> {
    adaptation_matrix_with(ChromaticAdaptation::Bradford, source_white, dest_white)
}

/// `inverse(Ma) · diag(Ma·dest / Ma·source) · Ma` for the given basis `Ma`.
pub fn adaptation_matrix_with(
    method: ChromaticAdaptation,
    source_white: impl Into<WhiteReference>,
    dest_white: impl Into<WhiteReference>,
) -> Matrix3<f64> {
    let ma = method.cone_response();
    let source = ma * source_white.into().to_xyz();
    let dest = ma * dest_white.into().to_xyz();
    let gain = Matrix3::from_diagonal(&dest.component_div(&source));

    method.inverse_cone_response() * gain * ma
}

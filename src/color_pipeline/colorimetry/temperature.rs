//! Correlated color temperature estimation.

use nalgebra::Vector2;

/// Correlated color temperature (Kelvin) of a chromaticity, using the
/// McCamy (1992) cubic approximation.
pub fn xy_to_cct(xy: &Vector2<f64>) -> f64 {
    let n = (xy.x - 0.3320) / (xy.y - 0.1858);
    -449.0 * n.powi(3) + 3525.0 * n.powi(2) - 6823.3 * n + 5520.33
}

/// Chromaticity on the CIE daylight locus for a correlated color temperature.
///
/// The D-series polynomials are defined for 4000K to 25000K; temperatures
/// outside that range are extrapolated with the nearest branch.
pub fn cct_to_xy(cct: f64) -> Vector2<f64> {
    let t = cct;
    let x = if t <= 7000.0 {
        -4.6070e9 / t.powi(3) + 2.9678e6 / t.powi(2) + 0.09911e3 / t + 0.244063
    } else {
        -2.0064e9 / t.powi(3) + 1.9018e6 / t.powi(2) + 0.24748e3 / t + 0.23704
    };
    let y = -3.0 * x * x + 2.87 * x - 0.275;
    Vector2::new(x, y)
}

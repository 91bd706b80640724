//! White balance operations module
//!
//! [`DngImage`] pairs a demosaiced image with its calibration and renders it
//! to sRGB under the camera's own white balance, a raw gray patch, or a
//! measured illuminant.

mod dng_image;
pub mod types;

#[cfg(test)]
mod tests;

pub use dng_image::DngImage;
pub use types::WhiteBalanceMode;

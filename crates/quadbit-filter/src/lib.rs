//! quadbit-filter - Image smoothing
//!
//! Convolution kernels and the Gaussian blur applied before morphology:
//!
//! - [`Kernel`]: 2D or 1D weights with a center
//! - [`convolve`]: direct 2D convolution of 8 bpp images
//! - [`gaussian_blur`]: separable Gaussian with reflect-101 borders

pub mod convolve;
mod error;
pub mod kernel;

pub use convolve::{BorderMode, convolve, convolve_sep, gaussian_blur};
pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, gaussian_sigma_for_size};

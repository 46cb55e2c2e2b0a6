//! quadbit-transform - Derived image construction
//!
//! This crate provides the quadbit compound image: 2x2 blocks of a binary
//! mask, scaled to 0/255 and tiled side by side. With overlap the blocks
//! are sampled at every pixel (stride 1), otherwise at every other pixel
//! (stride 2, which reproduces the mask cropped to even dimensions).

pub mod compound;
mod error;

pub use compound::{QUADBIT_SIZE, build_compound, build_compound_with_stride, compound_size};
pub use error::{TransformError, TransformResult};

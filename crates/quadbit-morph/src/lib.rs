//! quadbit-morph - Morphological operations
//!
//! This crate provides:
//!
//! - Structuring elements ([`Sel`]): brick, square, cross and disc
//! - Binary morphology on 1 bpp masks: erosion, dilation, opening, closing
//! - Grayscale morphology on 8 bpp images with the same elements
//!
//! Opening is erosion followed by dilation, closing the reverse.

pub mod binary;
mod error;
pub mod grayscale;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::Sel;

pub use binary::{close, dilate, erode, open};
pub use grayscale::{close_gray, dilate_gray, erode_gray, open_gray};

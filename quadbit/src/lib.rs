//! quadbit - Quadrant region segmentation for Rust
//!
//! Binarizes an image, splits it into three quadrants (top-left,
//! top-right, bottom-left) and flood-fills the 4-connected foreground
//! regions of each, with an optional overlap margin between quadrants.
//! Alongside, it builds an intensity histogram, runs opening and closing
//! with configurable structuring elements, labels components over the
//! whole image and assembles a compound image of 2x2 "quadbit" blocks.
//!
//! # Example
//!
//! ```
//! use quadbit::{Pix, binarize};
//! use quadbit::region::partition;
//!
//! let pix = Pix::from_gray_rows(&[[200u8, 0], [0, 0]]).unwrap();
//! let mask = binarize(&pix, 128).unwrap();
//! let quadrants = partition(&mask, false, 0).unwrap();
//! assert_eq!(quadrants.len(), 3);
//! assert_eq!(quadrants[0].1.len(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use quadbit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use quadbit_filter as filter;
pub use quadbit_io as io;
pub use quadbit_morph as morph;
pub use quadbit_pipeline as pipeline;
pub use quadbit_region as region;
pub use quadbit_transform as transform;

pub use quadbit_pipeline::{Pipeline, PipelineConfig, PipelineReport};

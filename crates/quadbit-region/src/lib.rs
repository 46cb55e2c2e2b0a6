//! quadbit-region - Region detection and labeling
//!
//! This crate provides:
//!
//! - Flood-fill region detection on binary masks ([`detect_regions`])
//! - Quadrant partitioning with optional overlap ([`partition`])
//! - Global connected-component labeling ([`label_connected_components`])
//!
//! Region detection is always 4-connected and local to the mask it is
//! given; labeling runs once over the whole image.

pub mod conncomp;
mod error;
pub mod quadrant;
pub mod regions;

pub use conncomp::label_connected_components;
pub use error::{RegionError, RegionResult};
pub use quadrant::{DEFAULT_MARGIN, Quadrant, QuadrantPosition, partition, quadrant_boxes};
pub use regions::{Region, detect_regions};

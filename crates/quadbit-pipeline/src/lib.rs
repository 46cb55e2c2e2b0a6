//! quadbit-pipeline - The segmentation pipeline and its service shell
//!
//! This crate ties the image crates together:
//!
//! - [`PipelineConfig`] with the `classic` and `multiband` presets
//! - [`morphology`]: smoothing, opening, closing and global labeling
//! - [`Pipeline::run`]: binarize, quadrant regions, histogram, morphology
//!   and the optional compound image
//! - [`ArtifactStore`] and [`PipelineReport`] for PNG files and JSON
//! - [`LiveRunner`]: a bounded, cancellable re-processing loop
//!
//! # Examples
//!
//! ```
//! use quadbit_core::Pix;
//! use quadbit_pipeline::{Pipeline, PipelineConfig};
//!
//! let pix = Pix::from_gray_rows(&[[255u8, 255, 0, 0], [255, 0, 0, 0]]).unwrap();
//! let pipeline = Pipeline::new(PipelineConfig::classic()).unwrap();
//! let output = pipeline.run(&pix).unwrap();
//! assert_eq!(output.component_count(), 1);
//! ```

pub mod artifacts;
pub mod chart;
pub mod config;
mod error;
pub mod live;
pub mod morphology;
pub mod pipeline;
pub mod report;

pub use artifacts::{ArtifactSet, ArtifactStore};
pub use chart::render_histogram;
pub use config::{
    ElementShape, ElementConfig, MorphologyOptions, MorphologySource, PipelineConfig,
    ServiceConfig, SmoothingOptions,
};
pub use error::{PipelineError, PipelineResult};
pub use live::{CancelToken, LiveFrame, LiveRunner};
pub use morphology::{MorphologyOutput, morphology};
pub use pipeline::{Pipeline, PipelineOutput, QuadrantRegions, Segmentation};
pub use report::{PipelineReport, QuadrantReport};

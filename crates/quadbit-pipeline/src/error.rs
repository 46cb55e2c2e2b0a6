//! Error types for quadbit-pipeline

use thiserror::Error;

/// Errors that can occur while running the pipeline or persisting its
/// results
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] quadbit_core::Error),

    /// Image decode/encode error
    #[error("image I/O error: {0}")]
    Io(#[from] quadbit_io::IoError),

    /// Smoothing error
    #[error("filter error: {0}")]
    Filter(#[from] quadbit_filter::FilterError),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] quadbit_morph::MorphError),

    /// Region detection or labeling error
    #[error("region error: {0}")]
    Region(#[from] quadbit_region::RegionError),

    /// Compound image error
    #[error("transform error: {0}")]
    Transform(#[from] quadbit_transform::TransformError),

    /// Filesystem error outside image codecs (directories, config files)
    #[error("file error: {0}")]
    File(#[from] std::io::Error),

    /// Config or report (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The live worker thread panicked
    #[error("live loop worker failed: {0}")]
    Worker(String),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

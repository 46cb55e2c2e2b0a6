//! Pipeline and service configuration
//!
//! Both service variants of the segmentation pipeline are presets of one
//! [`PipelineConfig`]: [`PipelineConfig::classic`] and
//! [`PipelineConfig::multiband`]. Every struct here is serde-enabled with
//! `#[serde(default)]`, so a JSON file only needs the fields it changes.

use crate::{PipelineError, PipelineResult};
use quadbit_core::DEFAULT_THRESHOLD;
use quadbit_filter::gaussian_sigma_for_size;
use quadbit_morph::Sel;
use quadbit_region::DEFAULT_MARGIN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Structuring element shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementShape {
    /// Plus shape with arms of length `radius`
    Cross,
    /// Euclidean disc, `dx^2 + dy^2 <= radius^2`
    Disc,
    /// Full square of side `2 * radius + 1`
    Square,
}

/// A structuring element described by shape and radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementConfig {
    pub shape: ElementShape,
    pub radius: u32,
}

impl ElementConfig {
    pub const fn cross(radius: u32) -> Self {
        Self {
            shape: ElementShape::Cross,
            radius,
        }
    }

    pub const fn disc(radius: u32) -> Self {
        Self {
            shape: ElementShape::Disc,
            radius,
        }
    }

    pub const fn square(radius: u32) -> Self {
        Self {
            shape: ElementShape::Square,
            radius,
        }
    }

    /// Build the structuring element.
    pub fn to_sel(&self) -> PipelineResult<Sel> {
        let sel = match self.shape {
            ElementShape::Cross => Sel::create_cross(self.radius)?,
            ElementShape::Disc => Sel::create_disc(self.radius)?,
            ElementShape::Square => Sel::create_square(self.radius)?,
        };
        Ok(sel)
    }
}

/// Gaussian smoothing applied before opening and closing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingOptions {
    /// Odd kernel size (default: 5)
    pub size: u32,
    /// Standard deviation; 0 derives it from `size` (default: 0)
    pub sigma: f32,
}

impl Default for SmoothingOptions {
    fn default() -> Self {
        Self {
            size: 5,
            sigma: 0.0,
        }
    }
}

impl SmoothingOptions {
    /// Sigma actually used by the blur.
    pub fn effective_sigma(&self) -> f32 {
        if self.sigma == 0.0 {
            gaussian_sigma_for_size(self.size)
        } else {
            self.sigma
        }
    }

    fn validate(&self) -> PipelineResult<()> {
        if self.size == 0 || self.size % 2 == 0 {
            return Err(PipelineError::InvalidParameter(format!(
                "smoothing kernel size must be odd and positive, got {}",
                self.size
            )));
        }
        if self.sigma.is_nan() || self.sigma < 0.0 {
            return Err(PipelineError::InvalidParameter(format!(
                "smoothing sigma must be non-negative, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

/// Which image the morphology pass runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphologySource {
    /// The 1 bpp mask, with binary morphology
    Mask,
    /// The mask promoted to 0/255 gray, with grayscale morphology
    #[default]
    PromotedMask,
    /// The 8 bpp input image itself
    Gray,
}

/// Options for the morphology pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyOptions {
    /// Element for opening (default: 5x5 square)
    pub open_element: ElementConfig,
    /// Element for closing (default: 5x5 square)
    pub close_element: ElementConfig,
    /// Gaussian smoothing before opening/closing (default: 5x5, derived sigma)
    pub smoothing: Option<SmoothingOptions>,
    /// Input of the pass (default: promoted mask)
    pub source: MorphologySource,
    /// Close the opened image instead of the input (default: false)
    pub chain_close: bool,
}

impl Default for MorphologyOptions {
    fn default() -> Self {
        Self {
            open_element: ElementConfig::square(2),
            close_element: ElementConfig::square(2),
            smoothing: Some(SmoothingOptions::default()),
            source: MorphologySource::PromotedMask,
            chain_close: false,
        }
    }
}

impl MorphologyOptions {
    /// Set the opening element
    pub fn with_open_element(mut self, element: ElementConfig) -> Self {
        self.open_element = element;
        self
    }

    /// Set the closing element
    pub fn with_close_element(mut self, element: ElementConfig) -> Self {
        self.close_element = element;
        self
    }

    /// Enable or disable smoothing
    pub fn with_smoothing(mut self, smoothing: Option<SmoothingOptions>) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the morphology input
    pub fn with_source(mut self, source: MorphologySource) -> Self {
        self.source = source;
        self
    }

    /// Run closing on the opened image rather than on the input
    pub fn with_chain_close(mut self, chain_close: bool) -> Self {
        self.chain_close = chain_close;
        self
    }

    /// Check element radii and smoothing parameters.
    pub fn validate(&self) -> PipelineResult<()> {
        for (what, element) in [("open", &self.open_element), ("close", &self.close_element)] {
            if element.radius == 0 {
                return Err(PipelineError::InvalidParameter(format!(
                    "{} element radius must be positive",
                    what
                )));
            }
        }
        if let Some(smoothing) = &self.smoothing {
            smoothing.validate()?;
        }
        Ok(())
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Binarization threshold, foreground is `value >= threshold`
    pub threshold: u32,
    /// Grow quadrant boxes by `margin` towards the center
    pub overlap: bool,
    /// Overlap margin in pixels
    pub margin: i32,
    /// Morphology pass options
    pub morphology: MorphologyOptions,
    /// Build the quadbit compound image
    pub compound: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl PipelineConfig {
    /// Threshold 128, 5x5 Gaussian, 5x5 square opening and closing on the
    /// 0/255 mask, no compound image.
    pub fn classic() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            overlap: false,
            margin: DEFAULT_MARGIN,
            morphology: MorphologyOptions::default(),
            compound: false,
        }
    }

    /// Threshold 80, 3x3 cross opening, then radius 3 disc closing of the
    /// opened binary mask, compound image enabled.
    pub fn multiband() -> Self {
        Self {
            threshold: 80,
            overlap: false,
            margin: DEFAULT_MARGIN,
            morphology: MorphologyOptions {
                open_element: ElementConfig::cross(1),
                close_element: ElementConfig::disc(3),
                smoothing: None,
                source: MorphologySource::Mask,
                chain_close: true,
            },
            compound: true,
        }
    }

    /// Set the binarization threshold
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable overlap mode
    pub fn with_overlap(mut self, overlap: bool) -> Self {
        self.overlap = overlap;
        self
    }

    /// Set the overlap margin
    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    /// Replace the morphology options
    pub fn with_morphology(mut self, morphology: MorphologyOptions) -> Self {
        self.morphology = morphology;
        self
    }

    /// Enable or disable the compound image
    pub fn with_compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }

    /// Check every parameter up front.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.threshold > 255 {
            return Err(PipelineError::InvalidParameter(format!(
                "threshold must be <= 255, got {}",
                self.threshold
            )));
        }
        if self.margin < 0 {
            return Err(PipelineError::InvalidParameter(format!(
                "overlap margin must be non-negative, got {}",
                self.margin
            )));
        }
        self.morphology.validate()
    }
}

/// Default number of live-loop frames.
pub const DEFAULT_FRAMES: u32 = 100;

/// Default delay between live-loop frames, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 100;

/// Configuration of the service shell around the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Directory receiving the artifacts
    pub output_dir: PathBuf,
    /// Pipeline parameters
    pub pipeline: PipelineConfig,
    /// Frames published by the live loop
    pub frames: u32,
    /// Delay between live frames, in milliseconds
    pub delay_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("processed"),
            pipeline: PipelineConfig::default(),
            frames: DEFAULT_FRAMES,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl ServiceConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ServiceConfig = serde_json::from_str(&text)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        PipelineConfig::classic().validate().unwrap();
        PipelineConfig::multiband().validate().unwrap();
        assert_eq!(PipelineConfig::default(), PipelineConfig::classic());
        assert_eq!(PipelineConfig::multiband().threshold, 80);
        assert!(PipelineConfig::multiband().morphology.chain_close);
        assert!(!PipelineConfig::classic().morphology.chain_close);
    }

    #[test]
    fn test_invalid_values() {
        let bad = PipelineConfig::classic().with_threshold(256);
        assert!(matches!(
            bad.validate(),
            Err(PipelineError::InvalidParameter(_))
        ));
        assert!(PipelineConfig::classic().with_margin(-1).validate().is_err());

        let zero = MorphologyOptions::default().with_open_element(ElementConfig::disc(0));
        assert!(zero.validate().is_err());

        let even = MorphologyOptions::default().with_smoothing(Some(SmoothingOptions {
            size: 4,
            sigma: 0.0,
        }));
        assert!(even.validate().is_err());
        let negative = MorphologyOptions::default().with_smoothing(Some(SmoothingOptions {
            size: 5,
            sigma: -1.0,
        }));
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_effective_sigma() {
        let s = SmoothingOptions::default();
        assert!((s.effective_sigma() - 1.1).abs() < 1e-6);
        let explicit = SmoothingOptions { size: 5, sigma: 2.0 };
        assert_eq!(explicit.effective_sigma(), 2.0);
    }

    #[test]
    fn test_element_to_sel() {
        assert_eq!(ElementConfig::cross(1).to_sel().unwrap().hit_count(), 5);
        assert_eq!(ElementConfig::square(2).to_sel().unwrap().hit_count(), 25);
        assert!(ElementConfig::disc(0).to_sel().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ServiceConfig = serde_json::from_str(
            r#"{"output_dir": "out", "pipeline": {"threshold": 90, "overlap": true,
                "morphology": {"open_element": {"shape": "cross", "radius": 1}}}}"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.frames, DEFAULT_FRAMES);
        assert_eq!(config.pipeline.threshold, 90);
        assert!(config.pipeline.overlap);
        assert_eq!(config.pipeline.margin, DEFAULT_MARGIN);
        assert_eq!(config.pipeline.morphology.open_element, ElementConfig::cross(1));
        assert_eq!(config.pipeline.morphology.close_element, ElementConfig::square(2));
        assert!(!config.pipeline.morphology.chain_close);
        assert_eq!(config.delay(), Duration::from_millis(100));
    }
}

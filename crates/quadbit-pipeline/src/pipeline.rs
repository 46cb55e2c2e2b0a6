//! The segmentation pipeline
//!
//! Binarize, partition into quadrants and detect regions; independently
//! build the histogram, run the morphology pass and optionally the
//! compound image. [`Pipeline::segment`] is the cheap quadrant-only part
//! used by the live loop.

use crate::config::{MorphologySource, PipelineConfig};
use crate::morphology::{MorphologyOutput, morphology};
use crate::PipelineResult;
use quadbit_core::{Histogram, Pix, binarize};
use quadbit_region::{Quadrant, Region, partition};
use quadbit_transform::build_compound;
use tracing::{info, warn};

/// Regions found in one quadrant, in crop-local coordinates
pub type QuadrantRegions = (Quadrant, Vec<Region>);

/// Binary mask plus per-quadrant regions
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub mask: Pix,
    pub quadrants: Vec<QuadrantRegions>,
}

impl Segmentation {
    /// Total number of regions over all quadrants
    pub fn region_count(&self) -> usize {
        self.quadrants.iter().map(|(_, regions)| regions.len()).sum()
    }
}

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// 8 bpp image the pipeline worked on
    pub gray: Pix,
    pub segmentation: Segmentation,
    pub histogram: Histogram,
    pub morphology: MorphologyOutput,
    /// Present only when enabled and the mask holds at least one 2x2 block
    pub compound: Option<Pix>,
}

impl PipelineOutput {
    pub fn mask(&self) -> &Pix {
        &self.segmentation.mask
    }

    pub fn region_count(&self) -> usize {
        self.segmentation.region_count()
    }

    pub fn component_count(&self) -> u32 {
        self.morphology.component_count
    }
}

/// A validated pipeline configuration ready to run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Validate `config` and build a pipeline.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Binarize and partition into quadrant regions.
    ///
    /// Accepts 1 bpp, 8 bpp and 32 bpp color images; color is reduced to
    /// luminance first.
    pub fn segment(&self, image: &Pix) -> PipelineResult<Segmentation> {
        let gray = image.convert_to_gray8()?;
        self.segment_gray(&gray)
    }

    fn segment_gray(&self, gray: &Pix) -> PipelineResult<Segmentation> {
        let mask = binarize(gray, self.config.threshold)?;
        let quadrants = partition(&mask, self.config.overlap, self.config.margin)?;
        Ok(Segmentation { mask, quadrants })
    }

    /// Run the whole pipeline on one image.
    pub fn run(&self, image: &Pix) -> PipelineResult<PipelineOutput> {
        let gray = image.convert_to_gray8()?;
        let segmentation = self.segment_gray(&gray)?;
        let histogram = gray.gray_histogram()?;

        let source = match self.config.morphology.source {
            MorphologySource::Mask => segmentation.mask.clone(),
            MorphologySource::PromotedMask => segmentation.mask.convert_1_to_8(0, 255)?,
            MorphologySource::Gray => gray.clone(),
        };
        let morph = morphology(&source, &self.config.morphology)?;

        let compound = if self.config.compound {
            let compound = build_compound(&segmentation.mask, self.config.overlap)?;
            if compound.is_none() {
                warn!(
                    width = gray.width(),
                    height = gray.height(),
                    "image too small for a compound image"
                );
            }
            compound
        } else {
            None
        };

        info!(
            width = gray.width(),
            height = gray.height(),
            regions = segmentation.region_count(),
            components = morph.component_count,
            "pipeline run complete"
        );

        Ok(PipelineOutput {
            gray,
            segmentation,
            histogram,
            morphology: morph,
            compound,
        })
    }
}

//! Morphology pass
//!
//! Smoothing, opening and closing over the full image, plus global
//! 4-connected labeling of the pre-morphology foreground. Opening starts
//! from the (smoothed) input; closing starts from the same input, or from
//! the opened image when [`MorphologyOptions::chain_close`] is set.

use crate::config::MorphologyOptions;
use crate::{PipelineError, PipelineResult};
use quadbit_core::{Pix, PixelDepth};
use quadbit_filter::gaussian_blur;
use quadbit_morph::{close, close_gray, open, open_gray};
use quadbit_region::label_connected_components;

/// Result of the morphology pass
///
/// `opened` and `closed` keep the depth they were computed at (1 bpp for
/// unsmoothed masks, 8 bpp otherwise); `labeled` is a 32 bpp label map.
#[derive(Debug, Clone)]
pub struct MorphologyOutput {
    pub opened: Pix,
    pub closed: Pix,
    pub labeled: Pix,
    pub component_count: u32,
}

impl MorphologyOutput {
    /// Opened image stretched to 0..=255 for display
    pub fn opened_display(&self) -> PipelineResult<Pix> {
        Ok(self.opened.normalize_to_8()?)
    }

    /// Closed image stretched to 0..=255 for display
    pub fn closed_display(&self) -> PipelineResult<Pix> {
        Ok(self.closed.normalize_to_8()?)
    }

    /// Label map stretched to 0..=255 for display
    pub fn labeled_display(&self) -> PipelineResult<Pix> {
        Ok(self.labeled.normalize_to_8()?)
    }
}

/// Run the morphology pass on a 1 bpp mask or an 8 bpp image.
///
/// Foreground for labeling is every non-zero input pixel, before any
/// smoothing, so `component_count` depends only on the input. Smoothing a
/// mask promotes it to 0/255 gray first, after which grayscale morphology
/// is used.
///
/// # Errors
///
/// [`PipelineError::InvalidParameter`] for invalid options, and the
/// underlying crate error for unsupported input depths.
pub fn morphology(image: &Pix, options: &MorphologyOptions) -> PipelineResult<MorphologyOutput> {
    options.validate()?;
    let (labeled, component_count) = label_connected_components(image)?;

    let work = match &options.smoothing {
        Some(s) => gaussian_blur(image, s.size, s.effective_sigma())?,
        None => image.clone(),
    };

    let open_sel = options.open_element.to_sel()?;
    let close_sel = options.close_element.to_sel()?;
    let (opened, closed) = match work.depth() {
        PixelDepth::Bit1 => {
            let opened = open(&work, &open_sel)?;
            let base = if options.chain_close { &opened } else { &work };
            let closed = close(base, &close_sel)?;
            (opened, closed)
        }
        PixelDepth::Bit8 => {
            let opened = open_gray(&work, &open_sel)?;
            let base = if options.chain_close { &opened } else { &work };
            let closed = close_gray(base, &close_sel)?;
            (opened, closed)
        }
        PixelDepth::Bit32 => {
            return Err(PipelineError::Core(quadbit_core::Error::UnsupportedDepth(32)));
        }
    };

    Ok(MorphologyOutput {
        opened,
        closed,
        labeled,
        component_count,
    })
}

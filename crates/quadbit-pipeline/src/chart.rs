//! Histogram bar chart
//!
//! Renders a [`Histogram`] as an 8 bpp image, one column per bin: dark
//! bars on a white background, scaled so the tallest bin fills the
//! height.

use crate::{PipelineError, PipelineResult};
use quadbit_core::{Histogram, Pix, PixMut, PixelDepth};

/// Chart width, one column per bin.
pub const CHART_WIDTH: u32 = 256;

/// Default chart height.
pub const DEFAULT_CHART_HEIGHT: u32 = 128;

const BACKGROUND: u32 = 255;
const BAR: u32 = 0;

/// Render the histogram as a `256 x height` bar chart.
///
/// Any non-empty bin gets a bar at least one pixel tall.
pub fn render_histogram(histogram: &Histogram, height: u32) -> PipelineResult<Pix> {
    if height == 0 {
        return Err(PipelineError::InvalidParameter(
            "chart height must be positive".to_string(),
        ));
    }

    let mut chart = PixMut::new(CHART_WIDTH, height, PixelDepth::Bit8)?;
    chart.data_mut().fill(BACKGROUND);

    let max = histogram.max_count();
    if max == 0 {
        return Ok(chart.into());
    }

    let w = CHART_WIDTH as usize;
    let data = chart.data_mut();
    for (x, &count) in histogram.counts().iter().enumerate().take(w) {
        if count == 0 {
            continue;
        }
        let bar = (count * u64::from(height)).div_ceil(max) as u32;
        for y in height - bar..height {
            data[y as usize * w + x] = BAR;
        }
    }
    Ok(chart.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_scale_to_max() {
        let pix = Pix::from_gray_bytes(4, 1, &[0, 0, 0, 255]).unwrap();
        let hist = pix.gray_histogram().unwrap();
        let chart = render_histogram(&hist, 30).unwrap();
        assert_eq!((chart.width(), chart.height()), (CHART_WIDTH, 30));
        // Bin 0 is full height, bin 255 a third of it
        assert_eq!(chart.get_pixel(0, 0), Some(BAR));
        assert_eq!(chart.get_pixel(255, 19), Some(BACKGROUND));
        assert_eq!(chart.get_pixel(255, 20), Some(BAR));
        assert_eq!(chart.get_pixel(128, 29), Some(BACKGROUND));
    }

    #[test]
    fn test_empty_and_zero_height() {
        let chart = render_histogram(&Histogram::default(), 8).unwrap();
        assert!(chart.data().iter().all(|&v| v == BACKGROUND));
        assert!(render_histogram(&Histogram::default(), 0).is_err());
    }
}

//! Histogram generation for Pix images
//!
//! Counts the distribution of pixel intensities over 256 bins.

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of histogram bins (one per 8-bit intensity).
pub const HISTOGRAM_BINS: usize = 256;

/// Intensity histogram with 256 bins covering `[0, 256)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            counts: vec![0; HISTOGRAM_BINS],
        }
    }
}

impl Histogram {
    /// Get the bin counts, indexed by intensity.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Get the count of one bin, or `None` if `bin >= 256`.
    pub fn get(&self, bin: usize) -> Option<u64> {
        self.counts.get(bin).copied()
    }

    /// Sum of all bins (the number of pixels counted).
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest bin count.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of bins with a non-zero count.
    pub fn nonzero_bins(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Mean intensity, or `None` for an empty histogram.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| i as f64 * c as f64)
            .sum();
        Some(weighted / total as f64)
    }
}

impl Pix {
    /// Get the 256-bin intensity histogram of the image.
    ///
    /// Accepts 8 bpp grayscale images and 1 bpp masks (which only populate
    /// bins 0 and 1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 32 bpp images.
    ///
    /// # Example
    ///
    /// ```
    /// use quadbit_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 100, PixelDepth::Bit8).unwrap();
    /// let hist = pix.gray_histogram().unwrap();
    /// assert_eq!(hist.counts().len(), 256);
    /// assert_eq!(hist.get(0), Some(10_000));
    /// ```
    pub fn gray_histogram(&self) -> Result<Histogram> {
        if self.depth() == PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(32));
        }

        let mut hist = Histogram::default();
        for &v in self.data() {
            hist.counts[v as usize] += 1;
        }
        Ok(hist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts() {
        let pix = Pix::from_gray_bytes(3, 2, &[0, 0, 5, 255, 5, 5]).unwrap();
        let hist = pix.gray_histogram().unwrap();
        assert_eq!(hist.get(0), Some(2));
        assert_eq!(hist.get(5), Some(3));
        assert_eq!(hist.get(255), Some(1));
        assert_eq!(hist.get(256), None);
        assert_eq!(hist.total(), 6);
        assert_eq!(hist.max_count(), 3);
        assert_eq!(hist.nonzero_bins(), 3);
    }

    #[test]
    fn test_histogram_mean() {
        let pix = Pix::from_gray_bytes(2, 1, &[10, 20]).unwrap();
        let hist = pix.gray_histogram().unwrap();
        assert_eq!(hist.mean(), Some(15.0));
        assert_eq!(Histogram::default().mean(), None);
    }

    #[test]
    fn test_histogram_rejects_color() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(pix.gray_histogram().is_err());
    }
}

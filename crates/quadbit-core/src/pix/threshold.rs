//! Fixed-threshold binarization
//!
//! Converts a grayscale image into a 0/1 mask. Pixels with intensity
//! greater than or equal to the threshold become foreground (1).

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

/// Default binarization threshold.
pub const DEFAULT_THRESHOLD: u32 = 128;

/// Binarize an image with a fixed threshold.
///
/// Accepts 8 bpp grayscale and 32 bpp color images (color is reduced to
/// luminance first). Output is a 1 bpp mask of the same size where
/// `cell = 1` iff `intensity >= threshold`.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `threshold > 255`
/// - [`Error::InvalidImage`] if the image is a 1 bpp mask or a label map
///
/// # Examples
///
/// ```
/// use quadbit_core::{Pix, binarize};
///
/// let pix = Pix::from_gray_bytes(3, 1, &[10, 128, 250]).unwrap();
/// let mask = binarize(&pix, 128).unwrap();
/// assert_eq!(mask.data(), &[0, 1, 1]);
/// ```
pub fn binarize(pix: &Pix, threshold: u32) -> Result<Pix> {
    if threshold > 255 {
        return Err(Error::InvalidParameter(format!(
            "threshold must be in 0..=255, got {threshold}"
        )));
    }

    let gray = match pix.depth() {
        PixelDepth::Bit8 => pix.clone(),
        PixelDepth::Bit32 if pix.spp() >= 3 => pix.convert_rgb_to_luminance()?,
        depth => {
            return Err(Error::InvalidImage(format!(
                "binarization needs a grayscale or color image, got {} bpp with {} samples",
                depth.bits(),
                pix.spp()
            )));
        }
    };

    let mut mask = PixMut::new(gray.width(), gray.height(), PixelDepth::Bit1)?;
    for (dst, &v) in mask.data_mut().iter_mut().zip(gray.data()) {
        *dst = u32::from(v >= threshold);
    }
    Ok(mask.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binarize_boundary() {
        let pix = Pix::from_gray_bytes(4, 1, &[0, 127, 128, 255]).unwrap();
        let mask = binarize(&pix, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(mask.depth(), PixelDepth::Bit1);
        assert_eq!(mask.data(), &[0, 0, 1, 1]);
    }

    #[test]
    fn test_binarize_extremes() {
        let pix = Pix::from_gray_bytes(2, 1, &[0, 255]).unwrap();
        assert_eq!(binarize(&pix, 0).unwrap().data(), &[1, 1]);
        assert_eq!(binarize(&pix, 255).unwrap().data(), &[0, 1]);
    }

    #[test]
    fn test_binarize_rejects_bad_threshold() {
        let pix = Pix::from_gray_bytes(1, 1, &[0]).unwrap();
        assert!(matches!(
            binarize(&pix, 256),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_binarize_rejects_mask() {
        let mask = Pix::new(2, 2, PixelDepth::Bit1).unwrap();
        assert!(matches!(binarize(&mask, 1), Err(Error::InvalidImage(_))));
    }

    #[test]
    fn test_binarize_color() {
        let mut rgb = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        rgb.set_rgb(0, 0, 255, 255, 255).unwrap();
        rgb.set_rgb(1, 0, 0, 0, 255).unwrap();
        let mask = binarize(&Pix::from(rgb), 80).unwrap();
        assert_eq!(mask.data(), &[1, 0]);
    }
}

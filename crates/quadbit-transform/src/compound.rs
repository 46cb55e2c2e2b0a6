//! Quadbit compound image
//!
//! Every anchor `(i, j)` stepped by the stride contributes the 2x2 block
//! `mask[i..i+2, j..j+2]` to output rows `(i / stride) * 2 ..+2` and
//! columns `(j / stride) * 2 ..+2`. Blocks that would run past the mask
//! edge are skipped.

use crate::{TransformError, TransformResult};
use quadbit_core::{Pix, PixMut, PixelDepth};
use tracing::debug;

/// Side of one quadbit block.
pub const QUADBIT_SIZE: u32 = 2;

/// Output `(width, height)` for a `width x height` mask, or `None` when
/// the mask cannot hold a single block.
pub fn compound_size(width: u32, height: u32, stride: u32) -> Option<(u32, u32)> {
    if stride == 0 || width < QUADBIT_SIZE || height < QUADBIT_SIZE {
        return None;
    }
    let blocks = |n: u32| ((n - QUADBIT_SIZE) / stride + 1) * QUADBIT_SIZE;
    Some((blocks(width), blocks(height)))
}

/// Build the compound image of a binary mask.
///
/// Stride is 1 with `overlap`, 2 without. Returns `Ok(None)` for a mask
/// smaller than 2x2.
///
/// # Examples
///
/// ```
/// use quadbit_core::{Pix, PixMut, PixelDepth};
/// use quadbit_transform::build_compound;
///
/// let mask: Pix = PixMut::new(4, 4, PixelDepth::Bit1).unwrap().into();
/// let plain = build_compound(&mask, false).unwrap().unwrap();
/// assert_eq!((plain.width(), plain.height()), (4, 4));
/// let dense = build_compound(&mask, true).unwrap().unwrap();
/// assert_eq!((dense.width(), dense.height()), (6, 6));
/// ```
pub fn build_compound(mask: &Pix, overlap: bool) -> TransformResult<Option<Pix>> {
    build_compound_with_stride(mask, if overlap { 1 } else { 2 })
}

/// Build the compound image with an explicit anchor stride.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedDepth`] unless the mask is 1 bpp
/// and [`TransformError::InvalidParameters`] for a zero stride.
pub fn build_compound_with_stride(mask: &Pix, stride: u32) -> TransformResult<Option<Pix>> {
    if mask.depth() != PixelDepth::Bit1 {
        return Err(TransformError::UnsupportedDepth(format!(
            "compound image needs a 1 bpp mask, got {} bpp",
            mask.depth().bits()
        )));
    }
    if stride == 0 {
        return Err(TransformError::InvalidParameters(
            "stride must be positive".to_string(),
        ));
    }

    let (w, h) = (mask.width(), mask.height());
    let Some((out_w, out_h)) = compound_size(w, h, stride) else {
        debug!(width = w, height = h, "mask too small for a compound image");
        return Ok(None);
    };

    let mut out = PixMut::new(out_w, out_h, PixelDepth::Bit8)?;
    let src = mask.data();
    let ow = out_w as usize;
    let dst = out.data_mut();

    let q = QUADBIT_SIZE;
    for i in (0..=h - q).step_by(stride as usize) {
        for j in (0..=w - q).step_by(stride as usize) {
            let (oy, ox) = ((i / stride) * q, (j / stride) * q);
            for dy in 0..q {
                for dx in 0..q {
                    let v = src[((i + dy) * w + j + dx) as usize];
                    dst[(oy + dy) as usize * ow + (ox + dx) as usize] =
                        if v != 0 { 255 } else { 0 };
                }
            }
        }
    }

    Ok(Some(out.into()))
}

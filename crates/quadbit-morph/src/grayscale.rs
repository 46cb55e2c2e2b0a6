//! Grayscale morphological operations
//!
//! Implements erosion, dilation, opening, and closing for 8 bpp images
//! with an arbitrary structuring element:
//!
//! - **Dilation**: maximum over the neighborhood (outside counts as -inf)
//! - **Erosion**: minimum over the neighborhood (outside counts as +inf)
//! - **Opening**: erosion followed by dilation (removes small bright features)
//! - **Closing**: dilation followed by erosion (fills small dark features)

use crate::{MorphError, MorphResult, Sel};
use quadbit_core::{Pix, PixMut, PixelDepth};

fn check_gray(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Shared neighborhood scan. `sign` is +1 for erosion offsets and -1 for
/// the reflected dilation offsets; samples outside the image are skipped.
fn rank_scan(
    pix: &Pix,
    sel: &Sel,
    sign: i32,
    init: u32,
    pick: fn(u32, u32) -> u32,
) -> MorphResult<Pix> {
    check_gray(pix)?;
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let offsets: Vec<_> = sel.hit_offsets().collect();
    let src = pix.data();

    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit8)?;
    let dst = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            let mut acc = init;
            for &(dx, dy) in &offsets {
                let sx = x + sign * dx;
                let sy = y + sign * dy;
                if sx >= 0 && sx < w && sy >= 0 && sy < h {
                    acc = pick(acc, src[(sy * w + sx) as usize]);
                }
            }
            dst[(y * w + x) as usize] = acc;
        }
    }
    Ok(out.into())
}

/// Dilate a grayscale image
///
/// Computes the maximum pixel value in the reflected SEL neighborhood,
/// which expands bright regions and shrinks dark regions.
pub fn dilate_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    rank_scan(pix, sel, -1, 0, u32::max)
}

/// Erode a grayscale image
///
/// Computes the minimum pixel value in the SEL neighborhood,
/// which shrinks bright regions and expands dark regions.
pub fn erode_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    rank_scan(pix, sel, 1, 255, u32::min)
}

/// Open a grayscale image (erosion followed by dilation)
pub fn open_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode_gray(pix, sel)?;
    dilate_gray(&eroded, sel)
}

/// Close a grayscale image (dilation followed by erosion)
pub fn close_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate_gray(pix, sel)?;
    erode_gray(&dilated, sel)
}

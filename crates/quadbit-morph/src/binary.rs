//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for 1 bpp masks.
//! Pixels outside the image are background for both erosion and
//! dilation, so erosion clears foreground within reach of the border.

use crate::{MorphError, MorphResult, Sel};
use quadbit_core::{Pix, PixMut, PixelDepth};

fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Read `(x + dx, y + dy)`, treating out-of-bounds as background.
#[inline]
fn fg_at(data: &[u32], w: i32, h: i32, x: i32, y: i32) -> bool {
    x >= 0 && x < w && y >= 0 && y < h && data[(y * w + x) as usize] != 0
}

/// Dilate a binary image
///
/// `dest(x, y) = 1` iff some hit `(dx, dy)` of the SEL has
/// `src(x - dx, y - dy) = 1`.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let offsets: Vec<_> = sel.hit_offsets().collect();
    let src = pix.data();

    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    let dst = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            if offsets
                .iter()
                .any(|&(dx, dy)| fg_at(src, w, h, x - dx, y - dy))
            {
                dst[(y * w + x) as usize] = 1;
            }
        }
    }
    Ok(out.into())
}

/// Erode a binary image
///
/// `dest(x, y) = 1` iff every hit `(dx, dy)` of the SEL has
/// `src(x + dx, y + dy) = 1`; outside the image counts as 0.
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let offsets: Vec<_> = sel.hit_offsets().collect();
    let src = pix.data();

    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    let dst = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            if offsets
                .iter()
                .all(|&(dx, dy)| fg_at(src, w, h, x + dx, y + dy))
            {
                dst[(y * w + x) as usize] = 1;
            }
        }
    }
    Ok(out.into())
}

/// Open a binary image
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode(pix, sel)?;
    dilate(&eroded, sel)
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadbit_test::pix_from_ascii;

    #[test]
    fn test_dilate_single_pixel() {
        let pix = pix_from_ascii(&[".....", ".....", "..#..", ".....", "....."]).unwrap();
        let sel = Sel::create_cross(1).unwrap();
        let out = dilate(&pix, &sel).unwrap();
        let expected =
            pix_from_ascii(&[".....", "..#..", ".###.", "..#..", "....."]).unwrap();
        assert_eq!(out.data(), expected.data());
    }

    #[test]
    fn test_erode_border_is_background() {
        let pix = pix_from_ascii(&["###", "###", "###"]).unwrap();
        let sel = Sel::create_square(1).unwrap();
        let out = erode(&pix, &sel).unwrap();
        let expected = pix_from_ascii(&["...", ".#.", "..."]).unwrap();
        assert_eq!(out.data(), expected.data());
    }

    #[test]
    fn test_open_removes_speck() {
        let pix = pix_from_ascii(&[
            "#.......",
            "........",
            "..###...",
            "..###...",
            "..###...",
            "........",
        ])
        .unwrap();
        let sel = Sel::create_square(1).unwrap();
        let out = open(&pix, &sel).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(0));
        assert_eq!(out.count_pixels(), 9);
    }

    #[test]
    fn test_close_fills_hole() {
        let pix = pix_from_ascii(&[".....", ".###.", ".#.#.", ".###.", "....."]).unwrap();
        let sel = Sel::create_square(1).unwrap();
        let out = close(&pix, &sel).unwrap();
        assert_eq!(out.get_pixel(2, 2), Some(1));
    }

    #[test]
    fn test_rejects_gray() {
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        let sel = Sel::create_cross(1).unwrap();
        assert!(matches!(
            erode(&pix, &sel),
            Err(MorphError::UnsupportedDepth { .. })
        ));
    }
}

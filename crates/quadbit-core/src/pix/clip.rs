//! Rectangle extraction
//!
//! Cropping a sub-image out of a `Pix`, used to hand each quadrant's
//! bounding box to region detection as a standalone mask.

use super::{Pix, PixMut, PixelDepth};
use crate::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Extract a rectangular sub-region of the image.
    ///
    /// The rectangle `(x, y, w, h)` is clipped to the image bounds; the
    /// depth and samples-per-pixel of the source are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if:
    /// - `w` or `h` is 0
    /// - The rectangle origin lies outside the image
    ///
    /// # Examples
    ///
    /// ```
    /// use quadbit_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 80, PixelDepth::Bit8).unwrap();
    /// let clipped = pix.clip_rectangle(80, 60, 50, 50).unwrap();
    /// assert_eq!(clipped.width(), 20);
    /// assert_eq!(clipped.height(), 20);
    /// ```
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Pix> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle has zero dimension: {}x{}",
                w, h
            )));
        }

        let src_w = self.width();
        let src_h = self.height();

        if x >= src_w || y >= src_h {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle origin ({}, {}) is outside image bounds ({}x{})",
                x, y, src_w, src_h
            )));
        }

        let clip_w = w.min(src_w - x);
        let clip_h = h.min(src_h - y);

        let depth = self.depth();
        let mut pixd = PixMut::new(clip_w, clip_h, depth)?;
        if depth == PixelDepth::Bit32 {
            pixd.set_spp(self.spp());
        }

        let x0 = x as usize;
        let cw = clip_w as usize;
        for dy in 0..clip_h {
            let src = &self.row_data(y + dy)[x0..x0 + cw];
            let start = dy as usize * cw;
            pixd.data_mut()[start..start + cw].copy_from_slice(src);
        }

        Ok(pixd.into())
    }

    /// Extract the sub-image covered by `region`, clipped to the image.
    ///
    /// Returns `Ok(None)` when the clipped box is empty.
    pub fn clip_box(&self, region: &Box) -> Result<Option<Pix>> {
        let full = Box::new_unchecked(0, 0, self.width() as i32, self.height() as i32);
        match full.intersect(region) {
            Some(b) => self
                .clip_rectangle(b.x as u32, b.y as u32, b.w as u32, b.h as u32)
                .map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: u32, h: u32) -> Pix {
        let data: Vec<u8> = (0..w * h).map(|v| v as u8).collect();
        Pix::from_gray_bytes(w, h, &data).unwrap()
    }

    #[test]
    fn test_clip_rectangle_contents() {
        let pix = numbered(4, 4);
        let clipped = pix.clip_rectangle(1, 2, 2, 2).unwrap();
        assert_eq!(clipped.data(), &[9, 10, 13, 14]);
    }

    #[test]
    fn test_clip_rectangle_errors() {
        let pix = numbered(4, 4);
        assert!(pix.clip_rectangle(0, 0, 0, 2).is_err());
        assert!(pix.clip_rectangle(4, 0, 1, 1).is_err());
    }

    #[test]
    fn test_clip_box_empty_and_partial() {
        let pix = numbered(4, 4);
        assert!(pix.clip_box(&Box::new_unchecked(0, 0, 0, 4)).unwrap().is_none());
        assert!(pix.clip_box(&Box::new_unchecked(10, 10, 2, 2)).unwrap().is_none());
        let part = pix.clip_box(&Box::new_unchecked(-2, 3, 4, 5)).unwrap().unwrap();
        assert_eq!((part.width(), part.height()), (2, 1));
        assert_eq!(part.data(), &[12, 13]);
    }
}

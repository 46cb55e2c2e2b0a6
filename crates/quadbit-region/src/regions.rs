//! Flood-fill region detection
//!
//! Grows 4-connected foreground regions out of a binary mask with an
//! explicit stack. Cells are marked visited when popped, and a region lists
//! its pixels in pop order. A cell can be pushed once per unvisited
//! neighbor, so the stack holds at most four entries per pixel and the whole
//! scan stays O(rows x cols).

use crate::error::{RegionError, RegionResult};
use quadbit_core::{Box, Pix, PixelDepth};
use serde::{Deserialize, Serialize};

/// A 4-connected set of foreground pixels.
///
/// Pixels are `(row, col)` pairs in the order the fill popped them off its
/// stack, starting with the seed. Coordinates are relative to the image the
/// region was detected in (a quadrant crop, typically).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region {
    pixels: Vec<(u32, u32)>,
}

impl Region {
    /// Build a region from `(row, col)` pairs.
    pub fn from_pixels(pixels: Vec<(u32, u32)>) -> Self {
        Self { pixels }
    }

    pub fn pixels(&self) -> &[(u32, u32)] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// First pixel visited (the top-most, then left-most pixel).
    pub fn seed(&self) -> Option<(u32, u32)> {
        self.pixels.first().copied()
    }

    /// Check whether `(row, col)` belongs to the region.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.pixels.contains(&(row, col))
    }

    /// Tight bounding box (`x` = column, `y` = row), `None` when empty.
    pub fn bounds(&self) -> Option<Box> {
        let (&(r0, c0), rest) = self.pixels.split_first()?;
        let (mut rmin, mut rmax, mut cmin, mut cmax) = (r0, r0, c0, c0);
        for &(r, c) in rest {
            rmin = rmin.min(r);
            rmax = rmax.max(r);
            cmin = cmin.min(c);
            cmax = cmax.max(c);
        }
        Some(Box::new_unchecked(
            cmin as i32,
            rmin as i32,
            (cmax - cmin + 1) as i32,
            (rmax - rmin + 1) as i32,
        ))
    }

    /// Shift every pixel by `(row_offset, col_offset)`.
    pub fn translated(&self, row_offset: u32, col_offset: u32) -> Region {
        Region {
            pixels: self
                .pixels
                .iter()
                .map(|&(r, c)| (r + row_offset, c + col_offset))
                .collect(),
        }
    }
}

/// Find the 4-connected foreground regions of a 1 bpp mask.
///
/// Regions are returned in the row-major order of their seed pixel.
/// Background pixels never appear in a region, and every foreground pixel
/// appears in exactly one.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] if the image is not 1 bpp.
///
/// # Examples
///
/// ```
/// use quadbit_core::{PixMut, PixelDepth};
/// use quadbit_region::detect_regions;
///
/// let mut mask = PixMut::new(2, 2, PixelDepth::Bit1).unwrap();
/// mask.set_pixel(0, 0, 1).unwrap();
/// mask.set_pixel(1, 1, 1).unwrap();
/// let regions = detect_regions(&mask.into()).unwrap();
/// assert_eq!(regions.len(), 2);
/// ```
pub fn detect_regions(mask: &Pix) -> RegionResult<Vec<Region>> {
    if mask.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1 bpp",
            actual: mask.depth().bits(),
        });
    }

    let rows = mask.height() as usize;
    let cols = mask.width() as usize;
    let data = mask.data();
    let mut visited = vec![false; rows * cols];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut regions = Vec::new();

    for start in 0..rows * cols {
        if visited[start] || data[start] == 0 {
            continue;
        }

        stack.push((start / cols, start % cols));
        let mut pixels = Vec::new();

        while let Some((r, c)) = stack.pop() {
            let here = r * cols + c;
            if visited[here] {
                continue;
            }
            visited[here] = true;
            pixels.push((r as u32, c as u32));

            let neighbors = [
                (r.checked_sub(1), Some(c)),
                (Some(r + 1).filter(|&v| v < rows), Some(c)),
                (Some(r), c.checked_sub(1)),
                (Some(r), Some(c + 1).filter(|&v| v < cols)),
            ];
            for (nr, nc) in neighbors {
                let (Some(nr), Some(nc)) = (nr, nc) else {
                    continue;
                };
                let idx = nr * cols + nc;
                if !visited[idx] && data[idx] != 0 {
                    stack.push((nr, nc));
                }
            }
        }

        regions.push(Region { pixels });
    }

    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadbit_test::pix_from_ascii;

    #[test]
    fn test_diagonal_pixels_are_separate() {
        let mask = pix_from_ascii(&["#.", ".#"]).unwrap();
        let regions = detect_regions(&mask).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].pixels(), &[(0, 0)]);
        assert_eq!(regions[1].pixels(), &[(1, 1)]);
    }

    #[test]
    fn test_u_shape_is_one_region() {
        let mask = pix_from_ascii(&["#.#", "#.#", "###"]).unwrap();
        let regions = detect_regions(&mask).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].len(), 7);
        assert_eq!(regions[0].seed(), Some((0, 0)));
        assert!(!regions[0].contains(0, 1));
    }

    #[test]
    fn test_pixels_follow_pop_order() {
        // A cell pushed early but reached again later is listed when it is
        // popped, not when first seen
        let mask = pix_from_ascii(&["###", "###", "###"]).unwrap();
        let regions = detect_regions(&mask).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(
            regions[0].pixels(),
            &[
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (1, 1),
                (1, 0),
                (2, 0),
                (2, 1),
                (2, 2),
            ]
        );
    }

    #[test]
    fn test_empty_and_full() {
        let empty = pix_from_ascii(&["...", "..."]).unwrap();
        assert!(detect_regions(&empty).unwrap().is_empty());
        let full = pix_from_ascii(&["###", "###"]).unwrap();
        let regions = detect_regions(&full).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].len(), 6);
    }

    #[test]
    fn test_bounds_and_translate() {
        let mask = pix_from_ascii(&["....", ".##.", "..#."]).unwrap();
        let regions = detect_regions(&mask).unwrap();
        assert_eq!(regions[0].bounds(), Some(Box::new_unchecked(1, 1, 2, 2)));
        let moved = regions[0].translated(10, 20);
        assert!(moved.contains(11, 21));
        assert!(moved.contains(12, 22));
        assert_eq!(Region::default().bounds(), None);
    }

    #[test]
    fn test_serializes_as_pairs() {
        let region = Region::from_pixels(vec![(0, 1), (2, 3)]);
        let json = serde_json::to_string(&region).unwrap();
        assert_eq!(json, "[[0,1],[2,3]]");
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(back, region);
    }

    #[test]
    fn test_rejects_gray() {
        let gray = Pix::from_gray_bytes(2, 2, &[0, 255, 0, 0]).unwrap();
        assert!(matches!(
            detect_regions(&gray),
            Err(RegionError::UnsupportedDepth { .. })
        ));
    }
}

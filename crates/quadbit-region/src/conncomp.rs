//! Connected component analysis
//!
//! Global labeling of 4-connected foreground components with a two-pass
//! union-find scan. Labels are dense (`1..=count`) and assigned in
//! row-major order of each component's first pixel, so the labeled image
//! is deterministic.

use crate::error::{RegionError, RegionResult};
use quadbit_core::{Pix, PixMut, PixelDepth};

/// Disjoint-set forest over provisional labels.
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Slot 0 is background
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

fn check_input(pix: &Pix) -> RegionResult<()> {
    match pix.depth() {
        PixelDepth::Bit1 | PixelDepth::Bit8 => Ok(()),
        d => Err(RegionError::UnsupportedDepth {
            expected: "1 or 8 bpp",
            actual: d.bits(),
        }),
    }
}

/// Label all 4-connected components of an image
///
/// Foreground is any non-zero pixel, so both 1 bpp masks and 8 bpp images
/// are accepted. Returns a 32 bpp, 1 spp label map (0 = background) and
/// the number of components.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] for 32 bpp input.
pub fn label_connected_components(pix: &Pix) -> RegionResult<(Pix, u32)> {
    check_input(pix)?;
    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let src = pix.data();

    let mut uf = UnionFind::new();
    let mut provisional = vec![0u32; w * h];

    // First pass: provisional labels and equivalences
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if src[idx] == 0 {
                continue;
            }
            let mut neighbors = [0u32; 2];
            let mut n = 0;
            let mut push = |v: u32| {
                if v != 0 {
                    neighbors[n] = v;
                    n += 1;
                }
            };
            if x > 0 {
                push(provisional[idx - 1]);
            }
            if y > 0 {
                push(provisional[idx - w]);
            }

            provisional[idx] = match neighbors[..n].iter().copied().min() {
                None => uf.make_set(),
                Some(min) => {
                    for &other in &neighbors[..n] {
                        uf.union(min, other);
                    }
                    min
                }
            };
        }
    }

    // Second pass: resolve roots and renumber densely in scan order
    let mut dense = vec![0u32; uf.parent.len()];
    let mut count = 0u32;
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit32)?;
    out.set_spp(1);
    let dst = out.data_mut();
    for (idx, &p) in provisional.iter().enumerate() {
        if p == 0 {
            continue;
        }
        let root = uf.find(p) as usize;
        if dense[root] == 0 {
            count += 1;
            dense[root] = count;
        }
        dst[idx] = dense[root];
    }

    Ok((out.into(), count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadbit_test::pix_from_ascii;

    #[test]
    fn test_dense_row_major_labels() {
        let pix = pix_from_ascii(&["..#.", "#...", "#.##"]).unwrap();
        let (labeled, count) = label_connected_components(&pix).unwrap();
        assert_eq!(count, 3);
        assert_eq!(labeled.depth(), PixelDepth::Bit32);
        assert_eq!(labeled.spp(), 1);
        assert_eq!(labeled.get_pixel(2, 0), Some(1));
        assert_eq!(labeled.get_pixel(0, 1), Some(2));
        assert_eq!(labeled.get_pixel(0, 2), Some(2));
        assert_eq!(labeled.get_pixel(3, 2), Some(3));
        assert_eq!(labeled.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn test_u_shape_merges() {
        // Right arm gets its own provisional label until the bottom row
        let pix = pix_from_ascii(&["#.#", "#.#", "###"]).unwrap();
        let (labeled, count) = label_connected_components(&pix).unwrap();
        assert_eq!(count, 1);
        assert!(labeled.data().iter().all(|&v| v <= 1));
    }

    #[test]
    fn test_diagonal_pixels_stay_apart() {
        let pix = pix_from_ascii(&["#.", ".#"]).unwrap();
        assert_eq!(label_connected_components(&pix).unwrap().1, 2);
        let pix = pix_from_ascii(&[".#", "#."]).unwrap();
        assert_eq!(label_connected_components(&pix).unwrap().1, 2);
    }

    #[test]
    fn test_gray_nonzero_is_foreground() {
        let pix = Pix::from_gray_bytes(4, 1, &[0, 7, 200, 0]).unwrap();
        let (labeled, count) = label_connected_components(&pix).unwrap();
        assert_eq!(count, 1);
        assert_eq!(labeled.data(), &[0, 1, 1, 0]);
    }

    #[test]
    fn test_rejects_rgb() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(label_connected_components(&pix).is_err());
    }
}

//! Synthetic fixtures
//!
//! Deterministic masks and gray images built in code, plus a naive
//! breadth-first component finder used as a reference for region tests.

use crate::error::{TestError, TestResult};
use quadbit_core::{Pix, PixMut, PixelDepth};
use std::collections::VecDeque;

/// Build a 1 bpp mask from ASCII rows.
///
/// `#`, `1` and `X` are foreground; `.`, `0` and `_` are background.
///
/// ```
/// let mask = quadbit_test::pix_from_ascii(&["#.", ".#"]).unwrap();
/// assert_eq!(mask.count_pixels(), 2);
/// ```
pub fn pix_from_ascii(rows: &[&str]) -> TestResult<Pix> {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    if width == 0 || height == 0 {
        return Err(TestError::Fixture("empty fixture".to_string()));
    }

    let mut mask = PixMut::new(width as u32, height as u32, PixelDepth::Bit1)
        .map_err(|e| TestError::Fixture(e.to_string()))?;
    for (y, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(TestError::Fixture(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }
        for (x, ch) in row.bytes().enumerate() {
            let bit = match ch {
                b'#' | b'1' | b'X' => 1,
                b'.' | b'0' | b'_' => 0,
                other => {
                    return Err(TestError::Fixture(format!(
                        "unexpected cell {:?} at ({}, {})",
                        other as char, x, y
                    )));
                }
            };
            mask.data_mut()[y * width + x] = bit;
        }
    }
    Ok(mask.into())
}

/// Build an 8 bpp horizontal ramp from 0 (left) to 255 (right).
pub fn gray_ramp(width: u32, height: u32) -> TestResult<Pix> {
    let mut pix =
        PixMut::new(width, height, PixelDepth::Bit8).map_err(|e| TestError::Fixture(e.to_string()))?;
    let span = width.saturating_sub(1).max(1);
    for (i, v) in pix.data_mut().iter_mut().enumerate() {
        let x = i as u32 % width;
        *v = x * 255 / span;
    }
    Ok(pix.into())
}

/// Small deterministic linear congruential generator.
///
/// Constants from Knuth's MMIX; only the high 32 bits are used.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x5DEE_CE66_D1CE_4E5B,
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.state >> 32) as u32
    }

    /// Uniform sample in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

/// Build a random 1 bpp mask where each pixel is foreground with
/// probability `density`.
pub fn random_mask(width: u32, height: u32, density: f64, seed: u64) -> TestResult<Pix> {
    let mut rng = Lcg::new(seed);
    let mut mask =
        PixMut::new(width, height, PixelDepth::Bit1).map_err(|e| TestError::Fixture(e.to_string()))?;
    for v in mask.data_mut() {
        *v = u32::from(rng.next_f64() < density);
    }
    Ok(mask.into())
}

/// Build a random 8 bpp image with uniform intensities.
pub fn random_gray(width: u32, height: u32, seed: u64) -> TestResult<Pix> {
    let mut rng = Lcg::new(seed);
    let mut pix =
        PixMut::new(width, height, PixelDepth::Bit8).map_err(|e| TestError::Fixture(e.to_string()))?;
    for v in pix.data_mut() {
        *v = rng.next_u32() >> 24;
    }
    Ok(pix.into())
}

/// Encode an uncompressed little-endian TIFF with `samples` 8-bit
/// samples per pixel.
///
/// `data` is pixel-interleaved and row-major. More than one sample is
/// tagged as min-is-black gray with unspecified extra samples, which
/// decoders report as a multiband image.
pub fn multiband_tiff(width: u16, height: u16, samples: u16, data: &[u8]) -> TestResult<Vec<u8>> {
    let expected = usize::from(width) * usize::from(height) * usize::from(samples);
    if samples == 0 || data.len() != expected {
        return Err(TestError::Fixture(format!(
            "expected {} bytes for {}x{}x{}, got {}",
            expected,
            width,
            height,
            samples,
            data.len()
        )));
    }

    const SHORT: u16 = 3;
    const LONG: u16 = 4;
    let extra = samples - 1;
    let entries: u16 = if extra > 0 { 11 } else { 10 };
    let ifd_end = 8 + 2 + 12 * u32::from(entries) + 4;
    // Arrays that do not fit in the 4-byte value field live after the IFD
    let bits_offset = ifd_end;
    let bits_len = if samples > 2 { 2 * u32::from(samples) } else { 0 };
    let extra_offset = bits_offset + bits_len;
    let extra_len = if extra > 2 { 2 * u32::from(extra) } else { 0 };
    let strip_offset = extra_offset + extra_len;

    let mut out = Vec::with_capacity(strip_offset as usize + data.len());
    out.extend_from_slice(b"II*\x00");
    out.extend_from_slice(&8u32.to_le_bytes());
    out.extend_from_slice(&entries.to_le_bytes());

    let mut entry = |tag: u16, kind: u16, count: u32, value: u32| {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        out.extend_from_slice(&value.to_le_bytes());
    };
    // Inline SHORT arrays of up to two values
    let inline_shorts = |values: &[u16]| -> u32 {
        values
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &v)| acc | (u32::from(v) << (16 * i)))
    };

    entry(256, SHORT, 1, u32::from(width));
    entry(257, SHORT, 1, u32::from(height));
    let bits_value = if samples > 2 {
        bits_offset
    } else {
        inline_shorts(&vec![8; usize::from(samples)])
    };
    entry(258, SHORT, u32::from(samples), bits_value);
    entry(259, SHORT, 1, 1);
    entry(262, SHORT, 1, 1);
    entry(273, LONG, 1, strip_offset);
    entry(277, SHORT, 1, u32::from(samples));
    entry(278, SHORT, 1, u32::from(height));
    entry(279, LONG, 1, data.len() as u32);
    entry(284, SHORT, 1, 1);
    if extra > 0 {
        let extra_value = if extra > 2 {
            extra_offset
        } else {
            inline_shorts(&vec![0; usize::from(extra)])
        };
        entry(338, SHORT, u32::from(extra), extra_value);
    }
    out.extend_from_slice(&0u32.to_le_bytes());

    if samples > 2 {
        for _ in 0..samples {
            out.extend_from_slice(&8u16.to_le_bytes());
        }
    }
    if extra > 2 {
        for _ in 0..extra {
            out.extend_from_slice(&0u16.to_le_bytes());
        }
    }
    out.extend_from_slice(data);
    Ok(out)
}

/// Reference 4-connected components of the non-zero pixels.
///
/// Breadth-first, one component per unvisited foreground seed in row-major
/// order. Each component lists `(row, col)` pairs sorted row-major.
pub fn reference_components(mask: &Pix) -> Vec<Vec<(u32, u32)>> {
    let w = mask.width() as usize;
    let h = mask.height() as usize;
    let data = mask.data();
    let mut seen = vec![false; w * h];
    let mut components = Vec::new();

    for start in 0..w * h {
        if seen[start] || data[start] == 0 {
            continue;
        }
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut members = Vec::new();
        while let Some(i) = queue.pop_front() {
            members.push(i);
            let (y, x) = (i / w, i % w);
            let mut neighbors = Vec::with_capacity(4);
            if y > 0 {
                neighbors.push(i - w);
            }
            if y + 1 < h {
                neighbors.push(i + w);
            }
            if x > 0 {
                neighbors.push(i - 1);
            }
            if x + 1 < w {
                neighbors.push(i + 1);
            }
            for n in neighbors {
                if !seen[n] && data[n] != 0 {
                    seen[n] = true;
                    queue.push_back(n);
                }
            }
        }
        members.sort_unstable();
        components.push(
            members
                .into_iter()
                .map(|i| ((i / w) as u32, (i % w) as u32))
                .collect(),
        );
    }
    components
}

//! Convolution operations
//!
//! Direct and separable convolution of 8 bpp images, and the Gaussian blur
//! built on top of them.

use crate::{FilterError, FilterResult, Kernel};
use quadbit_core::{Pix, PixMut, PixelDepth};

/// How samples outside the image are synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Repeat the nearest edge pixel (`aaa|abc|ccc`)
    Replicate,
    /// Mirror without repeating the edge pixel (`cb|abc|ba`)
    #[default]
    Reflect101,
}

impl BorderMode {
    /// Map a possibly out-of-range coordinate into `0..n`.
    fn resolve(self, mut i: i32, n: i32) -> usize {
        if n == 1 {
            return 0;
        }
        match self {
            BorderMode::Replicate => i.clamp(0, n - 1) as usize,
            BorderMode::Reflect101 => {
                while i < 0 || i >= n {
                    i = if i < 0 { -i } else { 2 * (n - 1) - i };
                }
                i as usize
            }
        }
    }
}

fn check_gray(pix: &Pix) -> FilterResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Pass `kernel` over `src` (a `w x h` plane) and return the raw sums.
fn convolve_plane(
    src: &[f32],
    w: u32,
    h: u32,
    kernel: &Kernel,
    border: BorderMode,
) -> Vec<f32> {
    let (wi, hi) = (w as i32, h as i32);
    let kcx = kernel.center_x() as i32;
    let kcy = kernel.center_y() as i32;
    let mut out = vec![0.0f32; src.len()];

    for y in 0..hi {
        for x in 0..wi {
            let mut sum = 0.0f32;
            for ky in 0..kernel.height() {
                let sy = border.resolve(y + ky as i32 - kcy, hi);
                for kx in 0..kernel.width() {
                    let sx = border.resolve(x + kx as i32 - kcx, wi);
                    let k = kernel.get(kx, ky).unwrap_or(0.0);
                    sum += src[sy * w as usize + sx] * k;
                }
            }
            out[(y * wi + x) as usize] = sum;
        }
    }
    out
}

fn to_plane(pix: &Pix) -> Vec<f32> {
    pix.data().iter().map(|&v| v as f32).collect()
}

fn from_plane(plane: &[f32], w: u32, h: u32) -> FilterResult<Pix> {
    let mut out = PixMut::new(w, h, PixelDepth::Bit8)?;
    for (dst, &v) in out.data_mut().iter_mut().zip(plane) {
        *dst = v.round().clamp(0.0, 255.0) as u32;
    }
    Ok(out.into())
}

/// Convolve an 8-bit grayscale image with a kernel.
///
/// Results are rounded and clamped to 0..=255.
pub fn convolve(pix: &Pix, kernel: &Kernel, border: BorderMode) -> FilterResult<Pix> {
    check_gray(pix)?;
    let (w, h) = (pix.width(), pix.height());
    let sums = convolve_plane(&to_plane(pix), w, h, kernel, border);
    from_plane(&sums, w, h)
}

/// Separable convolution: `kernel_x` along rows, then `kernel_y` along
/// columns.
///
/// The intermediate pass is kept in floating point, so the result is
/// rounded once.
pub fn convolve_sep(
    pix: &Pix,
    kernel_x: &Kernel,
    kernel_y: &Kernel,
    border: BorderMode,
) -> FilterResult<Pix> {
    check_gray(pix)?;
    let (w, h) = (pix.width(), pix.height());
    let tmp = convolve_plane(&to_plane(pix), w, h, kernel_x, border);
    let sums = convolve_plane(&tmp, w, h, kernel_y, border);
    from_plane(&sums, w, h)
}

/// Apply a `size x size` Gaussian blur.
///
/// `size` must be odd; `sigma == 0` derives sigma from the size. Borders
/// are reflected without repeating the edge pixel. 1 bpp masks are
/// promoted to 0/255 gray first.
///
/// # Examples
///
/// ```
/// use quadbit_core::Pix;
/// use quadbit_filter::gaussian_blur;
///
/// let pix = Pix::from_gray_bytes(3, 3, &[90; 9]).unwrap();
/// let blurred = gaussian_blur(&pix, 5, 0.0).unwrap();
/// assert_eq!(blurred.data(), pix.data());
/// ```
pub fn gaussian_blur(pix: &Pix, size: u32, sigma: f32) -> FilterResult<Pix> {
    let gray = match pix.depth() {
        PixelDepth::Bit8 => pix.clone(),
        PixelDepth::Bit1 => pix.convert_1_to_8(0, 255)?,
        PixelDepth::Bit32 => {
            return Err(FilterError::UnsupportedDepth {
                expected: "1 or 8 bpp",
                actual: 32,
            });
        }
    };
    let kx = Kernel::gaussian_1d(size, sigma)?;
    let ky = kx.transposed();
    convolve_sep(&gray, &kx, &ky, BorderMode::Reflect101)
}

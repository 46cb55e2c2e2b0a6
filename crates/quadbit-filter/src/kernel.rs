//! Convolution kernels
//!
//! Defines kernel structures for image convolution operations.

use crate::{FilterError, FilterResult};

/// Sigma used for a Gaussian of the given size when none is specified.
///
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`, so a 5-tap kernel gets 1.1.
pub fn gaussian_sigma_for_size(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a zeroed kernel with the center in the middle.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be positive: {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![0.0; (width * height) as usize],
        })
    }

    /// Create a kernel from row-major values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for {}x{}, got {}",
                kernel.data.len(),
                width,
                height,
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a normalized horizontal 1D Gaussian kernel (`size x 1`).
    ///
    /// `size` must be odd; `sigma == 0` derives sigma from the size with
    /// [`gaussian_sigma_for_size`].
    pub fn gaussian_1d(size: u32, sigma: f32) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "Gaussian size must be odd and positive, got {}",
                size
            )));
        }
        if sigma.is_nan() || sigma < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "Gaussian sigma must be non-negative, got {}",
                sigma
            )));
        }
        let sigma = if sigma == 0.0 {
            gaussian_sigma_for_size(size)
        } else {
            sigma
        };

        let mut kernel = Self::new(size, 1)?;
        let half = (size / 2) as i32;
        let denom = 2.0 * sigma * sigma;
        for (i, v) in kernel.data.iter_mut().enumerate() {
            let d = (i as i32 - half) as f32;
            *v = (-(d * d) / denom).exp();
        }
        kernel.normalize();
        Ok(kernel)
    }

    /// Create a normalized 2D Gaussian kernel (`size x size`).
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        let row = Self::gaussian_1d(size, sigma)?;
        let mut kernel = Self::new(size, size)?;
        for y in 0..size {
            for x in 0..size {
                kernel.set(x, y, row.data[x as usize] * row.data[y as usize]);
            }
        }
        Ok(kernel)
    }

    /// Swap rows and columns (a `w x 1` kernel becomes `1 x w`).
    pub fn transposed(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for x in 0..self.width {
            for y in 0..self.height {
                data.push(self.data[(y * self.width + x) as usize]);
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cx: self.cy,
            cy: self.cx,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y); out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel summing to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f32::EPSILON {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigma_for_size() {
        assert!((gaussian_sigma_for_size(5) - 1.1).abs() < 1e-6);
        assert!((gaussian_sigma_for_size(3) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_gaussian_1d_normalized_symmetric() {
        let k = Kernel::gaussian_1d(5, 0.0).unwrap();
        assert_eq!((k.width(), k.height()), (5, 1));
        assert_eq!(k.center_x(), 2);
        assert!((k.sum() - 1.0).abs() < 1e-6);
        assert_eq!(k.get(0, 0), k.get(4, 0));
        assert!(k.get(2, 0).unwrap() > k.get(1, 0).unwrap());
    }

    #[test]
    fn test_gaussian_rejects_bad_params() {
        assert!(Kernel::gaussian_1d(4, 1.0).is_err());
        assert!(Kernel::gaussian_1d(0, 1.0).is_err());
        assert!(matches!(
            Kernel::gaussian_1d(5, -1.0),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_gaussian_2d_and_transpose() {
        let k = Kernel::gaussian(3, 1.0).unwrap();
        assert!((k.sum() - 1.0).abs() < 1e-5);
        let row = Kernel::gaussian_1d(3, 1.0).unwrap();
        let col = row.transposed();
        assert_eq!((col.width(), col.height()), (1, 3));
        assert_eq!((col.center_x(), col.center_y()), (0, 1));
        assert_eq!(col.get(0, 2), row.get(2, 0));
    }

    #[test]
    fn test_from_slice_checks_length() {
        let k = Kernel::from_slice(3, 1, &[1.0, 2.0, 1.0]).unwrap();
        assert_eq!((k.center_x(), k.center_y()), (1, 0));
        assert_eq!(k.sum(), 4.0);
        assert!(Kernel::from_slice(2, 2, &[1.0; 3]).is_err());
        assert!(Kernel::new(0, 1).is_err());
    }
}

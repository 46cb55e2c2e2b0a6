//! Multi-band rasters
//!
//! A [`BandStack`] holds any number of equally sized 8 bpp planes, one per
//! sample of the source image. It is what multispectral files decode to,
//! since a [`Pix`] packs at most four samples per pixel.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Equally sized 8 bpp bands, in sample order
#[derive(Debug, Clone)]
pub struct BandStack {
    bands: Vec<Pix>,
}

impl BandStack {
    /// Wrap a list of bands.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] if the list is empty and
    /// [`Error::DimensionMismatch`] or [`Error::UnsupportedDepth`] if the
    /// bands are not all 8 bpp images of the same size.
    pub fn new(bands: Vec<Pix>) -> Result<Self> {
        let first = bands
            .first()
            .ok_or_else(|| Error::InvalidImage("band stack has no bands".to_string()))?;
        let expected = (first.width(), first.height());
        for band in &bands {
            if band.depth() != PixelDepth::Bit8 {
                return Err(Error::UnsupportedDepth(band.depth().bits()));
            }
            let actual = (band.width(), band.height());
            if actual != expected {
                return Err(Error::DimensionMismatch { expected, actual });
            }
        }
        Ok(Self { bands })
    }

    /// Split pixel-interleaved 8-bit samples into bands.
    ///
    /// `data` holds `samples` bytes per pixel, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] for a zero-area image, zero samples
    /// or a buffer of the wrong length.
    pub fn from_interleaved(width: u32, height: u32, samples: usize, data: &[u8]) -> Result<Self> {
        if samples == 0 {
            return Err(Error::InvalidImage("image has no samples".to_string()));
        }
        let mut planes = (0..samples)
            .map(|_| PixMut::new(width, height, PixelDepth::Bit8))
            .collect::<Result<Vec<_>>>()?;
        let area = width as usize * height as usize;
        if data.len() != area * samples {
            return Err(Error::InvalidImage(format!(
                "expected {} samples for {width}x{height}x{samples}, got {}",
                area * samples,
                data.len()
            )));
        }
        for (i, px) in data.chunks_exact(samples).enumerate() {
            for (plane, &v) in planes.iter_mut().zip(px) {
                plane.data_mut()[i] = u32::from(v);
            }
        }
        Ok(Self {
            bands: planes.into_iter().map(Pix::from).collect(),
        })
    }

    /// Decompose a single image with [`Pix::split_bands`].
    pub fn from_pix(pix: &Pix) -> Result<Self> {
        Ok(Self {
            bands: pix.split_bands()?,
        })
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Always false: a stack holds at least one band.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.bands[0].width()
    }

    pub fn height(&self) -> u32 {
        self.bands[0].height()
    }

    pub fn band(&self, index: usize) -> Option<&Pix> {
        self.bands.get(index)
    }

    pub fn bands(&self) -> &[Pix] {
        &self.bands
    }

    pub fn into_bands(self) -> Vec<Pix> {
        self.bands
    }

    /// Compose a displayable image from the leading bands.
    ///
    /// One or two bands give the first band as gray (a second band is
    /// taken as alpha and dropped). Three bands give RGB, four RGBA.
    /// Wider stacks use their first three bands as RGB.
    pub fn to_pix(&self) -> Result<Pix> {
        let n = self.bands.len();
        if n < 3 {
            return Ok(self.bands[0].clone());
        }

        let mut out = PixMut::new(self.width(), self.height(), PixelDepth::Bit32)?;
        let (r, g, b) = (&self.bands[0], &self.bands[1], &self.bands[2]);
        let alpha = if n == 4 { Some(&self.bands[3]) } else { None };
        out.set_spp(if alpha.is_some() { 4 } else { 3 });
        for (i, dst) in out.data_mut().iter_mut().enumerate() {
            let a = alpha.map_or(255, |a| a.data()[i] as u8);
            *dst = color::compose_rgba(
                r.data()[i] as u8,
                g.data()[i] as u8,
                b.data()[i] as u8,
                a,
            );
        }
        Ok(out.into())
    }
}

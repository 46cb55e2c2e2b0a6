//! JPEG image format support
//!
//! Reads baseline and progressive JPEG through `jpeg-decoder` and writes
//! through `jpeg-encoder`. Grayscale decodes to an 8 bpp `Pix`, color to
//! 32 bpp RGB. 16-bit grayscale keeps its high byte. CMYK is rejected.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use quadbit_core::{BandStack, ImageFormat, Pix, PixelDepth, color};
use std::io::{Read, Write};

/// Default quality for [`write_jpeg`].
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image as one band per component.
pub fn read_jpeg_bands<R: Read>(reader: R) -> IoResult<BandStack> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG has no frame header".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let stack = match info.pixel_format {
        PixelFormat::L8 => BandStack::from_interleaved(width, height, 1, &data)?,
        PixelFormat::RGB24 => BandStack::from_interleaved(width, height, 3, &data)?,
        PixelFormat::L16 => {
            // Big-endian samples; keep the high byte
            let high: Vec<u8> = data.chunks_exact(2).map(|s| s[0]).collect();
            BandStack::from_interleaved(width, height, 1, &high)?
        }
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat(
                "CMYK JPEG is not supported".to_string(),
            ));
        }
    };
    Ok(stack)
}

/// Read a JPEG image
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut pix = read_jpeg_bands(reader)?.to_pix()?.to_mut();
    pix.set_informat(ImageFormat::Jpeg);
    Ok(pix.into())
}

/// Write a JPEG image
///
/// 8 bpp images are written as grayscale and 32 bpp color as RGB (alpha
/// is dropped). 1 bpp masks are written as 0/255 gray.
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(pix.width())
        .map_err(|_| IoError::InvalidData(format!("JPEG width {} too large", pix.width())))?;
    let height = u16::try_from(pix.height())
        .map_err(|_| IoError::InvalidData(format!("JPEG height {} too large", pix.height())))?;

    let (color_type, bytes): (ColorType, Vec<u8>) = match (pix.depth(), pix.spp()) {
        (PixelDepth::Bit1, _) | (PixelDepth::Bit8, _) => {
            let gray = pix.convert_to_gray8()?;
            (ColorType::Luma, gray.data().iter().map(|&v| v as u8).collect())
        }
        (PixelDepth::Bit32, 3 | 4) => {
            let mut rgb = Vec::with_capacity(pix.area() * 3);
            for &pixel in pix.data() {
                let (r, g, b) = color::extract_rgb(pixel);
                rgb.extend_from_slice(&[r, g, b]);
            }
            (ColorType::Rgb, rgb)
        }
        (PixelDepth::Bit32, spp) => {
            return Err(IoError::InvalidData(format!(
                "cannot encode 32 bpp image with {} samples per pixel",
                spp
            )));
        }
    };

    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(&bytes, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}

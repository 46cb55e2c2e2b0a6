//! TIFF image format support
//!
//! Reads the first page of a TIFF through the `tiff` crate. Every sample
//! becomes its own 8 bpp band, so multispectral files with more than four
//! samples per pixel keep all of their bands. 16-bit samples keep their
//! high byte; 1, 2 and 4 bit grayscale is scaled to 0..=255.

use crate::{IoError, IoResult};
use quadbit_core::{BandStack, ImageFormat, Pix};
use std::io::{Read, Seek};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

/// Photometric value meaning "0 is white"
const WHITE_IS_ZERO: u32 = 0;

fn decode_err(what: &str, e: tiff::TiffError) -> IoError {
    IoError::DecodeError(format!("TIFF {}: {}", what, e))
}

/// Read the first page of a TIFF as one band per sample.
pub fn read_tiff_bands<R: Read + Seek>(reader: R) -> IoResult<BandStack> {
    let mut decoder = Decoder::new(reader).map_err(|e| decode_err("header", e))?;
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| decode_err("dimensions", e))?;
    let color_type = decoder.colortype().map_err(|e| decode_err("color type", e))?;
    let white_is_zero = decoder
        .get_tag_u32(Tag::PhotometricInterpretation)
        .is_ok_and(|v| v == WHITE_IS_ZERO);

    let (bits, samples) = match color_type {
        ColorType::Gray(bits) => (bits, 1),
        ColorType::GrayA(bits) => (bits, 2),
        ColorType::RGB(bits) => (bits, 3),
        ColorType::RGBA(bits) | ColorType::CMYK(bits) => (bits, 4),
        ColorType::Multiband {
            bit_depth,
            num_samples,
        } => (bit_depth, usize::from(num_samples)),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                other
            )));
        }
    };

    let image = decoder.read_image().map_err(|e| decode_err("image data", e))?;
    let mut bytes = match (image, bits) {
        (DecodingResult::U8(data), 8) => data,
        (DecodingResult::U8(data), 1 | 2 | 4) if samples == 1 => {
            unpack_gray(&data, width, height, bits)
        }
        (DecodingResult::U16(data), _) => data.iter().map(|&v| (v >> 8) as u8).collect(),
        (_, bits) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF sample format: {} bits, {} samples",
                bits, samples
            )));
        }
    };
    if white_is_zero && samples == 1 {
        for v in &mut bytes {
            *v = 255 - *v;
        }
    }

    Ok(BandStack::from_interleaved(width, height, samples, &bytes)?)
}

/// Read the first page of a TIFF image
///
/// Stacks wider than four bands are reduced to RGB from their first three
/// bands; use [`read_tiff_bands`] to keep every band.
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Pix> {
    let mut pix = read_tiff_bands(reader)?.to_pix()?.to_mut();
    pix.set_informat(ImageFormat::Tiff);
    Ok(pix.into())
}

/// Expand packed 1/2/4 bit gray rows to one byte per pixel in 0..=255.
fn unpack_gray(data: &[u8], width: u32, height: u32, bits: u8) -> Vec<u8> {
    let bits = u32::from(bits);
    let per_byte = 8 / bits;
    let max = (1u32 << bits) - 1;
    let row_bytes = width.div_ceil(per_byte) as usize;
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for row in data.chunks(row_bytes).take(height as usize) {
        for x in 0..width {
            let byte = u32::from(row.get((x / per_byte) as usize).copied().unwrap_or(0));
            let shift = 8 - bits * (x % per_byte + 1);
            let v = (byte >> shift) & max;
            out.push((v * 255 / max) as u8);
        }
    }
    out
}

//! PNG image format support
//!
//! Decoding normalizes every PNG flavor to 8 bits per sample: palettes are
//! expanded to RGB(A), sub-byte grayscale is scaled to 0..=255 and 16-bit
//! samples keep their high byte. Gray and gray+alpha images become 8 bpp
//! `Pix` (alpha dropped), color images become 32 bpp with 3 or 4 samples.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use quadbit_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let (pix_depth, spp, samples) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit8, 1, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pix_mut = PixMut::new(width, height, pix_depth)?;
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let w = width as usize;
    for (y, row) in pix_mut.data_mut().chunks_exact_mut(w).enumerate() {
        let src = &data[y * bytes_per_row..y * bytes_per_row + w * samples];
        for (dst, px) in row.iter_mut().zip(src.chunks_exact(samples)) {
            *dst = match color_type {
                ColorType::Rgb => color::compose_rgb(px[0], px[1], px[2]),
                ColorType::Rgba => color::compose_rgba(px[0], px[1], px[2], px[3]),
                _ => u32::from(px[0]),
            };
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 1 bpp masks are written as 1-bit grayscale, 8 bpp as 8-bit grayscale
/// and 32 bpp color as RGB or RGBA. Label maps (32 bpp, one sample) must
/// be normalized to 8 bpp first.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth, bytes_per_row) = match (pix.depth(), pix.spp()) {
        (PixelDepth::Bit1, _) => (ColorType::Grayscale, BitDepth::One, width.div_ceil(8)),
        (PixelDepth::Bit8, _) => (ColorType::Grayscale, BitDepth::Eight, width),
        (PixelDepth::Bit32, 4) => (ColorType::Rgba, BitDepth::Eight, width * 4),
        (PixelDepth::Bit32, 3) => (ColorType::Rgb, BitDepth::Eight, width * 3),
        (PixelDepth::Bit32, spp) => {
            return Err(IoError::InvalidData(format!(
                "cannot encode 32 bpp image with {} samples per pixel",
                spp
            )));
        }
    };
    let bytes_per_row = bytes_per_row as usize;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for (y, dst) in data.chunks_exact_mut(bytes_per_row).enumerate() {
        let src = pix.row_data(y as u32);
        match color_type {
            ColorType::Grayscale if bit_depth == BitDepth::One => {
                for (x, &val) in src.iter().enumerate() {
                    if val != 0 {
                        dst[x / 8] |= 1 << (7 - (x % 8));
                    }
                }
            }
            ColorType::Grayscale => {
                for (d, &val) in dst.iter_mut().zip(src) {
                    *d = val as u8;
                }
            }
            ColorType::Rgb => {
                for (d, &pixel) in dst.chunks_exact_mut(3).zip(src) {
                    let (r, g, b) = color::extract_rgb(pixel);
                    d.copy_from_slice(&[r, g, b]);
                }
            }
            _ => {
                for (d, &pixel) in dst.chunks_exact_mut(4).zip(src) {
                    let (r, g, b, a) = color::extract_rgba(pixel);
                    d.copy_from_slice(&[r, g, b, a]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = PixMut::new(10, 10, PixelDepth::Bit8).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert_eq!(pix2.informat(), ImageFormat::Png);
        assert_eq!(pix2.data(), pix.data());
    }

    #[test]
    fn test_png_mask_decodes_to_full_range() {
        let mut mask = PixMut::new(9, 2, PixelDepth::Bit1).unwrap();
        mask.set_pixel(0, 0, 1).unwrap();
        mask.set_pixel(8, 1, 1).unwrap();
        let mask: Pix = mask.into();

        let mut buffer = Vec::new();
        write_png(&mask, &mut buffer).unwrap();
        let gray = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(gray.depth(), PixelDepth::Bit8);
        assert_eq!(gray.get_pixel(0, 0), Some(255));
        assert_eq!(gray.get_pixel(8, 1), Some(255));
        assert_eq!(gray.count_pixels(), 2);
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = PixMut::new(5, 5, PixelDepth::Bit32).unwrap();
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.spp(), 3);
        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
    }

    #[test]
    fn test_png_rejects_label_map() {
        let mut labels = PixMut::new(2, 2, PixelDepth::Bit32).unwrap();
        labels.set_spp(1);
        let labels: Pix = labels.into();
        let mut buffer = Vec::new();
        assert!(matches!(
            write_png(&labels, &mut buffer),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_png_garbage() {
        let data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
        assert!(matches!(
            read_png(Cursor::new(data)),
            Err(IoError::DecodeError(_))
        ));
    }
}

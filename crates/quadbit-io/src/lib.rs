//! quadbit-io - Image I/O for the quadbit pipeline
//!
//! Reads input images and writes pipeline artifacts. Formats are detected
//! by their magic bytes; each codec sits behind a feature, all on by
//! default:
//!
//! | Format | Feature | Read | Write |
//! |--------|---------|------|-------|
//! | PNG | `png-format` | yes | yes |
//! | JPEG | `jpeg-format` | yes | yes |
//! | TIFF | `tiff-format` | yes | no |
//!
//! [`read_bands`] keeps every sample of the file as its own band, which
//! matters for multispectral TIFFs with more than four samples per pixel.
//!
//! # Examples
//!
//! ```no_run
//! use quadbit_io::{ImageFormat, load_gray, write_image};
//!
//! let gray = load_gray("scan.png").unwrap();
//! write_image(&gray, "copy.png", ImageFormat::Png).unwrap();
//! ```

mod error;
pub mod format;
#[cfg(feature = "jpeg-format")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use quadbit_core::ImageFormat;

use quadbit_core::{BandStack, Pix};
use std::fs;
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// - [`IoError::Io`] if the file cannot be read
/// - [`IoError::UnsupportedFormat`] for formats without a decoder
/// - [`IoError::DecodeError`] for corrupt data
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = fs::read(path.as_ref())?;
    read_image_mem(&data)
}

/// Read an image from an in-memory encoded buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data)),
        #[cfg(feature = "jpeg-format")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff(std::io::Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "no decoder for {:?}",
            other
        ))),
    }
}

/// Read an image from a file path as one 8 bpp band per sample.
///
/// TIFF and JPEG keep their native sample count. Other formats go
/// through [`read_image`] and [`Pix::split_bands`].
pub fn read_bands<P: AsRef<Path>>(path: P) -> IoResult<BandStack> {
    let data = fs::read(path.as_ref())?;
    read_bands_mem(&data)
}

/// In-memory variant of [`read_bands`].
pub fn read_bands_mem(data: &[u8]) -> IoResult<BandStack> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff_bands(std::io::Cursor::new(data)),
        #[cfg(feature = "jpeg-format")]
        ImageFormat::Jpeg => jpeg::read_jpeg_bands(data),
        _ => Ok(BandStack::from_pix(&read_image_mem(data)?)?),
    }
}

/// Write an image to a file path.
///
/// Parent directories are not created.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let data = write_image_mem(pix, format)?;
    fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Encode an image into a byte buffer.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => {
            let mut buffer = Vec::new();
            png::write_png(pix, &mut buffer)?;
            Ok(buffer)
        }
        #[cfg(feature = "jpeg-format")]
        ImageFormat::Jpeg => {
            let mut buffer = Vec::new();
            jpeg::write_jpeg(pix, &mut buffer, jpeg::DEFAULT_JPEG_QUALITY)?;
            Ok(buffer)
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "no encoder for {:?}",
            other
        ))),
    }
}

/// Read an image and reduce it to 8 bpp grayscale.
///
/// Color images are converted with the ITU-R 601-2 luminance weights.
pub fn load_gray<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    Ok(read_image(path)?.convert_to_gray8()?)
}

/// In-memory variant of [`load_gray`].
pub fn load_gray_mem(data: &[u8]) -> IoResult<Pix> {
    Ok(read_image_mem(data)?.convert_to_gray8()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadbit_core::{PixMut, PixelDepth};

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            read_image("/nonexistent/quadbit/input.png"),
            Err(IoError::Io(_))
        ));
    }

    #[test]
    fn test_unsupported_decoder() {
        let bmp = b"BM\x00\x00\x00\x00\x00\x00";
        assert!(matches!(
            read_image_mem(bmp),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_bands_mem(bmp),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_encoder() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            write_image_mem(&pix, ImageFormat::Tiff),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_bands_mem_png_rgb() {
        let mut rgb = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        rgb.set_rgb(0, 0, 1, 2, 3).unwrap();
        rgb.set_rgb(1, 0, 4, 5, 6).unwrap();
        let encoded = write_image_mem(&rgb.into(), ImageFormat::Png).unwrap();
        let bands = read_bands_mem(&encoded).unwrap();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands.band(2).unwrap().data(), &[3, 6]);
    }

    #[cfg(feature = "jpeg-format")]
    #[test]
    fn test_jpeg_through_generic_reader() {
        let gray = Pix::from_gray_bytes(8, 8, &[60; 64]).unwrap();
        let encoded = write_image_mem(&gray, ImageFormat::Jpeg).unwrap();
        assert_eq!(
            detect_format_from_bytes(&encoded).unwrap(),
            ImageFormat::Jpeg
        );
        let back = load_gray_mem(&encoded).unwrap();
        assert_eq!((back.width(), back.height()), (8, 8));
        assert!(back.data().iter().all(|&v| v.abs_diff(60) <= 3));
    }

    #[test]
    fn test_load_gray_mem_from_color() {
        let mut rgb = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        rgb.set_rgb(0, 0, 255, 255, 255).unwrap();
        rgb.set_rgb(1, 0, 0, 255, 0).unwrap();
        let encoded = write_image_mem(&rgb.into(), ImageFormat::Png).unwrap();
        let gray = load_gray_mem(&encoded).unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit8);
        assert_eq!(gray.data(), &[255, 149]);
    }
}

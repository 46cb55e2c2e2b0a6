//! PNG I/O regression test
//!
//! Round-trips synthetic images through files on disk.

use quadbit_core::{Pix, PixMut, PixelDepth, binarize};
use quadbit_io::{ImageFormat, detect_format, load_gray, read_image, write_image};
use quadbit_test::{RegParams, gray_ramp, random_mask, regout_dir};
use std::fs;

#[test]
fn pngio_reg() {
    let mut rp = RegParams::new("pngio");

    let outdir = regout_dir();
    fs::create_dir_all(&outdir).expect("Failed to create output directory");

    // 8 bpp gray is lossless
    let ramp = gray_ramp(64, 8).unwrap();
    let path = format!("{}/pngio_gray.png", outdir);
    write_image(&ramp, &path, ImageFormat::Png).unwrap();
    rp.check(detect_format(&path).unwrap() == ImageFormat::Png, "format detection");
    let back = read_image(&path).unwrap();
    rp.compare_pix(&ramp, &back);

    // 1 bpp masks come back as 0/255 gray and re-binarize to the same mask
    let mask = random_mask(33, 17, 0.3, 11).unwrap();
    let path = format!("{}/pngio_mask.png", outdir);
    write_image(&mask, &path, ImageFormat::Png).unwrap();
    let gray = load_gray(&path).unwrap();
    rp.check(gray.depth() == PixelDepth::Bit8, "mask decodes to 8 bpp");
    rp.compare_pix(&mask, &binarize(&gray, 128).unwrap());

    // RGB reduces to luminance
    let mut rgb = PixMut::new(3, 1, PixelDepth::Bit32).unwrap();
    rgb.set_rgb(0, 0, 255, 0, 0).unwrap();
    rgb.set_rgb(1, 0, 0, 255, 0).unwrap();
    rgb.set_rgb(2, 0, 0, 0, 255).unwrap();
    let path = format!("{}/pngio_rgb.png", outdir);
    write_image(&Pix::from(rgb), &path, ImageFormat::Png).unwrap();
    let lum = load_gray(&path).unwrap();
    rp.compare_pix(&Pix::from_gray_bytes(3, 1, &[76, 149, 29]).unwrap(), &lum);

    assert!(rp.cleanup());
}

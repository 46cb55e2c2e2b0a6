//! Binarization and histogram regression test
//!
//! Thresholds synthetic gray images and checks mask and histogram
//! invariants.

use quadbit_core::{DEFAULT_THRESHOLD, Pix, PixelDepth, binarize};
use quadbit_test::{RegParams, gray_ramp, random_gray};

// ========================================================================
// Test: thresholding a ramp
// ========================================================================

#[test]
fn threshold_reg_ramp() {
    let mut rp = RegParams::new("threshold_ramp");

    let ramp = gray_ramp(256, 4).unwrap();
    let mask = binarize(&ramp, DEFAULT_THRESHOLD).unwrap();
    rp.write_pix(&mask).unwrap();

    rp.check(mask.depth() == PixelDepth::Bit1, "mask depth");
    rp.check(mask.width() == 256 && mask.height() == 4, "mask geometry");
    // Columns 128..=255 are at or above the threshold
    rp.compare_values(128.0 * 4.0, mask.count_pixels() as f64, 0.0);
    rp.compare_values(0.0, f64::from(mask.get_pixel(127, 0).unwrap()), 0.0);
    rp.compare_values(1.0, f64::from(mask.get_pixel(128, 3).unwrap()), 0.0);

    for t in [0u32, 1, 80, 200, 255] {
        let m = binarize(&ramp, t).unwrap();
        let expected = ramp.data().iter().filter(|&&v| v >= t).count();
        rp.compare_values(expected as f64, m.count_pixels() as f64, 0.0);
    }

    assert!(rp.cleanup());
}

// ========================================================================
// Test: histogram invariants
// ========================================================================

#[test]
fn threshold_reg_histogram() {
    let mut rp = RegParams::new("threshold_histo");

    let pix = random_gray(37, 23, 42).unwrap();
    let hist = pix.gray_histogram().unwrap();
    rp.compare_values(37.0 * 23.0, hist.total() as f64, 0.0);

    // Same multiset of values in reverse scan order
    let mut reversed: Vec<u8> = pix.data().iter().map(|&v| v as u8).collect();
    reversed.reverse();
    let flipped = Pix::from_gray_bytes(37, 23, &reversed).unwrap();
    rp.check(
        flipped.gray_histogram().unwrap() == hist,
        "histogram is scan-order invariant",
    );

    let mask = binarize(&pix, DEFAULT_THRESHOLD).unwrap();
    let mhist = mask.gray_histogram().unwrap();
    rp.compare_values(mask.count_pixels() as f64, mhist.get(1).unwrap() as f64, 0.0);
    rp.compare_values(2.0, mhist.nonzero_bins() as f64, 0.0);

    assert!(rp.cleanup());
}

//! Compound image regression test
//!
//! Checks output geometry for both strides and that every block in the
//! output is a 0/255 copy of the mask block at its anchor.

use quadbit_transform::{build_compound, compound_size};
use quadbit_test::{RegParams, random_mask};

#[test]
fn compound_reg() {
    let mut rp = RegParams::new("compound");

    for (seed, (w, h)) in [(4u32, 4u32), (9, 7), (16, 11), (2, 2)].into_iter().enumerate() {
        let mask = random_mask(w, h, 0.5, seed as u64).unwrap();
        for overlap in [false, true] {
            let stride = if overlap { 1 } else { 2 };
            let out = build_compound(&mask, overlap).unwrap().unwrap();
            let expected = compound_size(w, h, stride).unwrap();
            rp.compare_values(expected.0 as f64, out.width() as f64, 0.0);
            rp.compare_values(expected.1 as f64, out.height() as f64, 0.0);

            let mut ok = true;
            for by in 0..out.height() / 2 {
                for bx in 0..out.width() / 2 {
                    let (i, j) = (by * stride, bx * stride);
                    for d in 0..4u32 {
                        let (dy, dx) = (d / 2, d % 2);
                        let src = mask.get_pixel(j + dx, i + dy).unwrap_or(0) * 255;
                        ok &= out.get_pixel(bx * 2 + dx, by * 2 + dy) == Some(src);
                    }
                }
            }
            rp.check(ok, "blocks copy the mask at their anchors");
            rp.check(
                out.data().iter().all(|&v| v == 0 || v == 255),
                "compound values are 0 or 255",
            );
            if seed == 1 {
                rp.write_pix(&out).unwrap();
            }
        }
    }

    assert!(rp.cleanup());
}

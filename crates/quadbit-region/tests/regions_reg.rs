//! Region regression test
//!
//! Cross-checks flood-fill detection and union-find labeling against a
//! reference BFS on random masks, and checks quadrant coverage:
//!   (1) regions are disjoint and cover every foreground pixel
//!   (2) labeling count matches the number of detected regions
//!   (3) quadrant crops see exactly the pixels inside their boxes

use quadbit_region::{detect_regions, label_connected_components, partition};
use quadbit_test::{RegParams, pix_from_ascii, random_mask, reference_components};

#[test]
fn regions_reg_random() {
    let mut rp = RegParams::new("regions_random");

    for seed in 0..6 {
        let density = 0.3 + 0.08 * seed as f64;
        let mask = random_mask(37, 29, density, seed).unwrap();

        let mut found: Vec<Vec<(u32, u32)>> = detect_regions(&mask)
            .unwrap()
            .into_iter()
            .map(|r| {
                let mut px = r.pixels().to_vec();
                px.sort_unstable();
                px
            })
            .collect();
        found.sort();
        let mut expected = reference_components(&mask);
        expected.sort();
        rp.check(found == expected, "flood fill matches reference BFS");

        let total: usize = found.iter().map(Vec::len).sum();
        rp.compare_values(mask.count_pixels() as f64, total as f64, 0.0);

        let (labeled, count) =
            label_connected_components(&mask).unwrap();
        rp.compare_values(expected.len() as f64, count as f64, 0.0);
        if seed == 0 {
            rp.write_pix(&labeled).unwrap();
        }
    }

    assert!(rp.cleanup());
}

#[test]
fn regions_reg_quadrants() {
    let mut rp = RegParams::new("regions_quadrants");

    let mask = pix_from_ascii(&[
        "##......",
        "##......",
        "......##",
        "...##.##",
        "...##...",
        "........",
        "#......#",
        "#......#",
    ])
    .unwrap();

    // Without overlap the center blob is split across TL, TR, BL and BR
    let parts = partition(&mask, false, 0).unwrap();
    let counts: Vec<usize> = parts.iter().map(|(_, r)| r.len()).collect();
    rp.check(counts == [2, 2, 2], "non-overlap region counts");

    // With margin 1 every box reaches one pixel past the center
    let parts = partition(&mask, true, 1).unwrap();
    for (quadrant, regions) in &parts {
        let inside = (quadrant.row_start..quadrant.row_end)
            .flat_map(|r| (quadrant.col_start..quadrant.col_end).map(move |c| (r, c)))
            .filter(|&(r, c)| mask.get_pixel(c, r) == Some(1))
            .count();
        let covered: usize = regions.iter().map(|r| r.len()).sum();
        rp.compare_values(inside as f64, covered as f64, 0.0);
        for region in regions {
            let global = quadrant.to_image_coords(region);
            rp.check(
                global.pixels().iter().all(|&(r, c)| mask.get_pixel(c, r) == Some(1)),
                "translated region stays on foreground",
            );
        }
    }

    assert!(rp.cleanup());
}

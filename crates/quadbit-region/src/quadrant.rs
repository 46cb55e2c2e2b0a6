//! Quadrant partitioning
//!
//! Splits a mask into three boxes (top-left, top-right, bottom-left) and
//! runs region detection on each crop independently. The bottom-right
//! quarter is never processed. In overlap mode each box grows by a margin
//! towards the image center, clamped to the image.

use crate::error::{RegionError, RegionResult};
use crate::regions::{Region, detect_regions};
use quadbit_core::{Box, Pix};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default overlap margin in pixels.
pub const DEFAULT_MARGIN: i32 = 10;

/// Which quadrant a box covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadrantPosition {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl QuadrantPosition {
    /// Processing order.
    pub const ALL: [QuadrantPosition; 3] = [
        QuadrantPosition::TopLeft,
        QuadrantPosition::TopRight,
        QuadrantPosition::BottomLeft,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QuadrantPosition::TopLeft => "top_left",
            QuadrantPosition::TopRight => "top_right",
            QuadrantPosition::BottomLeft => "bottom_left",
        }
    }
}

/// A quadrant bounding box over the full image; ends are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quadrant {
    pub position: QuadrantPosition,
    pub row_start: u32,
    pub col_start: u32,
    pub row_end: u32,
    pub col_end: u32,
}

impl Quadrant {
    pub fn height(&self) -> u32 {
        self.row_end.saturating_sub(self.row_start)
    }

    pub fn width(&self) -> u32 {
        self.col_end.saturating_sub(self.col_start)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// The same rectangle as a [`Box`] (`x` = column, `y` = row).
    pub fn to_box(&self) -> Box {
        Box::new_unchecked(
            self.col_start as i32,
            self.row_start as i32,
            self.width() as i32,
            self.height() as i32,
        )
    }

    /// Map a region detected in this quadrant's crop to full-image
    /// coordinates.
    pub fn to_image_coords(&self, region: &Region) -> Region {
        region.translated(self.row_start, self.col_start)
    }
}

/// Compute the three quadrant boxes for a `rows x cols` image.
///
/// Without overlap: TL = rows `[0, r/2)` x cols `[0, c/2)`, TR = rows
/// `[0, r/2)` x cols `[c/2, c)`, BL = rows `[r/2, r)` x cols `[0, c/2)`.
/// With overlap each inner edge moves outward by `margin`, clamped to the
/// image.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] for a negative margin.
pub fn quadrant_boxes(
    rows: u32,
    cols: u32,
    overlap: bool,
    margin: i32,
) -> RegionResult<[Quadrant; 3]> {
    if margin < 0 {
        return Err(RegionError::InvalidParameters(format!(
            "overlap margin must be non-negative, got {}",
            margin
        )));
    }
    let m = if overlap { margin as i64 } else { 0 };
    let (r, c) = (i64::from(rows), i64::from(cols));
    let (hr, hc) = (r / 2, c / 2);

    let clamp_r = |v: i64| v.clamp(0, r) as u32;
    let clamp_c = |v: i64| v.clamp(0, c) as u32;
    let quad = |position, r0: i64, c0: i64, r1: i64, c1: i64| Quadrant {
        position,
        row_start: clamp_r(r0),
        col_start: clamp_c(c0),
        row_end: clamp_r(r1),
        col_end: clamp_c(c1),
    };

    Ok([
        quad(QuadrantPosition::TopLeft, 0, 0, hr + m, hc + m),
        quad(QuadrantPosition::TopRight, 0, hc - m, hr + m, c),
        quad(QuadrantPosition::BottomLeft, hr - m, 0, r, hc + m),
    ])
}

/// Partition a mask into quadrants and detect regions in each.
///
/// Returns exactly three entries in the order TL, TR, BL. Region
/// coordinates are local to each quadrant's crop; a blob straddling
/// overlapping quadrants is reported once per quadrant it touches. An
/// empty quadrant yields an empty region list.
pub fn partition(
    mask: &Pix,
    overlap: bool,
    margin: i32,
) -> RegionResult<Vec<(Quadrant, Vec<Region>)>> {
    let boxes = quadrant_boxes(mask.height(), mask.width(), overlap, margin)?;

    let mut out = Vec::with_capacity(boxes.len());
    for quadrant in boxes {
        let regions = match mask.clip_box(&quadrant.to_box())? {
            Some(crop) => detect_regions(&crop)?,
            None => Vec::new(),
        };
        debug!(
            quadrant = quadrant.position.name(),
            rows = quadrant.height(),
            cols = quadrant.width(),
            regions = regions.len(),
            "quadrant processed"
        );
        out.push((quadrant, regions));
    }
    Ok(out)
}

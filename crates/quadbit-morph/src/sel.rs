//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Every element here is a set of hit positions around an
//! origin; the parametric shapes put the origin at the center.

use crate::{MorphError, MorphResult};

/// Structuring Element (SEL)
///
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<bool>,
}

fn check_radius(radius: u32, shape: &str) -> MorphResult<()> {
    if radius == 0 {
        return Err(MorphError::InvalidParameters(format!(
            "{} radius must be positive",
            shape
        )));
    }
    Ok(())
}

impl Sel {
    /// Create a new empty structuring element with a centered origin
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive: {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![false; (width * height) as usize],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(true);
        Ok(sel)
    }

    /// Create a square of side `2 * radius + 1` with all hits
    pub fn create_square(radius: u32) -> MorphResult<Self> {
        check_radius(radius, "square")?;
        let side = 2 * radius + 1;
        Self::create_brick(side, side)
    }

    /// Create a plus-shaped element with arms of length `radius`
    ///
    /// Radius 1 gives the 3x3 cross.
    pub fn create_cross(radius: u32) -> MorphResult<Self> {
        check_radius(radius, "cross")?;
        let side = 2 * radius + 1;
        let mut sel = Self::new(side, side)?;
        for i in 0..side {
            sel.set_element(radius, i, true);
            sel.set_element(i, radius, true);
        }
        Ok(sel)
    }

    /// Create a disc: all offsets with `dx^2 + dy^2 <= radius^2`
    pub fn create_disc(radius: u32) -> MorphResult<Self> {
        check_radius(radius, "disc")?;
        let side = 2 * radius + 1;
        let r = radius as i64;
        let mut sel = Self::new(side, side)?;
        for y in 0..side {
            for x in 0..side {
                let dx = x as i64 - r;
                let dy = y as i64 - r;
                sel.set_element(x, y, dx * dx + dy * dy <= r * r);
            }
        }
        Ok(sel)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set an element at (x, y); out-of-range positions are ignored
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, hit: bool) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = hit;
        }
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &hit)| {
                if hit {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }
}

//! Box - Rectangle regions
//!
//! Axis-aligned rectangles in image coordinates, used for quadrant
//! bounding boxes and crop regions.

use serde::{Deserialize, Serialize};

/// A rectangle region
///
/// A small `Copy` type; `(x, y)` is the top-left corner (column, row),
/// `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Compute the intersection of two boxes
    ///
    /// `None` if they do not share at least one pixel.
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Box {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Box::new_unchecked(1, 2, 4, 6);
        assert_eq!(b.right(), 5);
        assert_eq!(b.bottom(), 8);
    }

    #[test]
    fn test_intersect() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        let b = Box::new_unchecked(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Box::new_unchecked(5, 5, 5, 5)));
        let c = Box::new_unchecked(10, 0, 3, 3);
        assert_eq!(a.intersect(&c), None);
        let empty = Box::new_unchecked(2, 2, 0, 4);
        assert_eq!(a.intersect(&empty), None);
    }
}

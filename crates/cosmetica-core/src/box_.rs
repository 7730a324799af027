//! Box - Rectangle regions
//!
//! A [`Box`] selects a rectangular area of an image, e.g. the region that
//! [`PixView::statistics`](crate::PixView::statistics) should summarize.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A simple `Copy` type; coordinates may extend past the image and are
/// clipped with [`Box::clip_to`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

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

    /// Area in pixels (0 for degenerate boxes)
    #[inline]
    pub fn area(&self) -> u64 {
        if self.w <= 0 || self.h <= 0 {
            0
        } else {
            self.w as u64 * self.h as u64
        }
    }

    /// Intersect with the image rectangle `[0, width) x [0, height)`.
    ///
    /// Returns `None` if nothing of the box lies inside the image.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Box> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.w)).min(i64::from(width));
        let y1 = (i64::from(self.y) + i64::from(self.h)).min(i64::from(height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Box {
            x: x0 as i32,
            y: y0 as i32,
            w: (x1 - x0) as i32,
            h: (y1 - y0) as i32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_new_rejects_negative() {
        assert!(Box::new(0, 0, -1, 4).is_err());
        let b = Box::new(2, 3, 4, 5).unwrap();
        assert_eq!(b.right(), 6);
        assert_eq!(b.bottom(), 8);
        assert_eq!(b.area(), 20);
    }

    #[test]
    fn test_clip_inside() {
        let b = Box::new_unchecked(1, 1, 3, 3);
        assert_eq!(b.clip_to(10, 10), Some(b));
    }

    #[test]
    fn test_clip_partial() {
        let b = Box::new_unchecked(-2, 8, 5, 5);
        assert_eq!(b.clip_to(10, 10), Some(Box::new_unchecked(0, 8, 3, 2)));
    }

    #[test]
    fn test_clip_outside() {
        assert_eq!(Box::new_unchecked(12, 0, 3, 3).clip_to(10, 10), None);
        assert_eq!(Box::new_unchecked(0, 0, 0, 3).clip_to(10, 10), None);
    }
}

//! Pixel access functions
//!
//! Bounds-checked getters and setters for individual samples and rows.

use super::{Pix, PixView, PixViewMut};
use crate::error::{Error, Result};
use crate::sample::Sample;

impl<'a, T: Sample> PixView<'a, T> {
    /// Flat row-major index of an in-bounds coordinate.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get one row of samples.
    ///
    /// Returns `None` if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        Some(&self.data[start..start + self.width as usize])
    }

    /// Iterate over the rows top to bottom.
    pub fn rows(self) -> impl Iterator<Item = &'a [T]> {
        self.data.chunks_exact(self.width as usize)
    }
}

impl<'a, T: Sample> PixViewMut<'a, T> {
    /// Get a pixel value at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<T> {
        self.as_view().get_pixel(x, y)
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: T) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x: i64::from(x),
                y: i64::from(y),
                width: self.width,
                height: self.height,
            });
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = val;
        Ok(())
    }

    /// Get one row of samples mutably.
    ///
    /// Returns `None` if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [T]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = (y as usize) * w;
        Some(&mut self.data[start..start + w])
    }
}

impl<T: Sample> Pix<T> {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<T> {
        self.view().get_pixel(x, y)
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: T) -> Result<()> {
        self.view_mut().set_pixel(x, y, val)
    }

    /// Get one row of samples.
    pub fn row(&self, y: u32) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = (y as usize) * w;
        Some(&self.data[start..start + w])
    }
}

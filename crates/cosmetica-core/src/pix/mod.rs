//! PIX - Single-channel pixel buffers
//!
//! The engine works on one single-channel image at a time, stored row-major
//! as a flat slice of [`Sample`]s.
//!
//! # Ownership model
//!
//! The buffer always belongs to the caller. [`PixView`] and [`PixViewMut`]
//! borrow a caller-owned slice and attach the `width x height` geometry to
//! it, so every 2-D access goes through bounds-checked accessors instead of
//! ad-hoc `x + y * w` arithmetic. [`Pix`] is a small owned container for
//! callers (and tests) that do not already have a buffer of their own; it
//! hands out views via [`Pix::view`] and [`Pix::view_mut`].

mod access;
pub mod statistics;

pub use statistics::{ImageStats, StatsRequest};

use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::scratch;

/// Validate dimensions against a sample slice length.
fn check_geometry(width: u32, height: u32, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InvalidDimension { width, height })?;
    if expected != len {
        return Err(Error::BufferSizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Owned single-channel image.
///
/// # Examples
///
/// ```
/// use cosmetica_core::Pix;
///
/// let pix: Pix<u16> = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.get_pixel(10, 10), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pix<T: Sample = u16> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Sample> Pix<T> {
    /// Create a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::AllocationFailed`] if the sample buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, T::default())
    }

    /// Create an image with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, value: T) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        let data = scratch::try_filled(len, value)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing row-major sample vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        check_geometry(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the raw row-major samples.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get the raw row-major samples mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Borrow the image as a read-only view.
    #[inline]
    pub fn view(&self) -> PixView<'_, T> {
        PixView {
            data: &self.data,
            width: self.width,
            height: self.height,
        }
    }

    /// Borrow the image as a mutable view.
    #[inline]
    pub fn view_mut(&mut self) -> PixViewMut<'_, T> {
        PixViewMut {
            data: &mut self.data,
            width: self.width,
            height: self.height,
        }
    }
}

/// Read-only 2-D view over a caller-owned sample slice.
#[derive(Debug, Clone, Copy)]
pub struct PixView<'a, T: Sample = u16> {
    data: &'a [T],
    width: u32,
    height: u32,
}

impl<'a, T: Sample> PixView<'a, T> {
    /// Attach `width x height` geometry to a row-major slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferSizeMismatch`] if the slice length does not match.
    pub fn new(data: &'a [T], width: u32, height: u32) -> Result<Self> {
        check_geometry(width, height, data.len())?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the underlying samples.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }
}

/// Mutable 2-D view over a caller-owned sample slice.
#[derive(Debug)]
pub struct PixViewMut<'a, T: Sample = u16> {
    data: &'a mut [T],
    width: u32,
    height: u32,
}

impl<'a, T: Sample> PixViewMut<'a, T> {
    /// Attach `width x height` geometry to a mutable row-major slice.
    ///
    /// # Errors
    ///
    /// Same as [`PixView::new`].
    pub fn new(data: &'a mut [T], width: u32, height: u32) -> Result<Self> {
        check_geometry(width, height, data.len())?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reborrow as a read-only view.
    #[inline]
    pub fn as_view(&self) -> PixView<'_, T> {
        PixView {
            data: &*self.data,
            width: self.width,
            height: self.height,
        }
    }

    /// Get the underlying samples.
    #[inline]
    pub fn data(&self) -> &[T] {
        &*self.data
    }

    /// Get the underlying samples mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_new() {
        let pix: Pix<u16> = Pix::new(100, 50).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 50);
        assert_eq!(pix.data().len(), 5000);
        assert!(pix.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pix_invalid_dimensions() {
        assert!(matches!(
            Pix::<u16>::new(0, 10),
            Err(Error::InvalidDimension { width: 0, height: 10 })
        ));
        assert!(Pix::<u16>::new(10, 0).is_err());
    }

    #[test]
    fn test_pix_from_vec_size_mismatch() {
        let err = Pix::from_vec(4, 4, vec![0u16; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_view_over_caller_buffer() {
        let mut buf = vec![1u16, 2, 3, 4, 5, 6];
        {
            let view = PixView::new(&buf, 3, 2).unwrap();
            assert_eq!(view.width(), 3);
            assert_eq!(view.height(), 2);
            assert_eq!(view.data()[4], 5);
        }
        let mut view = PixViewMut::new(&mut buf, 3, 2).unwrap();
        view.data_mut()[0] = 9;
        assert_eq!(view.as_view().data()[0], 9);
        assert_eq!(buf[0], 9);
    }

    #[test]
    fn test_view_rejects_bad_geometry() {
        let buf = vec![0u16; 6];
        assert!(PixView::new(&buf, 4, 2).is_err());
        assert!(PixView::new(&buf, 0, 2).is_err());
    }
}

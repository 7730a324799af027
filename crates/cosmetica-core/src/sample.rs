//! Pixel sample types
//!
//! A [`Sample`] is one unsigned integer value of a single-channel image.
//! All arithmetic on samples happens in `f64`; conversion back to the
//! integer type only happens when a result is written into a buffer.

use std::fmt::Debug;

/// An unsigned integer pixel sample.
///
/// Implemented for `u8`, `u16` (the usual 16-bit sensor depth) and `u32`.
pub trait Sample: Copy + Ord + Default + Debug + Send + Sync + Into<f64> + 'static {
    /// Largest representable sample value.
    const MAX: Self;

    /// Number of bits per sample.
    const BITS: u32;

    /// Widen the sample to `f64`.
    #[inline]
    fn to_f64(self) -> f64 {
        self.into()
    }

    /// Largest representable value as `f64`.
    #[inline]
    fn max_f64() -> f64 {
        Self::MAX.into()
    }

    /// Convert an `f64` back to a sample.
    ///
    /// Rounds half away from zero and clamps to `[0, MAX]`. NaN maps to 0.
    fn from_f64_round(value: f64) -> Self;

    /// Lossless widening to `u64`, used for exact integer differences.
    fn to_u64(self) -> u64;
}

macro_rules! impl_sample {
    ($t:ty) => {
        impl Sample for $t {
            const MAX: Self = <$t>::MAX;
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn from_f64_round(value: f64) -> Self {
                if value.is_nan() || value <= 0.0 {
                    return 0;
                }
                let rounded = value.round();
                if rounded >= <$t>::MAX as f64 {
                    <$t>::MAX
                } else {
                    rounded as $t
                }
            }

            #[inline]
            fn to_u64(self) -> u64 {
                u64::from(self)
            }
        }
    };
}

impl_sample!(u8);
impl_sample!(u16);
impl_sample!(u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(u16::from_f64_round(2.5), 3);
        assert_eq!(u16::from_f64_round(2.4999), 2);
        assert_eq!(u16::from_f64_round(3.5), 4);
    }

    #[test]
    fn test_round_clamps_to_range() {
        assert_eq!(u16::from_f64_round(-12.0), 0);
        assert_eq!(u16::from_f64_round(70000.0), u16::MAX);
        assert_eq!(u8::from_f64_round(255.4), 255);
        assert_eq!(u8::from_f64_round(f64::NAN), 0);
        assert_eq!(u32::from_f64_round(f64::INFINITY), u32::MAX);
    }

    #[test]
    fn test_widening() {
        assert_eq!(u16::MAX.to_f64(), 65535.0);
        assert_eq!(<u8 as Sample>::max_f64(), 255.0);
        assert_eq!(40000u16.to_u64(), 40000);
        assert_eq!(<u16 as Sample>::BITS, 16);
    }
}

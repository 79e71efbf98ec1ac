//! Wavelet filter taps and the arithmetic the kernels perform with them.

use std::fmt::Debug;
use std::ops::Add;

use crate::WaveletError;

/// A filter tap type.
///
/// Floating point taps accumulate in `f32`. Integer taps accumulate in `i32` and the
/// sums are divided by the tap set's divisor, rounding half up.
pub trait Tap: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Type the weighted sums are accumulated in
    type Acc: Copy + Debug + PartialEq + Add<Output = Self::Acc>;

    const ZERO: Self::Acc;
    const ONE: Self;

    /// Weight `sample` by this tap
    fn weigh(self, sample: Self::Acc) -> Self::Acc;

    /// Scale an accumulated sum by the tap set's divisor
    fn normalize(sum: Self::Acc, divisor: Self) -> Self::Acc;

    /// Whether this value can divide an accumulated sum
    fn is_valid_divisor(self) -> bool;

    /// Whether weighted sums of 16 bit samples by `taps` fit in [`Tap::Acc`]
    fn fits_accumulator(taps: &[Self]) -> bool;
}

impl Tap for f32 {
    type Acc = f32;

    const ZERO: f32 = 0.0;
    const ONE: f32 = 1.0;

    fn weigh(self, sample: f32) -> f32 {
        self * sample
    }

    fn normalize(sum: f32, divisor: f32) -> f32 {
        sum / divisor
    }

    fn is_valid_divisor(self) -> bool {
        self.is_finite() && self > 0.0
    }

    fn fits_accumulator(taps: &[f32]) -> bool {
        taps.iter().all(|t| t.is_finite())
    }
}

impl Tap for i32 {
    type Acc = i32;

    const ZERO: i32 = 0;
    const ONE: i32 = 1;

    fn weigh(self, sample: i32) -> i32 {
        self * sample
    }

    fn normalize(sum: i32, divisor: i32) -> i32 {
        (sum + divisor / 2).div_euclid(divisor)
    }

    fn is_valid_divisor(self) -> bool {
        self > 0
    }

    /// The sum of the tap magnitudes is limited to 2^15, so a full `i16` line
    /// stays below 2^30 and the rounding term of [`Tap::normalize`] can not overflow.
    fn fits_accumulator(taps: &[i32]) -> bool {
        let gain: u64 = taps.iter().map(|t| u64::from(t.unsigned_abs())).sum();
        gain <= 1 << 15
    }
}

/// A pixel type that can be read into, and written from, the accumulator `A`
pub trait Sample<A>: Copy + Default + Debug + Send + Sync + 'static {
    fn widen(self) -> A;

    /// Convert an accumulated value back, saturating for integer pixels
    fn narrow(value: A) -> Self;
}

impl Sample<f32> for f32 {
    fn widen(self) -> f32 {
        self
    }

    fn narrow(value: f32) -> Self {
        value
    }
}

impl Sample<i32> for u8 {
    fn widen(self) -> i32 {
        i32::from(self)
    }

    fn narrow(value: i32) -> Self {
        value.clamp(0, i32::from(u8::MAX)) as u8
    }
}

impl Sample<i32> for i16 {
    fn widen(self) -> i32 {
        i32::from(self)
    }

    fn narrow(value: i32) -> Self {
        value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
    }
}

/// The scaling and wavelet taps of one transform direction.
///
/// Output pair `j` of a forward pass is computed from the input window starting at
/// `2j + offset_scaling` for the scaling value and at `2j + offset_wavelet` for the
/// wavelet value. In an inverse pass the offsets give where, relative to `2j`, the
/// contribution of coefficient `j` starts.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletCoefficients<T> {
    scaling: Vec<T>,
    wavelet: Vec<T>,
    offset_scaling: isize,
    offset_wavelet: isize,
    divisor_scaling: T,
    divisor_wavelet: T,
}

impl<T: Tap> WaveletCoefficients<T> {
    pub fn new(
        scaling: Vec<T>,
        offset_scaling: isize,
        wavelet: Vec<T>,
        offset_wavelet: isize,
    ) -> Result<Self, WaveletError> {
        Self::with_divisors(
            scaling,
            offset_scaling,
            T::ONE,
            wavelet,
            offset_wavelet,
            T::ONE,
        )
    }

    /// Create a coefficient set whose sums are divided by the given divisors.
    ///
    /// Divisors have to be positive. Integer taps are limited to a total magnitude of
    /// 2^15 so that no sum overflows.
    pub fn with_divisors(
        scaling: Vec<T>,
        offset_scaling: isize,
        divisor_scaling: T,
        wavelet: Vec<T>,
        offset_wavelet: isize,
        divisor_wavelet: T,
    ) -> Result<Self, WaveletError> {
        if scaling.is_empty()
            || wavelet.is_empty()
            || !divisor_scaling.is_valid_divisor()
            || !divisor_wavelet.is_valid_divisor()
            || !T::fits_accumulator(&scaling)
            || !T::fits_accumulator(&wavelet)
        {
            return Err(WaveletError::InvalidCoefficients);
        }
        Ok(Self {
            scaling,
            wavelet,
            offset_scaling,
            offset_wavelet,
            divisor_scaling,
            divisor_wavelet,
        })
    }

    /// Build from constant tables which are known to be valid
    pub(crate) fn from_table(
        (scaling, offset_scaling, divisor_scaling): (&[T], isize, T),
        (wavelet, offset_wavelet, divisor_wavelet): (&[T], isize, T),
    ) -> Self {
        debug_assert!(!scaling.is_empty() && !wavelet.is_empty());
        Self {
            scaling: scaling.to_vec(),
            wavelet: wavelet.to_vec(),
            offset_scaling,
            offset_wavelet,
            divisor_scaling,
            divisor_wavelet,
        }
    }

    pub fn scaling(&self) -> &[T] {
        &self.scaling
    }

    pub fn wavelet(&self) -> &[T] {
        &self.wavelet
    }

    pub fn offset_scaling(&self) -> isize {
        self.offset_scaling
    }

    pub fn offset_wavelet(&self) -> isize {
        self.offset_wavelet
    }

    pub fn divisor_scaling(&self) -> T {
        self.divisor_scaling
    }

    pub fn divisor_wavelet(&self) -> T {
        self.divisor_wavelet
    }

    /// Length of the longer of the two tap sequences
    pub fn max_length(&self) -> usize {
        self.scaling.len().max(self.wavelet.len())
    }

    /// Smallest offset of either tap sequence
    pub(crate) fn first_offset(&self) -> isize {
        self.offset_scaling.min(self.offset_wavelet)
    }

    /// Largest offset, relative to `2j`, touched by either tap sequence
    pub(crate) fn last_offset(&self) -> isize {
        let scaling = self.offset_scaling + self.scaling.len() as isize - 1;
        let wavelet = self.offset_wavelet + self.wavelet.len() as isize - 1;
        scaling.max(wavelet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_taps() {
        assert_eq!(
            WaveletCoefficients::<f32>::new(vec![], 0, vec![1.0], 0),
            Err(WaveletError::InvalidCoefficients)
        );
        assert_eq!(
            WaveletCoefficients::with_divisors(vec![1], 0, 0, vec![1], 0, 1),
            Err(WaveletError::InvalidCoefficients)
        );
    }

    #[test]
    fn test_rejects_negative_divisors() {
        assert_eq!(
            WaveletCoefficients::with_divisors(vec![1, 2, 1], 0, -8, vec![1], 0, 1),
            Err(WaveletError::InvalidCoefficients)
        );
        assert_eq!(
            WaveletCoefficients::with_divisors(vec![1.0f32], 0, 1.0, vec![1.0], 0, -2.0),
            Err(WaveletError::InvalidCoefficients)
        );
        assert!(WaveletCoefficients::with_divisors(vec![1, 2, 1], 0, 4, vec![1], 0, 1).is_ok());
    }

    #[test]
    fn test_rejects_overflowing_taps() {
        assert_eq!(
            WaveletCoefficients::with_divisors(vec![i32::MAX, 1], 0, 1, vec![1], 0, 1),
            Err(WaveletError::InvalidCoefficients)
        );
        assert_eq!(
            WaveletCoefficients::with_divisors(vec![1], 0, 1, vec![20_000, -20_000], 0, 1),
            Err(WaveletError::InvalidCoefficients)
        );
        assert!(
            WaveletCoefficients::with_divisors(vec![1 << 14, 1 << 14], 0, 1, vec![1], 0, 1)
                .is_ok()
        );
        assert_eq!(
            WaveletCoefficients::new(vec![f32::NAN], 0, vec![1.0], 0),
            Err(WaveletError::InvalidCoefficients)
        );
    }

    #[test]
    fn test_offsets() {
        let coef = WaveletCoefficients::new(vec![1.0f32; 5], -2, vec![1.0; 3], 0).unwrap();
        assert_eq!(coef.max_length(), 5);
        assert_eq!(coef.first_offset(), -2);
        assert_eq!(coef.last_offset(), 2);
    }

    #[test]
    fn test_integer_rounding() {
        assert_eq!(i32::normalize(12, 8), 2);
        assert_eq!(i32::normalize(11, 8), 1);
        assert_eq!(i32::normalize(-4, 8), 0);
        assert_eq!(i32::normalize(-5, 8), -1);
        assert_eq!(i32::normalize(-3, 2), -1);
    }

    #[test]
    fn test_narrow_saturates() {
        assert_eq!(<u8 as Sample<i32>>::narrow(300), 255);
        assert_eq!(<u8 as Sample<i32>>::narrow(-3), 0);
        assert_eq!(<i16 as Sample<i32>>::narrow(40_000), i16::MAX);
        assert_eq!(<i16 as Sample<i32>>::narrow(-7), -7);
    }
}

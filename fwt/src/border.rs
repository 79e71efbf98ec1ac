//! Border handling for the wavelet kernels.
//!
//! Near the ends of a line the filter support leaves the signal. The border rule
//! decides which sample stands in for an out of range index and how wide the bands
//! are that need that treatment.
//!
//! Forward passes work on a signal of even length. An odd signal is treated as if it
//! had one more sample, equal to its last one, so its transform is one sample longer.

use std::ops::Range;

use crate::coef::{Tap, WaveletCoefficients};

/// Direction of a transform pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Decomposition of a signal into scaling and wavelet coefficients
    Forward,
    /// Reconstruction of a signal from its coefficients
    Inverse,
}

/// Boundary extension policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderRule {
    /// The signal repeats with a period of its (even) length
    Periodic,
    /// The signal is mirrored about its first and last samples, `-1 -> 1`
    Reflect,
}

impl BorderRule {
    /// Map `index` onto `0..len`
    pub fn map(&self, index: isize, len: usize) -> usize {
        debug_assert!(len > 0);
        match self {
            BorderRule::Periodic => index.rem_euclid(len as isize) as usize,
            BorderRule::Reflect => {
                if len == 1 {
                    return 0;
                }
                let period = 2 * len - 2;
                let r = index.rem_euclid(period as isize) as usize;
                if r < len {
                    r
                } else {
                    period - r
                }
            }
        }
    }

    /// Index of the sample read for position `index` of a `len` sample signal.
    ///
    /// Positions are mapped over the padded, even length, the padding sample reads
    /// the last real sample.
    pub(crate) fn sample_index(&self, index: isize, len: usize) -> usize {
        self.map(index, len + len % 2).min(len - 1)
    }

    /// Index of the coefficient read for position `index` of a `half` long band
    pub(crate) fn coefficient_index(&self, index: isize, half: usize) -> usize {
        self.map(index, half)
    }

    /// Number of samples at the start of a line that need border handling.
    ///
    /// Forward widths are measured in input samples, which is twice the number of
    /// output pairs they cover. Inverse widths are measured in reconstructed samples.
    pub fn lower<T: Tap>(&self, coef: &WaveletCoefficients<T>, direction: Direction) -> usize {
        match direction {
            Direction::Forward => {
                let reach = (-coef.first_offset()).max(0) as usize;
                2 * ((reach + 1) / 2)
            }
            Direction::Inverse => coef.last_offset().max(0) as usize,
        }
    }

    /// Number of samples at the end of a line that need border handling.
    ///
    /// `len` is the length of the line being read: the input signal for a forward pass,
    /// the transformed line for an inverse pass.
    pub fn upper<T: Tap>(
        &self,
        coef: &WaveletCoefficients<T>,
        direction: Direction,
        len: usize,
    ) -> usize {
        match direction {
            Direction::Forward => {
                let padded = len + len % 2;
                let last = len as isize - 1 - coef.last_offset();
                let inner_end = if last < 0 {
                    0
                } else {
                    (last as usize / 2 + 1).min(padded / 2)
                };
                padded - 2 * inner_end
            }
            Direction::Inverse => (-coef.first_offset()).max(0) as usize,
        }
    }

    /// Output indices computed without border handling.
    ///
    /// For a forward pass these are pair indices out of `len.div_ceil(2)`, for an
    /// inverse pass sample indices out of `count`, which can be one less than `len`.
    pub(crate) fn inner<T: Tap>(
        &self,
        coef: &WaveletCoefficients<T>,
        direction: Direction,
        len: usize,
        count: usize,
    ) -> Range<usize> {
        let (lower, upper) = match direction {
            Direction::Forward => {
                let pairs = (len + len % 2) / 2;
                let lower = self.lower(coef, direction) / 2;
                let upper = self.upper(coef, direction, len) / 2;
                (lower, pairs.saturating_sub(upper))
            }
            Direction::Inverse => (
                self.lower(coef, direction),
                len.saturating_sub(self.upper(coef, direction, len)),
            ),
        };
        let start = lower.min(count);
        let end = upper.min(count).max(start);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bior53() -> (WaveletCoefficients<f32>, WaveletCoefficients<f32>) {
        let forward = WaveletCoefficients::new(
            vec![-0.125, 0.25, 0.75, 0.25, -0.125],
            -2,
            vec![-0.5, 1.0, -0.5],
            0,
        )
        .unwrap();
        let inverse = WaveletCoefficients::new(
            vec![0.5, 1.0, 0.5],
            -1,
            vec![-0.125, -0.25, 0.75, -0.25, -0.125],
            -1,
        )
        .unwrap();
        (forward, inverse)
    }

    #[test]
    fn test_periodic_map() {
        let rule = BorderRule::Periodic;
        assert_eq!(rule.map(-1, 6), 5);
        assert_eq!(rule.map(-7, 6), 5);
        assert_eq!(rule.map(6, 6), 0);
        assert_eq!(rule.map(3, 6), 3);
    }

    #[test]
    fn test_reflect_map() {
        let rule = BorderRule::Reflect;
        let expected = [(-3, 3), (-2, 2), (-1, 1), (0, 0), (4, 4), (5, 3), (6, 2)];
        for (index, mapped) in expected.iter() {
            assert_eq!(rule.map(*index, 5), *mapped, "index {}", index);
        }
        assert_eq!(rule.map(-4, 1), 0);
    }

    #[test]
    fn test_padding_sample() {
        // 5 samples are padded to 6, the sixth reads the fifth
        assert_eq!(BorderRule::Periodic.sample_index(5, 5), 4);
        assert_eq!(BorderRule::Periodic.sample_index(6, 5), 0);
        assert_eq!(BorderRule::Periodic.sample_index(-1, 5), 4);
        assert_eq!(BorderRule::Reflect.sample_index(5, 5), 4);
        assert_eq!(BorderRule::Reflect.sample_index(6, 5), 4);
        assert_eq!(BorderRule::Reflect.sample_index(7, 5), 3);
    }

    #[test]
    fn test_forward_widths() {
        let (forward, _) = bior53();
        let rule = BorderRule::Periodic;
        assert_eq!(rule.lower(&forward, Direction::Forward), 2);
        // pairs 0..=4 of a 10 sample signal read up to 2j + 2 <= 9 for j <= 3
        assert_eq!(rule.upper(&forward, Direction::Forward, 10), 2);
        assert_eq!(rule.upper(&forward, Direction::Forward, 11), 2);
        assert_eq!(rule.inner(&forward, Direction::Forward, 10, 5), 1..4);
        assert_eq!(rule.inner(&forward, Direction::Forward, 3, 2), 1..1);
    }

    #[test]
    fn test_inverse_widths() {
        let (_, inverse) = bior53();
        let rule = BorderRule::Periodic;
        assert_eq!(rule.lower(&inverse, Direction::Inverse), 3);
        assert_eq!(rule.upper(&inverse, Direction::Inverse, 12), 1);
        assert_eq!(rule.inner(&inverse, Direction::Inverse, 12, 12), 3..11);
        assert_eq!(rule.inner(&inverse, Direction::Inverse, 12, 11), 3..11);
        assert_eq!(rule.inner(&inverse, Direction::Inverse, 2, 2), 2..2);
    }
}

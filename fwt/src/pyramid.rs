//! Geometry of a multi level transform.
//!
//! Every level is stored in the top left corner of the previous one. Level 1 covers
//! the whole transform, level `k + 1` covers the region [`half_even`] of level `k`.
//! Both the forward and the inverse multi level transforms walk the same chain.

use crate::WaveletError;

/// The bands of one transform level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubBand {
    /// Scaling horizontal, scaling vertical
    LL,
    /// Wavelet horizontal, scaling vertical
    HL,
    /// Scaling horizontal, wavelet vertical
    LH,
    /// Wavelet horizontal, wavelet vertical
    HH,
}

/// Region of one level inside the transform buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PyramidLevel {
    /// 1 based level number
    pub level: usize,
    pub width: usize,
    pub height: usize,
}

impl PyramidLevel {
    /// The `(x, y, width, height)` rectangle of `band` inside this level
    pub fn subband(&self, band: SubBand) -> (usize, usize, usize, usize) {
        let half_w = self.width / 2;
        let half_h = self.height / 2;
        match band {
            SubBand::LL => (0, 0, half_w, half_h),
            SubBand::HL => (half_w, 0, half_w, half_h),
            SubBand::LH => (0, half_h, half_w, half_h),
            SubBand::HH => (half_w, half_h, half_w, half_h),
        }
    }
}

/// Dimensions of the transform of a `width` x `height` image
pub fn transform_size(width: usize, height: usize) -> (usize, usize) {
    (width + width % 2, height + height % 2)
}

/// Half of `d`, rounded up to an even number
pub fn half_even(d: usize) -> usize {
    let half = d / 2;
    half + half % 2
}

/// The regions of the first `n` levels of a `width` x `height` image.
///
/// Fails when a region can not be split any further, that is when a level would be
/// as large as the one before it.
pub fn levels(width: usize, height: usize, n: usize) -> Result<Vec<PyramidLevel>, WaveletError> {
    let (w, h) = transform_size(width, height);
    let mismatch = || WaveletError::ShapeMismatch {
        input: (width, height),
        output: (w, h),
        levels: n,
    };
    if n == 0 {
        return Err(mismatch());
    }

    let mut chain = Vec::with_capacity(n);
    let mut current = PyramidLevel {
        level: 1,
        width: w,
        height: h,
    };
    chain.push(current);
    for level in 2..=n {
        let next = PyramidLevel {
            level,
            width: half_even(current.width),
            height: half_even(current.height),
        };
        if next.width >= current.width || next.height >= current.height {
            return Err(mismatch());
        }
        chain.push(next);
        current = next;
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_even() {
        assert_eq!(half_even(22), 12);
        assert_eq!(half_even(12), 6);
        assert_eq!(half_even(8), 4);
        assert_eq!(half_even(6), 4);
        assert_eq!(half_even(4), 2);
        assert_eq!(half_even(2), 2);
    }

    #[test]
    fn test_levels_odd_width() {
        let chain = levels(21, 16, 2).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(
            chain[0],
            PyramidLevel {
                level: 1,
                width: 22,
                height: 16
            }
        );
        assert_eq!(chain[1].width, 12);
        assert_eq!(chain[1].height, 8);
        // scaling band of the second level
        let (_, _, w, h) = chain[1].subband(SubBand::LL);
        assert_eq!(w, 21usize.div_ceil(2).div_ceil(2));
        assert_eq!(h, 4);
    }

    #[test]
    fn test_levels_rejects_degenerate_chain() {
        assert!(levels(8, 8, 3).is_ok());
        assert_eq!(
            levels(4, 40, 3),
            Err(WaveletError::ShapeMismatch {
                input: (4, 40),
                output: (4, 40),
                levels: 3
            })
        );
        assert!(levels(8, 8, 0).is_err());
    }

    #[test]
    fn test_subbands_tile_level() {
        let level = PyramidLevel {
            level: 1,
            width: 10,
            height: 6,
        };
        assert_eq!(level.subband(SubBand::LL), (0, 0, 5, 3));
        assert_eq!(level.subband(SubBand::HL), (5, 0, 5, 3));
        assert_eq!(level.subband(SubBand::LH), (0, 3, 5, 3));
        assert_eq!(level.subband(SubBand::HH), (5, 3, 5, 3));
    }
}

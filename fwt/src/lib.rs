//! Fast Wavelet Transform for 2D images
//!
//! This crate implements single level and multi level separable discrete wavelet
//! transforms over single band images.
//!
//! A single level transform breaks the image up into four regions:
//!
//! | | |
//! |---|---|
//! | a | h |
//! | v | d |
//!
//! Region `a` is the scaling image, `h` and `v` are a combination of scaling and
//! wavelet, and `d` is a combination of the horizontal and vertical wavelets. When a
//! multi level transform is performed the input to the next level is the `a` region
//! of the previous level, which always sits in the top left corner.
//!
//! Every pass is computed by one of three interchangeable [`kernel`] strategies. The
//! [`transform`] entry points use the simple reference kernel on small images and split
//! the work into an inner region and its borders on larger ones.

use std::error;
use std::fmt;

mod border;
mod coef;
mod description;
pub mod factory;
mod image;
pub mod kernel;
pub mod pyramid;
pub mod transform;

pub use border::{BorderRule, Direction};
pub use coef::{Sample, Tap, WaveletCoefficients};
pub use description::WaveletDescription;
pub use image::{Image, ImageView, ImageViewMut};
pub use pyramid::{PyramidLevel, SubBand};
pub use transform::{
    inverse1, inverse_n, transform1, transform1_u8, transform_n, transform_n_preserving,
};

/// Error values that may be returned by the transform entry points and image views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveletError {
    /// Shape mismatch.
    ///
    /// The input and output dimensions are not a forward/inverse pair, or they
    /// cannot be decomposed over the requested number of levels.
    ShapeMismatch {
        input: (usize, usize),
        output: (usize, usize),
        levels: usize,
    },

    /// Buffer too small.
    ///
    /// The wavelet support is larger than the image it is applied to.
    BufferTooSmall {
        width: usize,
        height: usize,
        taps: usize,
    },

    /// Storage size mismatch.
    ///
    /// A caller supplied scratch image does not have the required dimensions.
    StorageSizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Invalid coefficients.
    ///
    /// A tap sequence is empty, a divisor is not positive, or integer taps are large
    /// enough to overflow their sums.
    InvalidCoefficients,

    /// The border rule can not reconstruct filters with this much support.
    UnsupportedBorder { border: BorderRule, taps: usize },

    /// The sample buffer does not hold `width * height` samples.
    DataLength { expected: usize, actual: usize },

    /// A view was requested outside of its parent.
    OutOfBounds,

    /// Two views which need to agree in size do not.
    ViewSizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl error::Error for WaveletError {}
impl fmt::Display for WaveletError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                input,
                output,
                levels,
            } => {
                write!(
                    f,
                    "{}x{} and {}x{} are not a valid {} level transform pair",
                    input.0, input.1, output.0, output.1, levels
                )
            }
            Self::BufferTooSmall {
                width,
                height,
                taps,
            } => {
                write!(
                    f,
                    "wavelet with {} taps is too large for a {}x{} image",
                    taps, width, height
                )
            }
            Self::StorageSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "storage needs to be {}x{} not {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::InvalidCoefficients => {
                write!(f, "wavelet taps must be non-empty with positive divisors")
            }
            Self::UnsupportedBorder { border, taps } => {
                write!(
                    f,
                    "{:?} border does not support filters with {} taps",
                    border, taps
                )
            }
            Self::DataLength { expected, actual } => {
                write!(f, "expected {} samples, got {}", expected, actual)
            }
            Self::OutOfBounds => write!(f, "view out of bounds"),
            Self::ViewSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "view needs to be {}x{} not {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WaveletError::StorageSizeMismatch {
            expected: (8, 6),
            actual: (8, 5),
        };
        assert_eq!(err.to_string(), "storage needs to be 8x6 not 8x5");

        let err = WaveletError::ShapeMismatch {
            input: (21, 4),
            output: (21, 4),
            levels: 1,
        };
        assert_eq!(
            err.to_string(),
            "21x4 and 21x4 are not a valid 1 level transform pair"
        );
    }
}

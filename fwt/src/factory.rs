//! Ready made wavelet descriptions.
//!
//! Every description produced here reconstructs its input exactly (up to floating
//! point error) when its forward and inverse passes are chained.

use std::f32::consts::FRAC_1_SQRT_2;

use crate::border::BorderRule;
use crate::coef::WaveletCoefficients;
use crate::description::WaveletDescription;

/// Daubechies 4 tap scaling filter
pub mod daubechies4_taps {
    /// (1 + √3) / 4√2
    pub const H0: f32 = 0.482_962_9;
    /// (3 + √3) / 4√2
    pub const H1: f32 = 0.836_516_3;
    /// (3 - √3) / 4√2
    pub const H2: f32 = 0.224_143_87;
    /// (1 - √3) / 4√2
    pub const H3: f32 = -0.129_409_52;
}

/// Haar wavelet, orthonormal.
///
/// The support never leaves a pair of samples so the reflect rule is only ever
/// asked for the padding sample of odd images.
pub fn haar() -> WaveletDescription<f32> {
    let taps = WaveletCoefficients::from_table(
        (&[FRAC_1_SQRT_2, FRAC_1_SQRT_2], 0, 1.0),
        (&[FRAC_1_SQRT_2, -FRAC_1_SQRT_2], 0, 1.0),
    );
    WaveletDescription::from_parts(BorderRule::Reflect, taps.clone(), taps)
}

/// Daubechies wavelet with 4 taps and a periodic border.
///
/// The filter bank is orthonormal so the inverse uses the same taps.
pub fn daubechies4() -> WaveletDescription<f32> {
    use daubechies4_taps::*;

    let taps = WaveletCoefficients::from_table(
        (&[H0, H1, H2, H3], 0, 1.0),
        (&[H3, -H2, H1, -H0], 0, 1.0),
    );
    WaveletDescription::from_parts(BorderRule::Periodic, taps.clone(), taps)
}

/// Cohen-Daubechies-Feauveau 5/3 biorthogonal wavelet with a periodic border.
pub fn biorthogonal53() -> WaveletDescription<f32> {
    let forward = WaveletCoefficients::from_table(
        (&[-0.125, 0.25, 0.75, 0.25, -0.125], -2, 1.0),
        (&[-0.5, 1.0, -0.5], 0, 1.0),
    );
    let inverse = WaveletCoefficients::from_table(
        (&[0.5, 1.0, 0.5], -1, 1.0),
        (&[-0.125, -0.25, 0.75, -0.25, -0.125], -1, 1.0),
    );
    WaveletDescription::from_parts(BorderRule::Periodic, forward, inverse)
}

/// Integer version of [`biorthogonal53`] for 8 bit images.
///
/// Sums are divided by 8 and 2 with rounding, so the integer inverse is only
/// approximate.
pub fn biorthogonal53_i32() -> WaveletDescription<i32> {
    let forward = WaveletCoefficients::from_table(
        (&[-1, 2, 6, 2, -1], -2, 8),
        (&[-1, 2, -1], 0, 2),
    );
    let inverse = WaveletCoefficients::from_table(
        (&[1, 2, 1], -1, 2),
        (&[-1, -2, 6, -2, -1], -1, 8),
    );
    WaveletDescription::from_parts(BorderRule::Periodic, forward, inverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_daubechies4_orthonormal() {
        let desc = daubechies4();
        let h = desc.forward().scaling();
        let g = desc.forward().wavelet();

        assert!((dot(h, h) - 1.0).abs() < EPSILON);
        assert!((dot(g, g) - 1.0).abs() < EPSILON);
        assert!(dot(h, g).abs() < EPSILON);
        // shifted by one pair
        assert!(dot(&h[2..], &h[..2]).abs() < EPSILON);
        assert!(dot(&h[2..], &g[..2]).abs() < EPSILON);
        assert!((h.iter().sum::<f32>() - 2f32.sqrt()).abs() < EPSILON);
    }

    #[test]
    fn test_biorthogonal53_gain() {
        let desc = biorthogonal53();
        assert_eq!(desc.forward().scaling().iter().sum::<f32>(), 1.0);
        assert_eq!(desc.forward().wavelet().iter().sum::<f32>(), 0.0);
        assert_eq!(desc.inverse().scaling().iter().sum::<f32>(), 2.0);
        assert_eq!(desc.inverse().wavelet().iter().sum::<f32>(), 0.0);
        assert_eq!(desc.forward().max_length(), 5);
    }

    #[test]
    fn test_integer_matches_float() {
        let float = biorthogonal53();
        let int = biorthogonal53_i32();
        let divisor = int.forward().divisor_scaling() as f32;
        for (f, i) in float
            .forward()
            .scaling()
            .iter()
            .zip(int.forward().scaling())
        {
            assert_eq!(*f, *i as f32 / divisor);
        }
        assert_eq!(int.border(), float.border());
    }
}

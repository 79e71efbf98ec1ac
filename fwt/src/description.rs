use crate::border::BorderRule;
use crate::coef::{Tap, WaveletCoefficients};
use crate::WaveletError;

/// Everything needed to run a wavelet forward and back.
///
/// A description is created once per wavelet family and shared by every call.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletDescription<T> {
    border: BorderRule,
    forward: WaveletCoefficients<T>,
    inverse: WaveletCoefficients<T>,
}

impl<T: Tap> WaveletDescription<T> {
    /// Pair forward and inverse coefficients with a border rule.
    ///
    /// [`BorderRule::Reflect`] only reconstructs exactly when every output pair is
    /// computed from its own two samples, so it is rejected with
    /// [`WaveletError::UnsupportedBorder`] for any wider support.
    pub fn new(
        border: BorderRule,
        forward: WaveletCoefficients<T>,
        inverse: WaveletCoefficients<T>,
    ) -> Result<Self, WaveletError> {
        if border == BorderRule::Reflect && !(within_pair(&forward) && within_pair(&inverse)) {
            return Err(WaveletError::UnsupportedBorder {
                border,
                taps: forward.max_length().max(inverse.max_length()),
            });
        }
        Ok(Self::from_parts(border, forward, inverse))
    }

    /// Build from factory tables which are known to be valid
    pub(crate) fn from_parts(
        border: BorderRule,
        forward: WaveletCoefficients<T>,
        inverse: WaveletCoefficients<T>,
    ) -> Self {
        Self {
            border,
            forward,
            inverse,
        }
    }

    pub fn border(&self) -> BorderRule {
        self.border
    }

    pub fn forward(&self) -> &WaveletCoefficients<T> {
        &self.forward
    }

    pub fn inverse(&self) -> &WaveletCoefficients<T> {
        &self.inverse
    }
}

/// Every tap of `coef` lands on sample `2j` or `2j + 1`
fn within_pair<T: Tap>(coef: &WaveletCoefficients<T>) -> bool {
    coef.first_offset() >= 0 && coef.last_offset() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;

    #[test]
    fn test_reflect_accepts_haar() {
        let haar = factory::haar();
        let desc = WaveletDescription::new(
            BorderRule::Reflect,
            haar.forward().clone(),
            haar.inverse().clone(),
        );
        assert_eq!(desc, Ok(haar));
    }

    #[test]
    fn test_reflect_rejects_wide_support() {
        let bior = factory::biorthogonal53();
        assert_eq!(
            WaveletDescription::new(
                BorderRule::Reflect,
                bior.forward().clone(),
                bior.inverse().clone()
            ),
            Err(WaveletError::UnsupportedBorder {
                border: BorderRule::Reflect,
                taps: 5
            })
        );

        let daub = factory::daubechies4();
        assert!(WaveletDescription::new(
            BorderRule::Reflect,
            daub.forward().clone(),
            daub.inverse().clone()
        )
        .is_err());
        assert!(WaveletDescription::new(
            BorderRule::Periodic,
            daub.forward().clone(),
            daub.inverse().clone()
        )
        .is_ok());
    }
}

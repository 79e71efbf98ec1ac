use std::ops::Range;

use super::{
    forward_horizontal, forward_vertical, inverse_horizontal, inverse_vertical, Access,
    FilterKernel,
};
use crate::border::{BorderRule, Direction};
use crate::coef::{Sample, Tap, WaveletCoefficients};
use crate::image::{ImageView, ImageViewMut};

/// Border kernel.
///
/// Writes the outputs [`Inner`](super::Inner) skips, at the start and at the end of
/// every line, reading through the border rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Border;

/// The parts of `0..count` before and after `inner`
fn outside(inner: Range<usize>, count: usize) -> [Range<usize>; 2] {
    [0..inner.start, inner.end..count]
}

impl FilterKernel for Border {
    fn horizontal<T, I, O>(
        &self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        input: &ImageView<'_, I>,
        output: &mut ImageViewMut<'_, O>,
    ) where
        T: Tap,
        I: Sample<T::Acc>,
        O: Sample<T::Acc>,
    {
        let count = output.width() / 2;
        let inner = border.inner(coef, Direction::Forward, input.width(), count);
        let pairs = outside(inner, count);
        forward_horizontal(Access::Border(border), coef, input, output, &pairs);
    }

    fn vertical<T, I, O>(
        &self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        input: &ImageView<'_, I>,
        output: &mut ImageViewMut<'_, O>,
    ) where
        T: Tap,
        I: Sample<T::Acc>,
        O: Sample<T::Acc>,
    {
        let count = output.height() / 2;
        let inner = border.inner(coef, Direction::Forward, input.height(), count);
        let pairs = outside(inner, count);
        forward_vertical(Access::Border(border), coef, input, output, &pairs);
    }

    fn horizontal_inverse<T, I, O>(
        &self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        input: &ImageView<'_, I>,
        output: &mut ImageViewMut<'_, O>,
    ) where
        T: Tap,
        I: Sample<T::Acc>,
        O: Sample<T::Acc>,
    {
        let count = output.width();
        let inner = border.inner(coef, Direction::Inverse, input.width(), count);
        let samples = outside(inner, count);
        inverse_horizontal(Access::Border(border), coef, input, output, &samples);
    }

    fn vertical_inverse<T, I, O>(
        &self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        input: &ImageView<'_, I>,
        output: &mut ImageViewMut<'_, O>,
    ) where
        T: Tap,
        I: Sample<T::Acc>,
        O: Sample<T::Acc>,
    {
        let count = output.height();
        let inner = border.inner(coef, Direction::Inverse, input.height(), count);
        let samples = outside(inner, count);
        inverse_vertical(Access::Border(border), coef, input, output, &samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside() {
        assert_eq!(outside(2..5, 7), [0..2, 5..7]);
        assert_eq!(outside(3..3, 3), [0..3, 3..3]);
    }
}

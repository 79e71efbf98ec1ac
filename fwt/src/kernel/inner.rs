use super::{
    forward_horizontal, forward_vertical, inverse_horizontal, inverse_vertical, Access,
    FilterKernel,
};
use crate::border::{BorderRule, Direction};
use crate::coef::{Sample, Tap, WaveletCoefficients};
use crate::image::{ImageView, ImageViewMut};

/// Interior kernel.
///
/// Only writes the outputs whose whole filter support is inside the input. Those reads
/// are indexed directly. The border rule is only used to size the interior, pair it
/// with [`Border`](super::Border) to fill in the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inner;

impl FilterKernel for Inner {
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
        let pairs = border.inner(coef, Direction::Forward, input.width(), output.width() / 2);
        forward_horizontal(Access::Direct, coef, input, output, &[pairs]);
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
        let pairs = border.inner(
            coef,
            Direction::Forward,
            input.height(),
            output.height() / 2,
        );
        forward_vertical(Access::Direct, coef, input, output, &[pairs]);
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
        let samples = border.inner(coef, Direction::Inverse, input.width(), output.width());
        inverse_horizontal(Access::Direct, coef, input, output, &[samples]);
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
        let samples = border.inner(coef, Direction::Inverse, input.height(), output.height());
        inverse_vertical(Access::Direct, coef, input, output, &[samples]);
    }
}

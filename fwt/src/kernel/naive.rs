use super::{
    forward_horizontal, forward_vertical, inverse_horizontal, inverse_vertical, Access,
    FilterKernel,
};
use crate::border::BorderRule;
use crate::coef::{Sample, Tap, WaveletCoefficients};
use crate::image::{ImageView, ImageViewMut};

/// Reference kernel.
///
/// Every read goes through the border rule, so it handles images of any size but is
/// the slowest of the three.
#[derive(Debug, Clone, Copy, Default)]
pub struct Naive;

impl FilterKernel for Naive {
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
        let pairs = 0..output.width() / 2;
        forward_horizontal(Access::Border(border), coef, input, output, &[pairs]);
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
        let pairs = 0..output.height() / 2;
        forward_vertical(Access::Border(border), coef, input, output, &[pairs]);
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
        let samples = 0..output.width();
        inverse_horizontal(Access::Border(border), coef, input, output, &[samples]);
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
        let samples = 0..output.height();
        inverse_vertical(Access::Border(border), coef, input, output, &[samples]);
    }
}

//! Separable wavelet filter kernels.
//!
//! Three strategies compute the same 1D passes:
//!
//! - [`Naive`] computes every output and consults the border rule for every read.
//! - [`Inner`] only computes the outputs whose filter support lies inside the input.
//! - [`Border`] computes the outputs [`Inner`] leaves out.
//!
//! Running [`Inner`] and then [`Border`] writes exactly what [`Naive`] writes. Both
//! paths accumulate in the same order, so even floating point results are identical.
//!
//! Forward passes write the scaling coefficients to the first half of each line and
//! the wavelet coefficients to the second half. Inverse passes read that layout back.

use std::ops::Range;

use crate::border::BorderRule;
use crate::coef::{Sample, Tap, WaveletCoefficients};
use crate::image::{ImageView, ImageViewMut};

mod border;
mod inner;
mod naive;

pub use border::Border;
pub use inner::Inner;
pub use naive::Naive;

/// A strategy for the four 1D passes of a separable wavelet transform.
///
/// Forward passes read a `w` sample line and write `w + w % 2` coefficients. Inverse
/// passes read an even number of coefficients and write up to that many samples.
pub trait FilterKernel {
    /// Forward pass along every row of `output`.
    ///
    /// `output` may have one more row than `input`, that row is computed from the last
    /// input row.
    fn horizontal<T, I, O>(
        &self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        input: &ImageView<'_, I>,
        output: &mut ImageViewMut<'_, O>,
    ) where
        T: Tap,
        I: Sample<T::Acc>,
        O: Sample<T::Acc>;

    /// Forward pass along every column of `output`
    fn vertical<T, I, O>(
        &self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        input: &ImageView<'_, I>,
        output: &mut ImageViewMut<'_, O>,
    ) where
        T: Tap,
        I: Sample<T::Acc>,
        O: Sample<T::Acc>;

    /// Inverse pass along every row of `output`
    fn horizontal_inverse<T, I, O>(
        &self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        input: &ImageView<'_, I>,
        output: &mut ImageViewMut<'_, O>,
    ) where
        T: Tap,
        I: Sample<T::Acc>,
        O: Sample<T::Acc>;

    /// Inverse pass along every column of `output`
    fn vertical_inverse<T, I, O>(
        &self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        input: &ImageView<'_, I>,
        output: &mut ImageViewMut<'_, O>,
    ) where
        T: Tap,
        I: Sample<T::Acc>,
        O: Sample<T::Acc>;
}

/// How a kernel turns a signal position into an index
#[derive(Debug, Clone, Copy)]
enum Access {
    /// The position is known to be in range
    Direct,
    /// The position is mapped by the border rule
    Border(BorderRule),
}

impl Access {
    fn sample(self, index: isize, len: usize) -> usize {
        match self {
            Access::Direct => index as usize,
            Access::Border(rule) => rule.sample_index(index, len),
        }
    }

    fn coefficient(self, index: isize, half: usize) -> usize {
        match self {
            Access::Direct => index as usize,
            Access::Border(rule) => rule.coefficient_index(index, half),
        }
    }
}

/// Weighted sum of the window starting at `start`
fn analyze<T: Tap>(taps: &[T], start: isize, mut fetch: impl FnMut(isize) -> T::Acc) -> T::Acc {
    let mut sum = T::ZERO;
    for (i, &tap) in taps.iter().enumerate() {
        sum = sum + tap.weigh(fetch(start + i as isize));
    }
    sum
}

/// Sum of `taps[i] * coefficient((rel - i) / 2)` over the taps where `rel - i` is even
fn synthesize<T: Tap>(taps: &[T], rel: isize, mut fetch: impl FnMut(isize) -> T::Acc) -> T::Acc {
    let mut sum = T::ZERO;
    let first = rel.rem_euclid(2) as usize;
    for i in (first..taps.len()).step_by(2) {
        sum = sum + taps[i].weigh(fetch((rel - i as isize) / 2));
    }
    sum
}

/// Row by row version of [`analyze`], `sum` receives one weighted sum per column
fn analyze_rows<'a, T, I>(
    sum: &mut [T::Acc],
    taps: &[T],
    start: isize,
    mut row: impl FnMut(isize) -> &'a [I],
) where
    T: Tap,
    I: Sample<T::Acc> + 'a,
{
    sum.fill(T::ZERO);
    for (i, &tap) in taps.iter().enumerate() {
        let src = row(start + i as isize);
        for (acc, &sample) in sum.iter_mut().zip(src) {
            *acc = *acc + tap.weigh(sample.widen());
        }
    }
}

/// Row by row version of [`synthesize`]
fn synthesize_rows<'a, T, I>(
    sum: &mut [T::Acc],
    taps: &[T],
    rel: isize,
    mut row: impl FnMut(isize) -> &'a [I],
) where
    T: Tap,
    I: Sample<T::Acc> + 'a,
{
    sum.fill(T::ZERO);
    let first = rel.rem_euclid(2) as usize;
    for i in (first..taps.len()).step_by(2) {
        let tap = taps[i];
        let src = row((rel - i as isize) / 2);
        for (acc, &sample) in sum.iter_mut().zip(src) {
            *acc = *acc + tap.weigh(sample.widen());
        }
    }
}

fn forward_horizontal<T, I, O>(
    access: Access,
    coef: &WaveletCoefficients<T>,
    input: &ImageView<'_, I>,
    output: &mut ImageViewMut<'_, O>,
    pairs: &[Range<usize>],
) where
    T: Tap,
    I: Sample<T::Acc>,
    O: Sample<T::Acc>,
{
    let len = input.width();
    let half = output.width() / 2;
    let last_row = input.height() - 1;

    for y in 0..output.height() {
        let src = input.row(y.min(last_row));
        let dst = output.row_mut(y);
        for j in pairs.iter().cloned().flatten() {
            let base = 2 * j as isize;
            let s = analyze(coef.scaling(), base + coef.offset_scaling(), |i| {
                src[access.sample(i, len)].widen()
            });
            let d = analyze(coef.wavelet(), base + coef.offset_wavelet(), |i| {
                src[access.sample(i, len)].widen()
            });
            dst[j] = O::narrow(T::normalize(s, coef.divisor_scaling()));
            dst[half + j] = O::narrow(T::normalize(d, coef.divisor_wavelet()));
        }
    }
}

fn forward_vertical<T, I, O>(
    access: Access,
    coef: &WaveletCoefficients<T>,
    input: &ImageView<'_, I>,
    output: &mut ImageViewMut<'_, O>,
    pairs: &[Range<usize>],
) where
    T: Tap,
    I: Sample<T::Acc>,
    O: Sample<T::Acc>,
{
    let len = input.height();
    let half = output.height() / 2;
    let mut sum = vec![T::ZERO; output.width()];

    for j in pairs.iter().cloned().flatten() {
        let base = 2 * j as isize;

        analyze_rows(&mut sum, coef.scaling(), base + coef.offset_scaling(), |i| {
            input.row(access.sample(i, len))
        });
        store_row(output.row_mut(j), &sum, coef.divisor_scaling());

        analyze_rows(&mut sum, coef.wavelet(), base + coef.offset_wavelet(), |i| {
            input.row(access.sample(i, len))
        });
        store_row(output.row_mut(half + j), &sum, coef.divisor_wavelet());
    }
}

fn inverse_horizontal<T, I, O>(
    access: Access,
    coef: &WaveletCoefficients<T>,
    input: &ImageView<'_, I>,
    output: &mut ImageViewMut<'_, O>,
    samples: &[Range<usize>],
) where
    T: Tap,
    I: Sample<T::Acc>,
    O: Sample<T::Acc>,
{
    let half = input.width() / 2;

    for y in 0..output.height() {
        let (scaling, wavelet) = input.row(y).split_at(half);
        let dst = output.row_mut(y);
        for n in samples.iter().cloned().flatten() {
            let x = n as isize;
            let s = synthesize(coef.scaling(), x - coef.offset_scaling(), |j| {
                scaling[access.coefficient(j, half)].widen()
            });
            let d = synthesize(coef.wavelet(), x - coef.offset_wavelet(), |j| {
                wavelet[access.coefficient(j, half)].widen()
            });
            dst[n] = O::narrow(
                T::normalize(s, coef.divisor_scaling()) + T::normalize(d, coef.divisor_wavelet()),
            );
        }
    }
}

fn inverse_vertical<T, I, O>(
    access: Access,
    coef: &WaveletCoefficients<T>,
    input: &ImageView<'_, I>,
    output: &mut ImageViewMut<'_, O>,
    samples: &[Range<usize>],
) where
    T: Tap,
    I: Sample<T::Acc>,
    O: Sample<T::Acc>,
{
    let half = input.height() / 2;
    let mut scaling = vec![T::ZERO; output.width()];
    let mut wavelet = vec![T::ZERO; output.width()];

    for n in samples.iter().cloned().flatten() {
        let y = n as isize;
        synthesize_rows(&mut scaling, coef.scaling(), y - coef.offset_scaling(), |j| {
            input.row(access.coefficient(j, half))
        });
        synthesize_rows(&mut wavelet, coef.wavelet(), y - coef.offset_wavelet(), |j| {
            input.row(half + access.coefficient(j, half))
        });

        let dst = output.row_mut(n);
        for ((out, &s), &d) in dst.iter_mut().zip(&scaling).zip(&wavelet) {
            *out = O::narrow(
                T::normalize(s, coef.divisor_scaling()) + T::normalize(d, coef.divisor_wavelet()),
            );
        }
    }
}

fn store_row<T: Tap, O: Sample<T::Acc>>(dst: &mut [O], sum: &[T::Acc], divisor: T) {
    for (out, &acc) in dst.iter_mut().zip(sum) {
        *out = O::narrow(T::normalize(acc, divisor));
    }
}

//! Single and multi level transform entry points.
//!
//! The entry points validate the buffer shapes, resolve the scratch storage and pick
//! a kernel strategy. Small images are handled by [`Naive`] alone, larger ones by
//! [`Inner`] and [`Border`] together.
//!
//! A forward pass runs horizontally from the input into storage and then vertically
//! from storage into the output. The inverse runs vertically first.

use log::{debug, trace};

use crate::border::{BorderRule, Direction};
use crate::coef::{Sample, Tap, WaveletCoefficients};
use crate::description::WaveletDescription;
use crate::image::{Image, ImageView, ImageViewMut};
use crate::kernel::{Border, FilterKernel, Inner, Naive};
use crate::pyramid::{self, PyramidLevel};
use crate::WaveletError;

/// Images up to this many times the longest tap are handled by the naive kernel
pub const NAIVE_SIZE_FACTOR: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Naive,
    /// Inner kernel followed by the border kernel
    Split,
}

/// How the naive cut off is derived from a coefficient set
#[derive(Debug, Clone, Copy)]
enum Threshold {
    /// [`NAIVE_SIZE_FACTOR`] times the longest tap
    TapLength,
    /// Twice the larger border width
    BorderWidth,
}

impl Threshold {
    fn strategy<T: Tap>(
        self,
        border: BorderRule,
        coef: &WaveletCoefficients<T>,
        width: usize,
        height: usize,
    ) -> Strategy {
        let small = |len: usize| match self {
            Threshold::TapLength => len <= NAIVE_SIZE_FACTOR * coef.max_length(),
            Threshold::BorderWidth => {
                let lower = border.lower(coef, Direction::Forward);
                let upper = border.upper(coef, Direction::Forward, len);
                len <= 2 * lower.max(upper)
            }
        };
        if small(width) || small(height) {
            Strategy::Naive
        } else {
            Strategy::Split
        }
    }
}

/// Single level forward transform.
///
/// `output` has to be `input` rounded up to even dimensions. Odd images are treated as
/// if their last row or column was repeated once. When `storage` is `None` a scratch
/// image the size of `output` is allocated.
pub fn transform1(
    desc: &WaveletDescription<f32>,
    input: &ImageView<'_, f32>,
    output: &mut ImageViewMut<'_, f32>,
    storage: Option<&mut ImageViewMut<'_, f32>>,
) -> Result<(), WaveletError> {
    forward1(desc, Threshold::TapLength, input, output, storage)
}

/// Single level forward transform of an 8 bit image with integer taps.
///
/// Same layout as [`transform1`]. Coefficients are saturated to `i16`.
///
/// Running the vertical pass as well as the horizontal one is provisional. Whether the
/// integer path should produce only the horizontal bands still needs a product decision,
/// and there is no integer inverse.
pub fn transform1_u8(
    desc: &WaveletDescription<i32>,
    input: &ImageView<'_, u8>,
    output: &mut ImageViewMut<'_, i16>,
    storage: Option<&mut ImageViewMut<'_, i16>>,
) -> Result<(), WaveletError> {
    forward1(desc, Threshold::BorderWidth, input, output, storage)
}

/// Single level inverse transform.
///
/// `input` has to be `output` rounded up to even dimensions. Storage is sized like
/// `input`.
pub fn inverse1(
    desc: &WaveletDescription<f32>,
    input: &ImageView<'_, f32>,
    output: &mut ImageViewMut<'_, f32>,
    storage: Option<&mut ImageViewMut<'_, f32>>,
) -> Result<(), WaveletError> {
    let transformed = (input.width(), input.height());
    if transformed != pyramid::transform_size(output.width(), output.height()) {
        return Err(WaveletError::ShapeMismatch {
            input: transformed,
            output: (output.width(), output.height()),
            levels: 1,
        });
    }
    let coef = desc.inverse();
    check_taps(coef, transformed)?;

    let mut declared: Image<f32>;
    let mut storage = match storage {
        Some(s) => {
            check_storage(s, transformed)?;
            s.reborrow()
        }
        None => {
            declared = Image::new(transformed.0, transformed.1);
            declared.as_view_mut()
        }
    };

    let border = desc.border();
    let strategy =
        Threshold::TapLength.strategy(border, coef, output.width(), output.height());
    debug!(
        "inverse {}x{} -> {}x{} with {:?}",
        transformed.0,
        transformed.1,
        output.width(),
        output.height(),
        strategy
    );

    match strategy {
        Strategy::Naive => {
            Naive.vertical_inverse(border, coef, input, &mut storage);
            Naive.horizontal_inverse(border, coef, &storage.as_view(), output);
        }
        Strategy::Split => {
            Inner.vertical_inverse(border, coef, input, &mut storage);
            Border.vertical_inverse(border, coef, input, &mut storage);
            let columns = storage.as_view();
            Inner.horizontal_inverse(border, coef, &columns, output);
            Border.horizontal_inverse(border, coef, &columns, output);
        }
    }
    Ok(())
}

/// Multi level forward transform.
///
/// After the first level the scaling region of the previous level is transformed
/// again, in place in the top left corner of `output`, `levels - 1` more times.
///
/// `input` is used as workspace and holds intermediate coefficients afterwards. Use
/// [`transform_n_preserving`] to keep it intact. All shapes are checked before
/// anything is written.
pub fn transform_n(
    desc: &WaveletDescription<f32>,
    input: &mut ImageViewMut<'_, f32>,
    output: &mut ImageViewMut<'_, f32>,
    storage: Option<&mut ImageViewMut<'_, f32>>,
    levels: usize,
) -> Result<(), WaveletError> {
    if levels == 1 {
        return transform1(desc, &input.as_view(), output, storage);
    }
    let chain = check_levels(
        desc.forward(),
        (input.width(), input.height()),
        (output.width(), output.height()),
        Direction::Forward,
        levels,
    )?;

    let mut declared: Image<f32>;
    let mut storage = match storage {
        Some(s) => {
            check_storage(s, (output.width(), output.height()))?;
            s.reborrow()
        }
        None => {
            declared = Image::new(output.width(), output.height());
            declared.as_view_mut()
        }
    };

    transform1(desc, &input.as_view(), output, Some(&mut storage))?;

    for region in &chain[1..] {
        let PyramidLevel {
            level,
            width,
            height,
        } = *region;
        trace!("forward level {level} over {width}x{height}");

        let mut workspace = input.sub_view_mut(0, 0, width, height)?;
        workspace.copy_from(&output.sub_view(0, 0, width, height)?)?;
        storage.reshape(width, height)?;

        let mut coarse = output.sub_view_mut(0, 0, width, height)?;
        transform1(desc, &workspace.as_view(), &mut coarse, Some(&mut storage))?;
    }
    Ok(())
}

/// Multi level inverse transform, undoes [`transform_n`] with the same `levels`.
///
/// `input` is used as workspace and holds partially reconstructed levels afterwards.
pub fn inverse_n(
    desc: &WaveletDescription<f32>,
    input: &mut ImageViewMut<'_, f32>,
    output: &mut ImageViewMut<'_, f32>,
    storage: Option<&mut ImageViewMut<'_, f32>>,
    levels: usize,
) -> Result<(), WaveletError> {
    if levels == 1 {
        return inverse1(desc, &input.as_view(), output, storage);
    }
    let chain = check_levels(
        desc.inverse(),
        (input.width(), input.height()),
        (output.width(), output.height()),
        Direction::Inverse,
        levels,
    )?;

    let mut declared: Image<f32>;
    let mut storage = match storage {
        Some(s) => {
            check_storage(s, (input.width(), input.height()))?;
            s.reborrow()
        }
        None => {
            declared = Image::new(input.width(), input.height());
            declared.as_view_mut()
        }
    };

    for region in chain[1..].iter().rev() {
        let PyramidLevel {
            level,
            width,
            height,
        } = *region;
        trace!("inverse level {level} over {width}x{height}");

        storage.reshape(width, height)?;
        let mut fine = output.sub_view_mut(0, 0, width, height)?;
        inverse1(
            desc,
            &input.sub_view(0, 0, width, height)?,
            &mut fine,
            Some(&mut storage),
        )?;

        // the finer level reads the reconstructed scaling region from the input
        input
            .sub_view_mut(0, 0, width, height)?
            .copy_from(&output.sub_view(0, 0, width, height)?)?;
    }

    storage.reshape(input.width(), input.height())?;
    inverse1(desc, &input.as_view(), output, Some(&mut storage))
}

/// [`transform_n`] on a private copy of `input`, leaving the caller's image untouched
pub fn transform_n_preserving(
    desc: &WaveletDescription<f32>,
    input: &ImageView<'_, f32>,
    output: &mut ImageViewMut<'_, f32>,
    storage: Option<&mut ImageViewMut<'_, f32>>,
    levels: usize,
) -> Result<(), WaveletError> {
    let mut workspace = input.to_image();
    transform_n(desc, &mut workspace.as_view_mut(), output, storage, levels)
}

fn forward1<T, I, O>(
    desc: &WaveletDescription<T>,
    threshold: Threshold,
    input: &ImageView<'_, I>,
    output: &mut ImageViewMut<'_, O>,
    storage: Option<&mut ImageViewMut<'_, O>>,
) -> Result<(), WaveletError>
where
    T: Tap,
    I: Sample<T::Acc>,
    O: Sample<T::Acc>,
{
    let transformed = (output.width(), output.height());
    if transformed != pyramid::transform_size(input.width(), input.height()) {
        return Err(WaveletError::ShapeMismatch {
            input: (input.width(), input.height()),
            output: transformed,
            levels: 1,
        });
    }
    let coef = desc.forward();
    check_taps(coef, transformed)?;

    let mut declared: Image<O>;
    let mut storage = match storage {
        Some(s) => {
            check_storage(s, transformed)?;
            s.reborrow()
        }
        None => {
            declared = Image::new(transformed.0, transformed.1);
            declared.as_view_mut()
        }
    };

    let border = desc.border();
    let strategy = threshold.strategy(border, coef, input.width(), input.height());
    debug!(
        "forward {}x{} -> {}x{} with {:?}",
        input.width(),
        input.height(),
        transformed.0,
        transformed.1,
        strategy
    );

    match strategy {
        Strategy::Naive => {
            Naive.horizontal(border, coef, input, &mut storage);
            Naive.vertical(border, coef, &storage.as_view(), output);
        }
        Strategy::Split => {
            Inner.horizontal(border, coef, input, &mut storage);
            Border.horizontal(border, coef, input, &mut storage);
            let rows = storage.as_view();
            Inner.vertical(border, coef, &rows, output);
            Border.vertical(border, coef, &rows, output);
        }
    }
    Ok(())
}

fn check_taps<T: Tap>(
    coef: &WaveletCoefficients<T>,
    (width, height): (usize, usize),
) -> Result<(), WaveletError> {
    let taps = coef.max_length();
    if width < taps || height < taps {
        return Err(WaveletError::BufferTooSmall {
            width,
            height,
            taps,
        });
    }
    Ok(())
}

fn check_storage<S>(
    storage: &ImageViewMut<'_, S>,
    expected: (usize, usize),
) -> Result<(), WaveletError> {
    let actual = (storage.width(), storage.height());
    if actual != expected {
        return Err(WaveletError::StorageSizeMismatch { expected, actual });
    }
    Ok(())
}

/// Validate a multi level transform pair and return its level chain.
///
/// `direction` tells which of `input` and `output` is the image, the other one has to
/// be its transform.
fn check_levels<T: Tap>(
    coef: &WaveletCoefficients<T>,
    input: (usize, usize),
    output: (usize, usize),
    direction: Direction,
    levels: usize,
) -> Result<Vec<PyramidLevel>, WaveletError> {
    let (image, transformed) = match direction {
        Direction::Forward => (input, output),
        Direction::Inverse => (output, input),
    };
    let mismatch = WaveletError::ShapeMismatch {
        input,
        output,
        levels,
    };
    if pyramid::transform_size(image.0, image.1) != transformed {
        return Err(mismatch);
    }
    let chain = pyramid::levels(image.0, image.1, levels).map_err(|_| mismatch)?;
    for region in &chain {
        check_taps(coef, (region.width, region.height))?;
    }
    Ok(chain)
}

//! Single band images and the views used to address regions of them.
//!
//! Views use an element stride, the distance between the starts of adjacent rows,
//! which is the width of the image they were taken from. A view holds the rest of
//! its parent's buffer from its first sample onwards, so it can be reshaped in place
//! as long as the new extent still fits.

use std::ops::{Index, IndexMut};

use crate::WaveletError;

/// An owned 2D grid of samples stored row by row
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Clone + Default> Image<T> {
    /// Create a new image with given dimensions filled with the default sample
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![T::default(); width * height],
            width,
            height,
        }
    }
}

impl<T> Image<T> {
    /// Create from existing data
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, WaveletError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(WaveletError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create an image by evaluating `f(x, y)` for every sample
    pub fn from_fn<F: FnMut(usize, usize) -> T>(width: usize, height: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &mut self.data,
        }
    }
}

impl<T> Index<(usize, usize)> for Image<T> {
    type Output = T;

    fn index(&self, (col, row): (usize, usize)) -> &Self::Output {
        &self.data[row * self.width + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Image<T> {
    fn index_mut(&mut self, (col, row): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.width + col]
    }
}

/// A read only rectangle over an image's samples
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get a row as a slice
    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// View a rectangle of this view without copying
    pub fn sub_view(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageView<'a, T>, WaveletError> {
        let start = sub_view_start(
            (self.width, self.height, self.stride),
            (x, y, width, height),
            self.data.len(),
        )?;
        Ok(ImageView {
            width,
            height,
            stride: self.stride,
            data: &self.data[start..],
        })
    }
}

impl<T: Clone> ImageView<'_, T> {
    /// Copy the samples of this view into a new image
    pub fn to_image(&self) -> Image<T> {
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            data.extend_from_slice(self.row(y));
        }
        Image {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

/// A mutable rectangle over an image's samples
#[derive(Debug)]
pub struct ImageViewMut<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a mut [T],
}

impl<'a, T> ImageViewMut<'a, T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Set value at position (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[y * self.stride + x] = value;
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: &*self.data,
        }
    }

    /// Borrow this view for a shorter lifetime
    pub fn reborrow(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: &mut *self.data,
        }
    }

    pub fn sub_view(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageView<'_, T>, WaveletError> {
        self.as_view().sub_view(x, y, width, height)
    }

    /// Mutable view of a rectangle of this view, writes go to the parent
    pub fn sub_view_mut(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageViewMut<'_, T>, WaveletError> {
        let start = sub_view_start(
            (self.width, self.height, self.stride),
            (x, y, width, height),
            self.data.len(),
        )?;
        Ok(ImageViewMut {
            width,
            height,
            stride: self.stride,
            data: &mut self.data[start..],
        })
    }

    /// Change the logical extent of the view without touching its samples.
    ///
    /// The view keeps its origin and stride, the new extent has to fit inside the
    /// buffer the view was created over.
    pub fn reshape(&mut self, width: usize, height: usize) -> Result<(), WaveletError> {
        if width > self.stride {
            return Err(WaveletError::OutOfBounds);
        }
        if required_len(width, height, self.stride) > self.data.len() {
            return Err(WaveletError::OutOfBounds);
        }
        self.width = width;
        self.height = height;
        Ok(())
    }
}

impl<T: Copy> ImageViewMut<'_, T> {
    /// Copy every sample of `src` into this view
    pub fn copy_from(&mut self, src: &ImageView<'_, T>) -> Result<(), WaveletError> {
        if src.width() != self.width || src.height() != self.height {
            return Err(WaveletError::ViewSizeMismatch {
                expected: (self.width, self.height),
                actual: (src.width(), src.height()),
            });
        }
        for y in 0..self.height {
            self.row_mut(y).copy_from_slice(src.row(y));
        }
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        for y in 0..self.height {
            self.row_mut(y).fill(value);
        }
    }
}

/// Offset of the first sample of a sub-view, checking it lies inside its parent
fn sub_view_start(
    (parent_width, parent_height, stride): (usize, usize, usize),
    (x, y, width, height): (usize, usize, usize, usize),
    len: usize,
) -> Result<usize, WaveletError> {
    if x > parent_width
        || y > parent_height
        || width > parent_width - x
        || height > parent_height - y
    {
        return Err(WaveletError::OutOfBounds);
    }
    let start = y * stride + x;
    if start > len || required_len(width, height, stride) > len - start {
        return Err(WaveletError::OutOfBounds);
    }
    Ok(start)
}

fn required_len(width: usize, height: usize, stride: usize) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    (height - 1) * stride + width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let img: Image<f32> = Image::new(4, 3);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img[(0, 0)], 0.0);
    }

    #[test]
    fn test_from_vec_length() {
        assert_eq!(
            Image::from_vec(3, 2, vec![0u8; 5]),
            Err(WaveletError::DataLength {
                expected: 6,
                actual: 5
            })
        );
        let img = Image::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img[(2, 1)], 6);
    }

    #[test]
    fn test_sub_view_rows() {
        let img = Image::from_fn(5, 4, |x, y| (10 * y + x) as i16);
        let view = img.as_view();
        let sub = view.sub_view(1, 2, 3, 2).unwrap();

        assert_eq!(sub.stride(), 5);
        assert_eq!(sub.row(0), &[21, 22, 23]);
        assert_eq!(sub.row(1), &[31, 32, 33]);
        assert_eq!(sub.get(2, 1), Some(&33));
        assert_eq!(sub.get(3, 1), None);
        assert!(view.sub_view(3, 0, 3, 1).is_err());
    }

    #[test]
    fn test_sub_view_mut_writes_parent() {
        let mut img: Image<u8> = Image::new(4, 4);
        {
            let mut view = img.as_view_mut();
            let mut sub = view.sub_view_mut(2, 1, 2, 2).unwrap();
            sub.set(1, 1, 42);
            sub.row_mut(0)[0] = 7;
        }
        assert_eq!(img[(3, 2)], 42);
        assert_eq!(img[(2, 1)], 7);
    }

    #[test]
    fn test_reshape() {
        let mut img: Image<f32> = Image::new(6, 4);
        let mut view = img.as_view_mut();
        view.reshape(2, 2).unwrap();
        assert_eq!((view.width(), view.height()), (2, 2));
        view.fill(1.0);
        view.reshape(6, 4).unwrap();
        assert_eq!(view.row(0), &[1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(view.reshape(7, 1), Err(WaveletError::OutOfBounds));
        assert_eq!(view.reshape(6, 5), Err(WaveletError::OutOfBounds));
        drop(view);
        assert_eq!(img[(1, 1)], 1.0);
        assert_eq!(img[(2, 1)], 0.0);
    }

    #[test]
    fn test_copy_from() {
        let src = Image::from_fn(3, 2, |x, y| (x + 3 * y) as f32);
        let mut dst: Image<f32> = Image::new(5, 5);
        let mut view = dst.as_view_mut();
        let mut region = view.sub_view_mut(1, 1, 3, 2).unwrap();
        region.copy_from(&src.as_view()).unwrap();
        assert!(region.copy_from(&src.as_view().sub_view(0, 0, 2, 2).unwrap()).is_err());
        assert_eq!(dst[(1, 1)], 0.0);
        assert_eq!(dst[(3, 2)], 5.0);
        assert_eq!(dst.as_view().sub_view(1, 1, 3, 2).unwrap().to_image(), src);
    }
}

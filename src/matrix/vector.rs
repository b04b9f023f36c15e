use alloc::vec::Vec;

use crate::blas;
use crate::traits::Scalar;

/// Read-only strided view into a shared buffer.
///
/// Element `k` lives at `data[offset + k * stride]`. Rows of a row-major
/// matrix have stride 1, columns have stride `ncols`; neither is copied.
///
/// ```
/// use reinsch::{Matrix, VectorView};
///
/// let m = Matrix::from_vec(vec![1.0_f64, 2.0, 3.0, 4.0], 2);
/// let c = m.col(0);
/// assert_eq!(c.get(1), 3.0);
///
/// let v = VectorView::from_slice(&[1.0_f64, 1.0]);
/// assert_eq!(c.dot(&v), 4.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VectorView<'a, T> {
    pub(crate) data: &'a [T],
    len: usize,
    pub(crate) stride: usize,
    pub(crate) offset: usize,
}

impl<'a, T> VectorView<'a, T> {
    /// View `len` elements of `data` starting at `offset`, `stride` apart.
    ///
    /// Panics if the last element would fall outside `data`.
    pub fn new(data: &'a [T], len: usize, stride: usize, offset: usize) -> Self {
        check_extent(data.len(), len, stride, offset);
        Self { data, len, stride, offset }
    }

    /// Contiguous view over a whole slice.
    pub fn from_slice(data: &'a [T]) -> Self {
        Self { data, len: data.len(), stride: 1, offset: 0 }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Trailing part of the view starting at element `offset`.
    ///
    /// ```
    /// use reinsch::VectorView;
    /// let v = VectorView::from_slice(&[1.0, 2.0, 3.0]);
    /// assert_eq!(v.subvector(1).to_vec(), vec![2.0, 3.0]);
    /// ```
    pub fn subvector(&self, offset: usize) -> Self {
        assert!(offset <= self.len, "subvector offset {} past length {}", offset, self.len);
        Self {
            data: self.data,
            len: self.len - offset,
            stride: self.stride,
            offset: self.offset + offset * self.stride,
        }
    }

    /// Iterate over the viewed elements.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        let data: &'a [T] = self.data;
        let start = self.offset.min(data.len());
        data[start..].iter().step_by(self.stride.max(1)).take(self.len)
    }
}

impl<T: Scalar> VectorView<'_, T> {
    /// Element `k`.
    #[inline]
    pub fn get(&self, k: usize) -> T {
        debug_assert!(k < self.len);
        self.data[self.offset + k * self.stride]
    }

    /// Dot product with another view of the same length.
    pub fn dot(&self, rhs: &VectorView<'_, T>) -> T {
        assert_eq!(self.len, rhs.len, "vector length mismatch");
        blas::dot(
            self.len,
            self.data,
            self.stride,
            self.offset,
            rhs.data,
            rhs.stride,
            rhs.offset,
        )
    }

    /// Copy the viewed elements into a new contiguous vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

/// Mutable strided view into a buffer.
///
/// Same addressing as [`VectorView`], with in-place writes.
#[derive(Debug)]
pub struct VectorViewMut<'a, T> {
    pub(crate) data: &'a mut [T],
    len: usize,
    pub(crate) stride: usize,
    pub(crate) offset: usize,
}

impl<'a, T> VectorViewMut<'a, T> {
    /// Mutable view of `len` elements of `data` starting at `offset`.
    pub fn new(data: &'a mut [T], len: usize, stride: usize, offset: usize) -> Self {
        check_extent(data.len(), len, stride, offset);
        Self { data, len, stride, offset }
    }

    /// Contiguous mutable view over a whole slice.
    pub fn from_slice(data: &'a mut [T]) -> Self {
        let len = data.len();
        Self { data, len, stride: 1, offset: 0 }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> VectorView<'_, T> {
        VectorView {
            data: &*self.data,
            len: self.len,
            stride: self.stride,
            offset: self.offset,
        }
    }

    /// Consume the view, keeping elements from `offset` on.
    pub fn into_subvector(self, offset: usize) -> Self {
        assert!(offset <= self.len, "subvector offset {} past length {}", offset, self.len);
        Self {
            len: self.len - offset,
            offset: self.offset + offset * self.stride,
            stride: self.stride,
            data: self.data,
        }
    }
}

impl<T: Scalar> VectorViewMut<'_, T> {
    /// Element `k`.
    #[inline]
    pub fn get(&self, k: usize) -> T {
        debug_assert!(k < self.len);
        self.data[self.offset + k * self.stride]
    }

    /// Overwrite element `k`.
    #[inline]
    pub fn set(&mut self, k: usize, value: T) {
        debug_assert!(k < self.len);
        self.data[self.offset + k * self.stride] = value;
    }
}

fn check_extent(buf_len: usize, len: usize, stride: usize, offset: usize) {
    if len > 0 {
        let last = offset + (len - 1) * stride;
        assert!(
            last < buf_len,
            "view of {} elements (stride {}, offset {}) overruns buffer of {}",
            len,
            stride,
            offset,
            buf_len,
        );
    }
}

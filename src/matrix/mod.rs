mod ops;
mod util;
pub mod vector;

pub use ops::{col_col_dot, diagonal_multiply, multiply, row_col_dot, row_row_dot, transpose};
pub use vector::{VectorView, VectorViewMut};

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::Scalar;

/// Dense, heap-allocated matrix in row-major order.
///
/// Storage is a flat `Vec<T>` tagged with a column count; the row count
/// is derived as `len / ncols`. The buffer length is always an exact
/// multiple of the column count (an empty buffer when `ncols == 0`).
///
/// Matrices are value-like: [`transpose`](Matrix::transpose) and
/// [`multiply`](Matrix::multiply) allocate new buffers, and the SVD clones
/// its input before working on it.
///
/// # Examples
///
/// ```
/// use reinsch::Matrix;
///
/// let a = Matrix::from_vec(vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 3);
/// assert_eq!(a[(1, 0)], 4.0);
///
/// let id = Matrix::<f64>::eye(3);
/// assert_eq!(id[(2, 2)], 1.0);
/// assert_eq!(id[(0, 2)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Wrap a row-major buffer with the given column count.
    ///
    /// Panics if `data.len()` is not a multiple of `ncols` (or if
    /// `ncols == 0` and the buffer is not empty).
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2);
    /// assert_eq!(m[(0, 1)], 2.0);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_vec(data: Vec<T>, ncols: usize) -> Self {
        check_shape(data.len(), ncols);
        Self { data, ncols }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let m = Matrix::from_fn(2, 3, |i, j| (10 * i + j) as f64);
    /// assert_eq!(m[(1, 2)], 12.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, ncols }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        if self.ncols == 0 {
            0
        } else {
            self.data.len() / self.ncols
        }
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols
    }

    /// Row-major element buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major element buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix, returning its row-major buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Zero-copy view of row `i`.
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2);
    /// assert_eq!(m.row(1).to_vec(), vec![3.0, 4.0]);
    /// ```
    #[inline]
    pub fn row(&self, i: usize) -> VectorView<'_, T> {
        assert!(i < self.nrows(), "row {} out of range for {} rows", i, self.nrows());
        VectorView::new(&self.data, self.ncols, 1, i * self.ncols)
    }

    /// Zero-copy view of column `j`.
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2);
    /// assert_eq!(m.col(1).to_vec(), vec![2.0, 4.0]);
    /// ```
    #[inline]
    pub fn col(&self, j: usize) -> VectorView<'_, T> {
        assert!(j < self.ncols, "column {} out of range for {} columns", j, self.ncols);
        let nrows = self.nrows();
        VectorView::new(&self.data, nrows, self.ncols, j)
    }

    /// Mutable view of row `i`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> VectorViewMut<'_, T> {
        assert!(i < self.nrows(), "row {} out of range for {} rows", i, self.nrows());
        let n = self.ncols;
        VectorViewMut::new(&mut self.data, n, 1, i * n)
    }

    /// Mutable view of column `j`.
    #[inline]
    pub fn col_mut(&mut self, j: usize) -> VectorViewMut<'_, T> {
        assert!(j < self.ncols, "column {} out of range for {} columns", j, self.ncols);
        let nrows = self.nrows();
        let n = self.ncols;
        VectorViewMut::new(&mut self.data, nrows, n, j)
    }
}

impl<T: Scalar> Matrix<T> {
    /// Create a matrix from a row-major slice (copied).
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let m = Matrix::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2);
    /// assert_eq!(m.nrows(), 3);
    /// assert_eq!(m[(2, 1)], 6.0);
    /// ```
    pub fn from_slice(data: &[T], ncols: usize) -> Self {
        Self::from_vec(data.to_vec(), ncols)
    }

    /// Create a matrix from a list of equally long rows.
    ///
    /// Panics if the rows have different lengths.
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let m = Matrix::from_row_slices(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
    /// assert_eq!(m.nrows(), 3);
    /// assert_eq!(m[(1, 1)], 4.0);
    /// ```
    pub fn from_row_slices(rows: &[&[T]]) -> Self {
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                ncols,
                "row {} has length {}, expected {}",
                i,
                row.len(),
                ncols,
            );
            data.extend_from_slice(row);
        }
        Self { data, ncols }
    }

    /// Create an `nrows x ncols` zero matrix.
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.len(), 6);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }
}

fn check_shape(len: usize, ncols: usize) {
    if ncols == 0 {
        assert!(len == 0, "buffer of length {} cannot have zero columns", len);
    } else {
        assert!(
            len % ncols == 0,
            "buffer length {} is not a multiple of column count {}",
            len,
            ncols,
        );
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(col < self.ncols);
        &self.data[row * self.ncols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(col < self.ncols);
        &mut self.data[row * self.ncols + col]
    }
}

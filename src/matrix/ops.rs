use alloc::vec::Vec;

use crate::blas;
use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::Matrix;

// ── Strided dot helpers ─────────────────────────────────────────────

/// Dot product of row `i` of `a` with column `j` of `b`.
///
/// Runs over `a.ncols()` elements; `b` must have at least that many rows.
#[inline]
pub fn row_col_dot<T: Scalar>(a: &Matrix<T>, i: usize, b: &Matrix<T>, j: usize) -> T {
    let n = a.ncols();
    blas::dot(n, a.as_slice(), 1, i * n, b.as_slice(), b.ncols(), j)
}

/// Dot product of column `i` of `a` with column `j` of `b`.
///
/// Runs over `a.nrows()` elements.
#[inline]
pub fn col_col_dot<T: Scalar>(a: &Matrix<T>, i: usize, b: &Matrix<T>, j: usize) -> T {
    blas::dot(
        a.nrows(),
        a.as_slice(),
        a.ncols(),
        i,
        b.as_slice(),
        b.ncols(),
        j,
    )
}

/// Dot product of row `i` of `a` with row `j` of `b`.
///
/// Runs over `a.ncols()` elements.
#[inline]
pub fn row_row_dot<T: Scalar>(a: &Matrix<T>, i: usize, b: &Matrix<T>, j: usize) -> T {
    let n = a.ncols();
    blas::dot(n, a.as_slice(), 1, i * n, b.as_slice(), 1, j * b.ncols())
}

// ── Products ────────────────────────────────────────────────────────

/// Matrix product `a * b`.
///
/// Every output cell is one row·column kernel dot product. Fails when the
/// column count of `a` does not match the row count of `b`.
///
/// ```
/// use reinsch::{multiply, Matrix};
///
/// let a = Matrix::from_vec(vec![1.0_f64, 2.0, 3.0, 4.0], 2);
/// let b = Matrix::from_vec(vec![0.0_f64, -1.0, 1.0, 0.0], 2);
/// let c = multiply(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[2.0, -1.0, 4.0, -3.0]);
/// ```
pub fn multiply<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    if a.ncols() != b.nrows() {
        return Err(LinalgError::DimensionMismatch {
            expected: a.ncols(),
            got: b.nrows(),
        });
    }
    Ok(Matrix::from_fn(a.nrows(), b.ncols(), |i, j| {
        row_col_dot(a, i, b, j)
    }))
}

/// Transpose into a newly allocated matrix.
pub fn transpose<T: Scalar>(a: &Matrix<T>) -> Matrix<T> {
    let (m, n) = (a.nrows(), a.ncols());
    let src = a.as_slice();
    Matrix::from_fn(n, m, |i, j| src[j * n + i])
}

/// `diag(d) * b`: scale row `i` of `b` by `d[i]`.
///
/// Fails when `d.len()` differs from the row count of `b`.
///
/// ```
/// use reinsch::{diagonal_multiply, Matrix};
///
/// let b = Matrix::from_vec(vec![1.0_f64, 1.0, 2.0, 2.0], 2);
/// let c = diagonal_multiply(&[3.0, -1.0], &b).unwrap();
/// assert_eq!(c.as_slice(), &[3.0, 3.0, -2.0, -2.0]);
/// ```
pub fn diagonal_multiply<T: Scalar>(d: &[T], b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    if d.len() != b.nrows() {
        return Err(LinalgError::DimensionMismatch {
            expected: b.nrows(),
            got: d.len(),
        });
    }
    let n = b.ncols();
    let mut data = Vec::with_capacity(b.len());
    for (i, &di) in d.iter().enumerate() {
        data.extend(b.as_slice()[i * n..(i + 1) * n].iter().map(|&x| di * x));
    }
    Ok(Matrix::from_vec(data, n))
}

impl<T: Scalar> Matrix<T> {
    /// Matrix product `self * rhs`. See [`multiply`].
    #[inline]
    pub fn multiply(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        multiply(self, rhs)
    }

    /// Transposed copy. See [`transpose`].
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2);
    /// let t = a.transpose();
    /// assert_eq!(t.nrows(), 2);
    /// assert_eq!(t.as_slice(), &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);
    /// ```
    #[inline]
    pub fn transpose(&self) -> Matrix<T> {
        transpose(self)
    }
}

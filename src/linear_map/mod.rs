//! Linear maps and in-place operators.
//!
//! A closed set of structured transforms that share one capability set:
//! dimensions, cell iteration and transpose. [`LinearMap`] covers
//! rectangular maps (a borrowed dense matrix, or any operator), while
//! [`LinearOperator`] owns square transforms that can also update a
//! vector in place.
//!
//! The SVD itself runs on explicit dense loops; these types describe the
//! same transforms to callers, e.g. the pseudo-inverse diagonal used by
//! the least-squares solver.
//!
//! ```
//! use reinsch::linear_map::{apply, Diagonal, LinearMap, LinearOperator};
//! use reinsch::VectorView;
//!
//! let op = LinearOperator::from(Diagonal::new(vec![1.0_f64, 2.0, 3.0]));
//! let y = apply(&op.as_map(), &VectorView::from_slice(&[7.0, 8.0, 9.0])).unwrap();
//! assert_eq!(y, vec![7.0, 16.0, 27.0]);
//! ```

mod dense;
mod diagonal;
mod householder;

pub use dense::DenseMap;
pub use diagonal::Diagonal;
pub use householder::Householder;

use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::matrix::{Matrix, VectorView};
use crate::traits::Scalar;

// ── LinearMap ───────────────────────────────────────────────────────

/// A rectangular linear map `Rⁿ → Rᵐ`.
#[derive(Debug)]
pub enum LinearMap<'a, T> {
    Dense(DenseMap<'a, T>),
    Diagonal(&'a Diagonal<T>),
    Householder(&'a Householder<T>),
}

impl<T> Clone for LinearMap<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for LinearMap<'_, T> {}

impl<'a, T> LinearMap<'a, T> {
    /// Column count `n`.
    pub fn input_dimension(&self) -> usize {
        match self {
            LinearMap::Dense(d) => d.input_dimension(),
            LinearMap::Diagonal(d) => d.dimension(),
            LinearMap::Householder(h) => h.dimension(),
        }
    }

    /// Row count `m`.
    pub fn output_dimension(&self) -> usize {
        match self {
            LinearMap::Dense(d) => d.output_dimension(),
            LinearMap::Diagonal(d) => d.dimension(),
            LinearMap::Householder(h) => h.dimension(),
        }
    }

    /// The transposed map. Never copies data.
    pub fn transpose(&self) -> LinearMap<'a, T> {
        match *self {
            LinearMap::Dense(d) => LinearMap::Dense(d.transpose()),
            // symmetric
            other => other,
        }
    }
}

impl<T: Scalar> LinearMap<'_, T> {
    /// Call `f(value, i, j)` for each stored cell.
    pub fn for_each_cell(&self, f: impl FnMut(T, usize, usize)) {
        match self {
            LinearMap::Dense(d) => d.for_each_cell(f),
            LinearMap::Diagonal(d) => d.for_each_cell(f),
            LinearMap::Householder(h) => h.for_each_cell(f),
        }
    }

    /// Densify into an `output_dimension × input_dimension` matrix.
    pub fn to_matrix(&self) -> Matrix<T> {
        let mut m = Matrix::zeros(self.output_dimension(), self.input_dimension());
        self.for_each_cell(|c, i, j| m[(i, j)] = c);
        m
    }
}

impl<'a, T> From<DenseMap<'a, T>> for LinearMap<'a, T> {
    fn from(d: DenseMap<'a, T>) -> Self {
        LinearMap::Dense(d)
    }
}

impl<'a, T> From<&'a Matrix<T>> for LinearMap<'a, T> {
    fn from(m: &'a Matrix<T>) -> Self {
        LinearMap::Dense(DenseMap::from_matrix(m))
    }
}

impl<'a, T> From<&'a LinearOperator<T>> for LinearMap<'a, T> {
    fn from(op: &'a LinearOperator<T>) -> Self {
        op.as_map()
    }
}

// ── LinearOperator ──────────────────────────────────────────────────

/// A square operator applied in place, `x ← F x`.
#[derive(Debug, Clone, PartialEq)]
pub enum LinearOperator<T> {
    Diagonal(Diagonal<T>),
    Householder(Householder<T>),
}

impl<T> LinearOperator<T> {
    pub fn dimension(&self) -> usize {
        match self {
            LinearOperator::Diagonal(d) => d.dimension(),
            LinearOperator::Householder(h) => h.dimension(),
        }
    }

    /// Both variants are symmetric.
    pub fn transpose(&self) -> &Self {
        self
    }

    /// Borrow as a square [`LinearMap`].
    pub fn as_map(&self) -> LinearMap<'_, T> {
        match self {
            LinearOperator::Diagonal(d) => LinearMap::Diagonal(d),
            LinearOperator::Householder(h) => LinearMap::Householder(h),
        }
    }
}

impl<T: Scalar> LinearOperator<T> {
    /// Apply in place. Fails unless `x.len() == self.dimension()`.
    pub fn update(&self, x: &mut [T]) -> Result<(), LinalgError> {
        match self {
            LinearOperator::Diagonal(d) => d.update(x),
            LinearOperator::Householder(h) => h.update(x),
        }
    }

    pub fn for_each_cell(&self, f: impl FnMut(T, usize, usize)) {
        match self {
            LinearOperator::Diagonal(d) => d.for_each_cell(f),
            LinearOperator::Householder(h) => h.for_each_cell(f),
        }
    }
}

impl<T> From<Diagonal<T>> for LinearOperator<T> {
    fn from(d: Diagonal<T>) -> Self {
        LinearOperator::Diagonal(d)
    }
}

impl<T> From<Householder<T>> for LinearOperator<T> {
    fn from(h: Householder<T>) -> Self {
        LinearOperator::Householder(h)
    }
}

// ── apply ───────────────────────────────────────────────────────────

/// `y = map · x`, accumulated cell by cell.
///
/// Fails unless `x.len()` equals the map's input dimension.
pub fn apply<T: Scalar>(map: &LinearMap<'_, T>, x: &VectorView<'_, T>) -> Result<Vec<T>, LinalgError> {
    if x.len() != map.input_dimension() {
        return Err(LinalgError::DimensionMismatch {
            expected: map.input_dimension(),
            got: x.len(),
        });
    }
    let mut y = vec![T::zero(); map.output_dimension()];
    map.for_each_cell(|c, i, j| y[i] = y[i] + c * x.get(j));
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_operator_as_map() {
        let op = LinearOperator::from(Diagonal::new(vec![1.0_f64, 2.0, 3.0]));
        assert_eq!(op.dimension(), 3);
        let mut x = [7.0, 8.0, 9.0];
        op.update(&mut x).unwrap();
        assert_eq!(x, [7.0, 16.0, 27.0]);
        assert!(core::ptr::eq(op.transpose(), &op));

        let m = LinearMap::from(&op);
        assert_eq!(m.input_dimension(), 3);
        assert_eq!(m.output_dimension(), 3);
        let expected = Matrix::from_vec(vec![1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0], 3);
        assert_eq!(m.to_matrix(), expected);
        assert_eq!(m.transpose().to_matrix(), expected);
        let y = apply(&m, &VectorView::from_slice(&[7.0, 8.0, 9.0])).unwrap();
        assert_eq!(y, vec![7.0, 16.0, 27.0]);
    }

    #[test]
    fn dense_rows_map() {
        let rows = vec![vec![0.0_f64, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]];
        let m = LinearMap::from(DenseMap::from_rows(&rows));
        assert_eq!(m.input_dimension(), 2);
        assert_eq!(m.output_dimension(), 3);
        assert_eq!(
            m.transpose().to_matrix().as_slice(),
            &[0.0, 0.0, 1.0, 0.0, 1.0, 0.0]
        );
        let y = apply(&m, &VectorView::from_slice(&[8.0, 9.0])).unwrap();
        assert_eq!(y, vec![0.0, 9.0, 8.0]);
    }

    #[test]
    fn dense_matrix_apply_matches_multiply() {
        let a = Matrix::from_vec(vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
        let x = [1.0, -1.0, 2.0];
        let y = apply(&LinearMap::from(&a), &VectorView::from_slice(&x)).unwrap();
        let expected = a.multiply(&Matrix::from_slice(&x, 1)).unwrap();
        assert_eq!(y, expected.into_vec());

        // Transposed apply reads a column of `a` as input
        let z = apply(&LinearMap::from(&a).transpose(), &a.col(0)).unwrap();
        assert_eq!(z, vec![17.0, 22.0, 27.0]);
    }

    #[test]
    fn householder_operator() {
        let op = LinearOperator::from(Householder::from_slice(&[3.0_f64, 4.0], 0).unwrap());
        let y = apply(&op.as_map(), &VectorView::from_slice(&[3.0, 4.0])).unwrap();
        assert!((y[0] + 5.0).abs() < 1e-12);
        assert!(y[1].abs() < 1e-12);
    }

    #[test]
    fn apply_dimension_mismatch() {
        let d = Diagonal::new(vec![1.0_f64, 2.0]);
        let m = LinearMap::Diagonal(&d);
        assert_eq!(
            apply(&m, &VectorView::from_slice(&[1.0, 2.0, 3.0])).unwrap_err(),
            LinalgError::DimensionMismatch { expected: 2, got: 3 }
        );
    }
}

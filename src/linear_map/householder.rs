use alloc::vec::Vec;

use crate::blas::{axpy, dot};
use crate::linalg::LinalgError;
use crate::matrix::{VectorView, VectorViewMut};
use crate::traits::{FloatScalar, Scalar};

/// Householder reflection that zeroes a column below index `k`.
///
/// As a matrix this is `I_k ⊕ (I − 2 v vᵀ)`: identity on the leading `k`
/// coordinates and a reflection through the unit vector `v` on the
/// trailing ones. Applying it costs one dot product and one scaled
/// accumulate over the trailing part; the matrix is never formed.
///
/// The reflection is symmetric, so it is its own transpose.
///
/// ```
/// use reinsch::linear_map::Householder;
///
/// let column = [1.0_f64, 3.0, 4.0];
/// let h = Householder::from_slice(&column, 1).unwrap();
/// let mut x = column;
/// h.update(&mut x).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] + 5.0).abs() < 1e-12);
/// assert!(x[2].abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Householder<T> {
    v: Vec<T>,
    k: usize,
}

impl<T: FloatScalar> Householder<T> {
    /// Build the reflection for `column`, zeroing entries after `k`.
    ///
    /// `v` starts as `column[k..]` with `sign(v₀)·‖column[k..]‖` added to
    /// its first entry, then is normalized. An all-zero tail yields
    /// `v = e₀`, which only flips the sign of entry `k`.
    ///
    /// Fails unless `k < column.len()`.
    pub fn new(column: &VectorView<'_, T>, k: usize) -> Result<Self, LinalgError> {
        if k >= column.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: k + 1,
                got: column.len(),
            });
        }
        let tail = column.subvector(k);
        let mut v = tail.to_vec();
        let c_norm = tail.dot(&tail).sqrt();
        if c_norm == T::zero() {
            v[0] = T::one();
            return Ok(Self { v, k });
        }
        v[0] = if v[0] > T::zero() {
            v[0] + c_norm
        } else {
            v[0] - c_norm
        };
        let v_norm = dot(v.len(), &v, 1, 0, &v, 1, 0).sqrt();
        for vi in v.iter_mut() {
            *vi = *vi / v_norm;
        }
        Ok(Self { v, k })
    }

    /// Same as [`new`](Householder::new) for a contiguous column.
    pub fn from_slice(column: &[T], k: usize) -> Result<Self, LinalgError> {
        Self::new(&VectorView::from_slice(column), k)
    }
}

impl<T> Householder<T> {
    /// Full dimension `k + len(v)`.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.k + self.v.len()
    }

    /// Index of the first reflected coordinate.
    #[inline]
    pub fn offset(&self) -> usize {
        self.k
    }

    /// The unit reflector.
    #[inline]
    pub fn reflector(&self) -> &[T] {
        &self.v
    }

    #[inline]
    pub fn transpose(&self) -> &Self {
        self
    }
}

impl<T: Scalar> Householder<T> {
    /// `x ← x − 2 (vᵀ x[k..]) v` on a strided view, e.g. a matrix column.
    pub fn reflect(&self, x: &mut VectorViewMut<'_, T>) -> Result<(), LinalgError> {
        if x.len() != self.dimension() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.dimension(),
                got: x.len(),
            });
        }
        let n = self.v.len();
        let offset = x.offset + self.k * x.stride;
        let vtx = dot(n, &self.v, 1, 0, x.data, x.stride, offset);
        let two = T::one() + T::one();
        axpy(n, T::zero() - two * vtx, &self.v, 1, 0, x.data, x.stride, offset);
        Ok(())
    }

    /// Apply in place to a contiguous vector.
    pub fn update(&self, x: &mut [T]) -> Result<(), LinalgError> {
        self.reflect(&mut VectorViewMut::from_slice(x))
    }

    /// Call `f(value, i, j)` for the identity diagonal of the leading block
    /// and every cell of the trailing `I − 2 v vᵀ` block.
    pub fn for_each_cell(&self, mut f: impl FnMut(T, usize, usize)) {
        let k = self.k;
        for i in 0..k {
            f(T::one(), i, i);
        }
        let two = T::one() + T::one();
        for (i, &vi) in self.v.iter().enumerate() {
            for (j, &vj) in self.v.iter().enumerate() {
                let delta = if i == j { T::one() } else { T::zero() };
                f(delta - two * vi * vj, k + i, k + j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use alloc::vec;

    const TOL: f64 = 1e-12;

    fn as_matrix(h: &Householder<f64>) -> Matrix<f64> {
        let n = h.dimension();
        let mut m = Matrix::zeros(n, n);
        h.for_each_cell(|c, i, j| m[(i, j)] = c);
        m
    }

    #[test]
    fn zeroes_whole_column() {
        let h = Householder::from_slice(&[3.0_f64, 4.0], 0).unwrap();
        let mut x = [3.0, 4.0];
        h.update(&mut x).unwrap();
        assert!((x[0] + 5.0).abs() < TOL);
        assert!(x[1].abs() < TOL);
    }

    #[test]
    fn negative_lead_reflects_to_positive() {
        let h = Householder::from_slice(&[-3.0_f64, 4.0], 0).unwrap();
        let mut x = [-3.0, 4.0];
        h.update(&mut x).unwrap();
        assert!((x[0] - 5.0).abs() < TOL);
        assert!(x[1].abs() < TOL);
    }

    #[test]
    fn reflector_is_unit() {
        let h = Householder::from_slice(&[1.0_f64, -2.0, 2.0, 0.5], 1).unwrap();
        let norm2: f64 = h.reflector().iter().map(|v| v * v).sum();
        assert!((norm2 - 1.0).abs() < TOL);
        assert_eq!(h.dimension(), 4);
        assert_eq!(h.offset(), 1);
    }

    #[test]
    fn leading_entries_untouched() {
        let column = [7.0_f64, 1.0, 2.0, 2.0];
        let h = Householder::from_slice(&column, 1).unwrap();
        let mut x = column;
        h.update(&mut x).unwrap();
        assert_eq!(x[0], 7.0);
        assert!((x[1] + 3.0).abs() < TOL);
        assert!(x[2].abs() < TOL);
        assert!(x[3].abs() < TOL);
    }

    #[test]
    fn zero_tail_flips_sign() {
        let h = Householder::from_slice(&[5.0_f64, 0.0, 0.0], 1).unwrap();
        assert_eq!(h.reflector(), &[1.0, 0.0]);
        let mut x = [1.0, 2.0, 3.0];
        h.update(&mut x).unwrap();
        assert_eq!(x, [1.0, -2.0, 3.0]);
    }

    #[test]
    fn matrix_form_is_orthogonal_and_symmetric() {
        let h = Householder::from_slice(&[0.3_f64, -1.0, 2.0, 0.7, 1.5], 2).unwrap();
        let m = as_matrix(&h);
        assert!(m.max_abs_diff(&m.transpose()).unwrap() < TOL);
        let mm = m.multiply(&m).unwrap();
        assert!(mm.max_abs_diff(&Matrix::eye(5)).unwrap() < TOL);
        // Leading block is the identity
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 1)], 1.0);
        assert_eq!(m[(0, 1)], 0.0);
        assert_eq!(m[(0, 3)], 0.0);
    }

    #[test]
    fn update_matches_matrix_form() {
        let h = Householder::from_slice(&[1.0_f64, 2.0, -1.0, 3.0], 1).unwrap();
        let x = [0.5_f64, -1.0, 4.0, 2.0];
        let mut y = x;
        h.update(&mut y).unwrap();
        let m = as_matrix(&h);
        let expected = m.multiply(&Matrix::from_slice(&x, 1)).unwrap();
        for i in 0..4 {
            assert!((y[i] - expected[(i, 0)]).abs() < TOL, "row {}", i);
        }
    }

    #[test]
    fn reflect_matrix_column_in_place() {
        // Zero column 1 of a 3×2 matrix below row 0
        let mut a = Matrix::from_vec(vec![9.0_f64, 1.0, 9.0, 2.0, 9.0, 2.0], 2);
        let h = Householder::new(&a.col(1), 0).unwrap();
        h.reflect(&mut a.col_mut(1)).unwrap();
        assert!((a[(0, 1)] + 3.0).abs() < TOL);
        assert!(a[(1, 1)].abs() < TOL);
        assert!(a[(2, 1)].abs() < TOL);
        // Column 0 is not touched
        assert_eq!(a.col(0).to_vec(), vec![9.0, 9.0, 9.0]);
    }

    #[test]
    fn offset_out_of_range() {
        assert_eq!(
            Householder::from_slice(&[1.0_f64, 2.0], 2).unwrap_err(),
            LinalgError::DimensionMismatch { expected: 3, got: 2 }
        );
    }

    #[test]
    fn update_length_mismatch() {
        let h = Householder::from_slice(&[1.0_f64, 2.0], 0).unwrap();
        let mut x = [1.0, 2.0, 3.0];
        assert!(h.update(&mut x).is_err());
    }
}

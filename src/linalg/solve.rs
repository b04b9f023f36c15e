use alloc::vec::Vec;

use tracing::debug;

use crate::linalg::svd::SvdDecomposition;
use crate::linalg::LinalgError;
use crate::linear_map::Diagonal;
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Minimum-norm least-squares solution of `A x ≈ b`.
///
/// Minimizes `‖A x − b‖₂` through the SVD pseudo-inverse. Singular values
/// that are exactly zero contribute nothing, so rank-deficient systems
/// get the minimum-norm solution instead of a division by zero.
///
/// Fails when `a` has fewer rows than columns or `b.len() != a.nrows()`.
///
/// ```
/// use reinsch::{solve, Matrix};
///
/// let a = Matrix::from_vec(vec![1.0_f64, 2.0, 3.0, 4.0], 2);
/// let x = solve(&a, &[1.0, 1.0]).unwrap();
/// assert!((x[0] + 1.0).abs() < 1e-10);
/// assert!((x[1] - 1.0).abs() < 1e-10);
/// ```
pub fn solve<T: FloatScalar>(a: &Matrix<T>, b: &[T]) -> Result<Vec<T>, LinalgError> {
    SvdDecomposition::new(a)?.solve(b)
}

impl<T: FloatScalar> SvdDecomposition<T> {
    /// Least-squares solve against an existing decomposition.
    ///
    /// Computes `x = V · diag(q⁺) · (bᵀ U)ᵀ`, where `q⁺` inverts the
    /// positive singular values and zeroes the rest. Reuse one
    /// decomposition for several right-hand sides.
    ///
    /// ```
    /// use reinsch::Matrix;
    ///
    /// // Fit y = c0 + c1 t through three collinear points.
    /// let a = Matrix::from_vec(vec![1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0], 2);
    /// let svd = a.svd().unwrap();
    /// let c = svd.solve(&[1.0, 3.0, 5.0]).unwrap();
    /// assert!((c[0] - 1.0).abs() < 1e-10);
    /// assert!((c[1] - 2.0).abs() < 1e-10);
    /// ```
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        let m = self.nrows();
        if b.len() != m {
            return Err(LinalgError::DimensionMismatch {
                expected: m,
                got: b.len(),
            });
        }
        if self.singular_values().is_empty() {
            return Ok(Vec::new());
        }

        // bᵀ U as a 1×n row, then scale by the pseudo-inverse diagonal
        let bt = Matrix::from_slice(b, b.len());
        let mut y = bt.multiply(self.u())?.into_vec();
        let q_inv = Diagonal::new(self.inverse_singular_values());
        q_inv.update(&mut y)?;

        let x = self.v().multiply(&Matrix::from_vec(y, 1))?;
        debug!(
            rows = m,
            cols = x.len(),
            rank = self.rank(T::zero()),
            "least squares solve"
        );
        Ok(x.into_vec())
    }
}

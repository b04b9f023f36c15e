pub(crate) mod solve;
pub(crate) mod svd;

pub use solve::solve;
pub use svd::{decompose, SvdDecomposition, SvdOptions, DEFAULT_MAX_ITERATIONS};

/// Errors from matrix products, operators and the decomposition.
///
/// Every variant is a shape error: it is raised before any work is done
/// and no partial result is produced. Numerical non-convergence is not an
/// error; see [`SvdDecomposition::converged`].
///
/// ```
/// use reinsch::{decompose, Matrix};
/// use reinsch::linalg::LinalgError;
///
/// let wide = Matrix::<f64>::zeros(2, 3);
/// assert_eq!(
///     decompose(&wide, None, None).unwrap_err(),
///     LinalgError::TooFewRows { rows: 2, cols: 3 },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// The decomposition needs at least as many rows as columns.
    TooFewRows { rows: usize, cols: usize },
    /// An operand dimension does not line up with its partner.
    DimensionMismatch { expected: usize, got: usize },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::TooFewRows { rows, cols } => {
                write!(f, "invalid matrix: {} rows < {} columns", rows, cols)
            }
            LinalgError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, got)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

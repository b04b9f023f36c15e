use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::traits::Scalar;

/// Diagonal operator `diag(d)`.
///
/// Only the `n` diagonal cells are visited; it is its own transpose.
///
/// ```
/// use reinsch::linear_map::Diagonal;
///
/// let d = Diagonal::new(vec![1.0_f64, 2.0, 3.0]);
/// let mut x = [7.0, 8.0, 9.0];
/// d.update(&mut x).unwrap();
/// assert_eq!(x, [7.0, 16.0, 27.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagonal<T> {
    d: Vec<T>,
}

impl<T> Diagonal<T> {
    pub fn new(d: Vec<T>) -> Self {
        Self { d }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.d.len()
    }

    /// The diagonal entries.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.d
    }

    #[inline]
    pub fn transpose(&self) -> &Self {
        self
    }
}

impl<T: Scalar> Diagonal<T> {
    /// `x ← diag(d) x`.
    pub fn update(&self, x: &mut [T]) -> Result<(), LinalgError> {
        if x.len() != self.d.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.d.len(),
                got: x.len(),
            });
        }
        for (xi, &di) in x.iter_mut().zip(&self.d) {
            *xi = *xi * di;
        }
        Ok(())
    }

    /// Call `f(value, i, i)` for each diagonal cell.
    pub fn for_each_cell(&self, mut f: impl FnMut(T, usize, usize)) {
        for (i, &di) in self.d.iter().enumerate() {
            f(di, i, i);
        }
    }
}

impl<T> From<Vec<T>> for Diagonal<T> {
    fn from(d: Vec<T>) -> Self {
        Self::new(d)
    }
}

use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::traits::{FloatScalar, Scalar};

use super::Matrix;

impl<T> Matrix<T> {
    /// Apply `f` to every element, producing a matrix of the same shape.
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let m = Matrix::from_vec(vec![1, 2, 3, 4], 2);
    /// let f = m.map(|&x| x as f64 / 2.0);
    /// assert_eq!(f[(1, 1)], 2.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Matrix<U> {
        Matrix::from_vec(self.as_slice().iter().map(f).collect(), self.ncols())
    }
}

impl<T: Scalar> Matrix<T> {
    /// Sum of the diagonal elements.
    pub fn trace(&self) -> T {
        let n = self.nrows().min(self.ncols());
        (0..n).fold(T::zero(), |acc, i| acc + self[(i, i)])
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Largest element-wise absolute difference to a matrix of equal shape.
    ///
    /// Returns `None` when the shapes differ.
    ///
    /// ```
    /// use reinsch::Matrix;
    /// let a = Matrix::from_vec(vec![1.0, 2.0], 1);
    /// let b = Matrix::from_vec(vec![1.5, 1.0], 1);
    /// assert_eq!(a.max_abs_diff(&b), Some(1.0));
    /// ```
    pub fn max_abs_diff(&self, other: &Matrix<T>) -> Option<T> {
        if self.ncols() != other.ncols() || self.len() != other.len() {
            return None;
        }
        Some(
            self.as_slice()
                .iter()
                .zip(other.as_slice())
                .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs())),
        )
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows();
        let n = self.ncols();
        let data = self.as_slice();

        // Measure column widths
        let mut widths: Vec<usize> = alloc::vec![0; n];
        for i in 0..m {
            for (j, w) in widths.iter_mut().enumerate() {
                let len = WriteCounting::count(|wc| write!(wc, "{}", data[i * n + j]));
                if len > *w {
                    *w = len;
                }
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", data[i * n + j], width = widths[j])?;
            }
            write!(f, "│")?;
            if i < m - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}

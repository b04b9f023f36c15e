use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::Scalar;

#[derive(Debug)]
enum Source<'a, T> {
    Matrix(&'a Matrix<T>),
    Rows(&'a [Vec<T>]),
}

impl<T> Clone for Source<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Source<'_, T> {}

/// Borrowed dense matrix seen as a linear map.
///
/// Transposing only flips a flag: cells are reported with their row and
/// column swapped, no data is copied.
///
/// ```
/// use reinsch::linear_map::DenseMap;
///
/// let rows = vec![vec![0.0_f64, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]];
/// let m = DenseMap::from_rows(&rows);
/// assert_eq!(m.input_dimension(), 2);
/// assert_eq!(m.output_dimension(), 3);
/// assert_eq!(m.transpose().input_dimension(), 3);
/// ```
#[derive(Debug)]
pub struct DenseMap<'a, T> {
    source: Source<'a, T>,
    transposed: bool,
}

impl<T> Clone for DenseMap<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DenseMap<'_, T> {}

impl<'a, T> DenseMap<'a, T> {
    pub fn from_matrix(m: &'a Matrix<T>) -> Self {
        Self {
            source: Source::Matrix(m),
            transposed: false,
        }
    }

    /// Wrap a list of equally long rows.
    ///
    /// Panics if the rows have different lengths.
    pub fn from_rows(rows: &'a [Vec<T>]) -> Self {
        let ncols = rows.first().map_or(0, Vec::len);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), ncols, "row {} has length {}, expected {}", i, row.len(), ncols);
        }
        Self {
            source: Source::Rows(rows),
            transposed: false,
        }
    }

    fn shape(&self) -> (usize, usize) {
        match self.source {
            Source::Matrix(m) => (m.nrows(), m.ncols()),
            Source::Rows(rows) => (rows.len(), rows.first().map_or(0, Vec::len)),
        }
    }

    /// Column count of the (possibly transposed) matrix.
    pub fn input_dimension(&self) -> usize {
        let (m, n) = self.shape();
        if self.transposed {
            m
        } else {
            n
        }
    }

    /// Row count of the (possibly transposed) matrix.
    pub fn output_dimension(&self) -> usize {
        let (m, n) = self.shape();
        if self.transposed {
            n
        } else {
            m
        }
    }

    /// The same data viewed as its transpose.
    pub fn transpose(&self) -> Self {
        Self {
            source: self.source,
            transposed: !self.transposed,
        }
    }

    pub fn is_transposed(&self) -> bool {
        self.transposed
    }
}

impl<T: Scalar> DenseMap<'_, T> {
    /// Call `f(value, i, j)` for every cell.
    pub fn for_each_cell(&self, mut f: impl FnMut(T, usize, usize)) {
        let transposed = self.transposed;
        let mut emit = |c: T, i: usize, j: usize| {
            if transposed {
                f(c, j, i)
            } else {
                f(c, i, j)
            }
        };
        match self.source {
            Source::Matrix(m) => {
                let n = m.ncols();
                for (idx, &c) in m.as_slice().iter().enumerate() {
                    emit(c, idx / n, idx % n);
                }
            }
            Source::Rows(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    for (j, &c) in row.iter().enumerate() {
                        emit(c, i, j);
                    }
                }
            }
        }
    }
}

//! Golub–Reinsch singular value decomposition.
//!
//! Four phases over a private copy of the input:
//!
//! 1. Householder reduction to upper bidiagonal form, in place.
//! 2. Accumulation of the right-hand transforms into `V`.
//! 3. Accumulation of the left-hand transforms into `U`, overwriting the
//!    working copy.
//! 4. Implicit-shift QR sweeps on the bidiagonal until every
//!    super-diagonal entry is negligible.
//!
//! Reference: G. H. Golub and C. Reinsch, "Singular Value Decomposition
//! and Least Squares Solutions", Numer. Math. 14 (1970).

use alloc::vec;
use alloc::vec::Vec;

use tracing::{debug, warn};

use crate::blas::{axpy, axpy_within, dot};
use crate::linalg::LinalgError;
use crate::matrix::{row_row_dot, Matrix};
use crate::traits::FloatScalar;

/// QR sweeps allowed per singular value before giving up on it.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

// ── Options ─────────────────────────────────────────────────────────

/// Numeric tolerances for [`SvdDecomposition::with_options`].
///
/// - `eps`: relative precision. Defaults to the machine epsilon of `T`.
///   Scaled by the largest `|diag| + |off_diag|` of the bidiagonal form,
///   it is the threshold below which entries are treated as zero.
/// - `tol`: smallest squared column/row norm worth reflecting. Defaults to
///   `1e-64 / eps`. Must be positive.
/// - `max_iterations`: QR sweeps per singular value (default 50).
///
/// ```
/// use reinsch::{Matrix, SvdDecomposition, SvdOptions};
///
/// let a = Matrix::from_vec(vec![2.0_f64, 0.0, 0.0, 1.0], 2);
/// let opts = SvdOptions::new().with_eps(1e-12).with_max_iterations(75);
/// let svd = SvdDecomposition::with_options(&a, &opts).unwrap();
/// assert!(svd.converged());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdOptions<T> {
    eps: Option<T>,
    tol: Option<T>,
    max_iterations: usize,
}

impl<T> Default for SvdOptions<T> {
    fn default() -> Self {
        Self {
            eps: None,
            tol: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl<T: FloatScalar> SvdOptions<T> {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the relative precision.
    pub fn with_eps(mut self, eps: T) -> Self {
        self.eps = Some(eps);
        self
    }

    /// Override the reflection tolerance.
    pub fn with_tol(mut self, tol: T) -> Self {
        self.tol = Some(tol);
        self
    }

    /// Override the per-value sweep budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Effective relative precision.
    pub fn eps(&self) -> T {
        self.eps.unwrap_or_else(T::epsilon)
    }

    /// Effective reflection tolerance.
    pub fn tol(&self) -> T {
        self.tol.unwrap_or_else(|| T::default_tol(self.eps()))
    }

    /// Effective sweep budget.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

// ── Phase 1: Householder bidiagonalization ──────────────────────────

/// Bidiagonal form produced by [`bidiagonalize`].
struct Bidiagonal<T> {
    /// Diagonal entries.
    diag: Vec<T>,
    /// `off_diag[i]` couples columns `i - 1` and `i`; `off_diag[0]` is zero.
    off_diag: Vec<T>,
    /// Largest `|diag[i]| + |off_diag[i]|`.
    max_norm: T,
}

/// Reduce the m×n row-major buffer `w` to upper bidiagonal form.
///
/// On return the Householder vectors are left in `w`: column `i` below
/// the diagonal holds the left reflector of step `i`, row `i` right of
/// the super-diagonal holds the right reflector. Columns or rows whose
/// squared norm is below `tol` are not reflected.
fn bidiagonalize<T: FloatScalar>(w: &mut [T], m: usize, n: usize, tol: T) -> Bidiagonal<T> {
    let zero = T::zero();
    let mut diag = vec![zero; n];
    let mut off_diag = vec![zero; n];
    let mut g = zero;
    let mut max_norm = zero;

    for i in 0..n {
        off_diag[i] = g;
        let l = i + 1;
        let ii = i * n + i;

        // Left reflection: zero w[i+1.., i]
        let s = dot(m - i, w, n, ii, w, n, ii);
        if s < tol {
            g = zero;
        } else {
            let f = w[ii];
            g = if f < zero { s.sqrt() } else { -s.sqrt() };
            let h = f * g - s;
            w[ii] = f - g;
            for j in l..n {
                let s = dot(m - i, w, n, ii, w, n, i * n + j);
                axpy_within(m - i, s / h, w, n, ii, n, i * n + j);
            }
        }
        diag[i] = g;

        // Right reflection: zero w[i, i+2..]
        let s = if l < n {
            dot(n - l, w, 1, i * n + l, w, 1, i * n + l)
        } else {
            zero
        };
        if l >= n || s < tol {
            g = zero;
        } else {
            let f = w[i * n + l];
            g = if f < zero { s.sqrt() } else { -s.sqrt() };
            let h = f * g - s;
            w[i * n + l] = f - g;
            // off_diag[l..] doubles as scratch for the scaled reflector
            for j in l..n {
                off_diag[j] = w[i * n + j] / h;
            }
            for j in l..m {
                let s = dot(n - l, w, 1, j * n + l, w, 1, i * n + l);
                axpy(n - l, s, &off_diag, 1, l, w, 1, j * n + l);
            }
        }

        let y = diag[i].abs() + off_diag[i].abs();
        if y > max_norm {
            max_norm = y;
        }
    }

    Bidiagonal {
        diag,
        off_diag,
        max_norm,
    }
}

// ── Phase 2: right-hand transforms ──────────────────────────────────

/// Build the n×n orthogonal `V` from the right reflectors stored in `w`.
fn accumulate_right<T: FloatScalar>(w: &[T], off_diag: &[T], n: usize) -> Vec<T> {
    let zero = T::zero();
    let mut v = vec![zero; n * n];
    let mut g = zero;
    let mut l = n;

    for i in (0..n).rev() {
        if g != zero {
            let h = w[i * n + i + 1] * g;
            for j in l..n {
                v[j * n + i] = w[i * n + j] / h;
            }
            for j in l..n {
                let s = dot(n - l, w, 1, i * n + l, &v, n, l * n + j);
                axpy_within(n - l, s, &mut v, n, l * n + i, n, l * n + j);
            }
        }
        for j in l..n {
            v[i * n + j] = zero;
            v[j * n + i] = zero;
        }
        v[i * n + i] = T::one();
        g = off_diag[i];
        l = i;
    }
    v
}

// ── Phase 3: left-hand transforms ───────────────────────────────────

/// Turn the left reflectors stored in `w` into the m×n orthonormal `U`.
///
/// Columns whose reflection was skipped become unit vectors.
fn accumulate_left<T: FloatScalar>(w: &mut [T], diag: &[T], m: usize, n: usize) {
    let zero = T::zero();

    for i in (0..n).rev() {
        let l = i + 1;
        let g = diag[i];
        let ii = i * n + i;
        for j in l..n {
            w[i * n + j] = zero;
        }
        if g != zero {
            let h = w[ii] * g;
            for j in l..n {
                let s = dot(m - l, w, n, l * n + i, w, n, l * n + j);
                axpy_within(m - i, s / h, w, n, ii, n, i * n + j);
            }
            for j in i..m {
                w[j * n + i] = w[j * n + i] / g;
            }
        } else {
            for j in i..m {
                w[j * n + i] = zero;
            }
        }
        w[ii] = w[ii] + T::one();
    }
}

// ── Phase 4: implicit-shift QR on the bidiagonal ────────────────────

/// Rotate columns `a` and `b` of a row-major buffer with `ncols` columns.
#[inline]
fn rotate_columns<T: FloatScalar>(buf: &mut [T], ncols: usize, a: usize, b: usize, c: T, s: T) {
    for row in buf.chunks_exact_mut(ncols) {
        let y = row[a];
        let z = row[b];
        row[a] = y * c + z * s;
        row[b] = -y * s + z * c;
    }
}

#[inline]
fn negate_column<T: FloatScalar>(buf: &mut [T], ncols: usize, k: usize) {
    for row in buf.chunks_exact_mut(ncols) {
        row[k] = -row[k];
    }
}

/// Scan down from `k` for the start of the unreduced block.
///
/// Returns `(l, true)` when `off_diag[l]` is negligible, and `(l, false)`
/// when instead `diag[l - 1]` is, which calls for a cancellation sweep.
fn find_split<T: FloatScalar>(diag: &[T], off_diag: &[T], k: usize, eps: T) -> (usize, bool) {
    let mut l = k;
    loop {
        // off_diag[0] is structurally zero, so l == 0 always splits
        if l == 0 || off_diag[l].abs() <= eps {
            return (l, true);
        }
        if diag[l - 1].abs() <= eps {
            return (l, false);
        }
        l -= 1;
    }
}

/// Chase `off_diag[l..=k]` to zero after `diag[l - 1]` vanished, rotating
/// the matching columns of `U`.
fn cancel<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    l: usize,
    k: usize,
    eps: T,
    mut u: Option<&mut [T]>,
    n: usize,
) {
    let l1 = l - 1;
    let mut c = T::zero();
    let mut s = T::one();
    for i in l..=k {
        let f = s * off_diag[i];
        off_diag[i] = c * off_diag[i];
        if f.abs() <= eps {
            break;
        }
        let g = diag[i];
        let h = (f * f + g * g).sqrt();
        diag[i] = h;
        c = g / h;
        s = -f / h;
        if let Some(u) = u.as_deref_mut() {
            rotate_columns(u, n, l1, i, c, s);
        }
    }
}

/// Diagonalize the bidiagonal form in place.
///
/// `eps` is the absolute threshold (already scaled by the matrix norm).
/// Returns `false` if some value used up its sweep budget; that value is
/// left as it stood after the last sweep.
fn diagonalize<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    mut u: Option<&mut [T]>,
    mut v: Option<&mut [T]>,
    n: usize,
    eps: T,
    max_iterations: usize,
) -> bool {
    let zero = T::zero();
    let one = T::one();
    let two = one + one;
    let mut converged = true;

    for k in (0..n).rev() {
        let mut isolated = false;
        for _ in 0..max_iterations {
            let (l, split) = find_split(diag, off_diag, k, eps);
            if !split {
                cancel(diag, off_diag, l, k, eps, u.as_deref_mut(), n);
            }

            let z = diag[k];
            if l == k {
                if z < zero {
                    diag[k] = -z;
                    if let Some(v) = v.as_deref_mut() {
                        negate_column(v, n, k);
                    }
                }
                isolated = true;
                break;
            }

            // Shift from the trailing 2×2 minor
            let mut x = diag[l];
            let y = diag[k - 1];
            let g = off_diag[k - 1];
            let h = off_diag[k];
            let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (two * h * y);
            let g = (f * f + one).sqrt();
            let denom = if f < zero { f - g } else { f + g };
            f = ((x - z) * (x + z) + h * (y / denom - h)) / x;

            // QR sweep
            let mut c = one;
            let mut s = one;
            for i in (l + 1)..=k {
                let mut g = off_diag[i];
                let mut y = diag[i];
                let mut h = s * g;
                g = c * g;
                let mut z = (f * f + h * h).sqrt();
                off_diag[i - 1] = z;
                // z == 0: any rotation works, keep the previous one
                if z != zero {
                    c = f / z;
                    s = h / z;
                }
                f = x * c + g * s;
                g = -x * s + g * c;
                h = y * s;
                y = y * c;
                if let Some(v) = v.as_deref_mut() {
                    rotate_columns(v, n, i - 1, i, c, s);
                }
                z = (f * f + h * h).sqrt();
                diag[i - 1] = z;
                if z != zero {
                    c = f / z;
                    s = h / z;
                }
                f = c * g + s * y;
                x = -s * g + c * y;
                if let Some(u) = u.as_deref_mut() {
                    rotate_columns(u, n, i - 1, i, c, s);
                }
            }
            off_diag[l] = zero;
            off_diag[k] = f;
            diag[k] = x;
        }

        if !isolated {
            converged = false;
            warn!(
                index = k,
                iterations = max_iterations,
                "singular value did not converge; keeping last iterate"
            );
        }
    }
    converged
}

// ── Driver ──────────────────────────────────────────────────────────

struct Factors<T> {
    q: Vec<T>,
    u: Vec<T>,
    v: Vec<T>,
    converged: bool,
}

fn golub_reinsch<T: FloatScalar>(
    a: &Matrix<T>,
    options: &SvdOptions<T>,
    vectors: bool,
) -> Result<Factors<T>, LinalgError> {
    let m = a.nrows();
    let n = a.ncols();
    if m < n {
        return Err(LinalgError::TooFewRows { rows: m, cols: n });
    }
    debug!(rows = m, cols = n, vectors, "svd");

    // Scratch copy; the caller's buffer is never written.
    let mut w = a.as_slice().to_vec();
    if n == 0 {
        return Ok(Factors {
            q: Vec::new(),
            u: w,
            v: Vec::new(),
            converged: true,
        });
    }

    let Bidiagonal {
        diag: mut q,
        mut off_diag,
        max_norm,
    } = bidiagonalize(&mut w, m, n, options.tol());

    let mut v = if vectors {
        accumulate_right(&w, &off_diag, n)
    } else {
        Vec::new()
    };
    if vectors {
        accumulate_left(&mut w, &q, m, n);
    }

    let eps = options.eps() * max_norm;
    let (u_buf, v_buf) = if vectors {
        (Some(w.as_mut_slice()), Some(v.as_mut_slice()))
    } else {
        (None, None)
    };
    let converged = diagonalize(
        &mut q,
        &mut off_diag,
        u_buf,
        v_buf,
        n,
        eps,
        options.max_iterations(),
    );

    for qi in q.iter_mut() {
        if *qi < eps {
            *qi = T::zero();
        }
    }
    debug!(max_norm = ?max_norm, converged, "svd done");

    Ok(Factors {
        q,
        u: w,
        v,
        converged,
    })
}

// ── SvdDecomposition ────────────────────────────────────────────────

/// Singular value decomposition of an m×n matrix (m ≥ n).
///
/// Holds the singular values `q` (length n), the left basis `U` (m×n,
/// orthonormal columns) and the right basis `V` (n×n, orthogonal) with
/// `A = U · diag(q) · Vᵀ`.
///
/// Singular values are non-negative but **not sorted**: they come out in
/// the order the QR sweeps isolate them. Call
/// [`sort_descending`](SvdDecomposition::sort_descending) when order
/// matters.
///
/// # Example
///
/// ```
/// use reinsch::{Matrix, SvdDecomposition};
///
/// let a = Matrix::from_vec(vec![
///     1.0_f64, 0.0,
///     0.0, 2.0,
///     0.0, 0.0,
/// ], 2);
/// let mut svd = SvdDecomposition::new(&a).unwrap();
/// svd.sort_descending();
/// assert!((svd.singular_values()[0] - 2.0).abs() < 1e-12);
/// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-12);
/// assert_eq!(svd.u().nrows(), 3);
/// assert_eq!(svd.v().nrows(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SvdDecomposition<T> {
    q: Vec<T>,
    u: Matrix<T>,
    v: Matrix<T>,
    // Row count of the input; `u` cannot carry it when n == 0
    rows: usize,
    converged: bool,
}

impl<T: FloatScalar> SvdDecomposition<T> {
    /// Decompose with default tolerances.
    ///
    /// Fails with [`LinalgError::TooFewRows`] when `a` has fewer rows than
    /// columns; transpose first for wide matrices.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::with_options(a, &SvdOptions::default())
    }

    /// Decompose with explicit tolerances.
    pub fn with_options(a: &Matrix<T>, options: &SvdOptions<T>) -> Result<Self, LinalgError> {
        let n = a.ncols();
        let f = golub_reinsch(a, options, true)?;
        Ok(Self {
            q: f.q,
            u: Matrix::from_vec(f.u, n),
            v: Matrix::from_vec(f.v, n),
            rows: a.nrows(),
            converged: f.converged,
        })
    }

    /// Singular values only; skips building `U` and `V`.
    ///
    /// Returns the same values, in the same order, as the full
    /// decomposition.
    ///
    /// ```
    /// use reinsch::{Matrix, SvdDecomposition, SvdOptions};
    ///
    /// let a = Matrix::from_vec(vec![3.0_f64, 0.0, 0.0, 4.0], 2);
    /// let sv = SvdDecomposition::singular_values_only(&a, &SvdOptions::new()).unwrap();
    /// assert_eq!(sv.len(), 2);
    /// assert!(sv.iter().any(|&s| (s - 4.0).abs() < 1e-12));
    /// ```
    pub fn singular_values_only(a: &Matrix<T>, options: &SvdOptions<T>) -> Result<Vec<T>, LinalgError> {
        golub_reinsch(a, options, false).map(|f| f.q)
    }

    /// The singular values, in algorithm order.
    #[inline]
    pub fn singular_values(&self) -> &[T] {
        &self.q
    }

    /// Row count `m` of the decomposed matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Left basis `U` (m×n).
    #[inline]
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Right basis `V` (n×n). Columns of `V`, not rows, are the right
    /// singular vectors.
    #[inline]
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// Whether every singular value was isolated within the sweep budget.
    ///
    /// When `false` the factors are still returned; the values that ran
    /// out of sweeps are best-effort.
    #[inline]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Consume into `(q, U, V)`.
    pub fn into_parts(self) -> (Vec<T>, Matrix<T>, Matrix<T>) {
        (self.q, self.u, self.v)
    }

    /// Numerical rank: number of singular values above `tol`.
    pub fn rank(&self, tol: T) -> usize {
        self.q.iter().filter(|&&s| s > tol).count()
    }

    /// Condition number `σ_max / σ_min`.
    ///
    /// Infinity if some singular value is zero; one for an empty matrix.
    pub fn condition_number(&self) -> T {
        if self.q.is_empty() {
            return T::one();
        }
        let s_max = self.q.iter().fold(T::zero(), |acc, &s| acc.max(s));
        let s_min = self.q.iter().fold(T::infinity(), |acc, &s| acc.min(s));
        if s_min == T::zero() {
            T::infinity()
        } else {
            s_max / s_min
        }
    }

    /// Reorder singular values descending, permuting the columns of `U`
    /// and `V` to match.
    ///
    /// ```
    /// use reinsch::{Matrix, SvdDecomposition};
    ///
    /// let a = Matrix::from_vec(vec![1.0_f64, 0.0, 0.0, 3.0], 2);
    /// let mut svd = SvdDecomposition::new(&a).unwrap();
    /// svd.sort_descending();
    /// assert!(svd.singular_values()[0] >= svd.singular_values()[1]);
    /// ```
    pub fn sort_descending(&mut self) {
        let n = self.q.len();
        for i in 0..n {
            let mut max_idx = i;
            for j in (i + 1)..n {
                if self.q[j] > self.q[max_idx] {
                    max_idx = j;
                }
            }
            if max_idx != i {
                self.q.swap(i, max_idx);
                swap_columns(self.u.as_mut_slice(), n, i, max_idx);
                swap_columns(self.v.as_mut_slice(), n, i, max_idx);
            }
        }
    }

    /// Moore–Penrose pseudo-inverse `V · diag(q⁺) · Uᵀ` (n×m).
    ///
    /// `q⁺[i] = 1 / q[i]` for positive values and zero otherwise.
    pub fn pseudo_inverse(&self) -> Matrix<T> {
        let n = self.q.len();
        let q_inv = self.inverse_singular_values();
        let scaled_v = Matrix::from_fn(n, n, |i, k| self.v[(i, k)] * q_inv[k]);
        Matrix::from_fn(n, self.u.nrows(), |i, j| {
            row_row_dot(&scaled_v, i, &self.u, j)
        })
    }

    /// `1 / q[i]` where `q[i] > 0`, else zero.
    pub(crate) fn inverse_singular_values(&self) -> Vec<T> {
        self.q
            .iter()
            .map(|&s| if s > T::zero() { T::one() / s } else { T::zero() })
            .collect()
    }
}

fn swap_columns<T: Copy>(buf: &mut [T], ncols: usize, a: usize, b: usize) {
    for row in buf.chunks_exact_mut(ncols) {
        row.swap(a, b);
    }
}

/// Decompose `a` with optional `eps` and `tol` overrides.
///
/// The free-function form of [`SvdDecomposition::with_options`].
///
/// ```
/// use reinsch::{decompose, Matrix};
///
/// let a = Matrix::from_vec(vec![3.0_f64, 2.0, 2.0, 3.0], 2);
/// let svd = decompose(&a, None, None).unwrap();
/// let mut q = svd.singular_values().to_vec();
/// q.sort_by(|a, b| b.partial_cmp(a).unwrap());
/// assert!((q[0] - 5.0).abs() < 1e-12);
/// assert!((q[1] - 1.0).abs() < 1e-12);
/// ```
pub fn decompose<T: FloatScalar>(
    a: &Matrix<T>,
    eps: Option<T>,
    tol: Option<T>,
) -> Result<SvdDecomposition<T>, LinalgError> {
    let mut options = SvdOptions::new();
    if let Some(eps) = eps {
        options = options.with_eps(eps);
    }
    if let Some(tol) = tol {
        options = options.with_tol(tol);
    }
    SvdDecomposition::with_options(a, &options)
}

impl<T: FloatScalar> Matrix<T> {
    /// Singular value decomposition with default tolerances.
    ///
    /// ```
    /// use reinsch::Matrix;
    ///
    /// let a = Matrix::from_vec(vec![1.0_f64, 0.0, 0.0, 1.0, 0.0, 0.0], 2);
    /// let svd = a.svd().unwrap();
    /// assert!(svd.singular_values().iter().all(|&s| (s - 1.0).abs() < 1e-12));
    /// ```
    pub fn svd(&self) -> Result<SvdDecomposition<T>, LinalgError> {
        SvdDecomposition::new(self)
    }

    /// Singular values only, default tolerances.
    pub fn singular_values_only(&self) -> Result<Vec<T>, LinalgError> {
        SvdDecomposition::singular_values_only(self, &SvdOptions::default())
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{diagonal_multiply, multiply};
    use alloc::format;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn sorted_desc(v: &[f64]) -> Vec<f64> {
        let mut v = v.to_vec();
        v.sort_by(|a, b| b.partial_cmp(a).unwrap());
        v
    }

    fn assert_orthonormal_columns(m: &Matrix<f64>, tol: f64, name: &str) {
        let mtm = multiply(&m.transpose(), m).unwrap();
        for i in 0..mtm.nrows() {
            for j in 0..mtm.ncols() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(mtm[(i, j)], expected, tol, &format!("{}ᵀ{}[({},{})]", name, name, i, j));
            }
        }
    }

    fn assert_reconstructs(a: &Matrix<f64>, svd: &SvdDecomposition<f64>, tol: f64) {
        // U · diag(q) · Vᵀ = U · (diag(q) · Vᵀ)
        let qvt = diagonal_multiply(svd.singular_values(), &svd.v().transpose()).unwrap();
        let usv = multiply(svd.u(), &qvt).unwrap();
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_near(usv[(i, j)], a[(i, j)], tol, &format!("UΣVᵀ[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn identity_2x2() {
        let a = Matrix::<f64>::eye(2);
        let svd = a.svd().unwrap();
        for i in 0..2 {
            assert_near(svd.singular_values()[i], 1.0, TOL, &format!("σ[{}]", i));
        }
        assert_orthonormal_columns(svd.u(), TOL, "U");
        assert_orthonormal_columns(svd.v(), TOL, "V");
        assert_reconstructs(&a, &svd, TOL);
    }

    #[test]
    fn diagonal_matrix() {
        let a = Matrix::from_vec(vec![5.0_f64, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 1.0], 3);
        let svd = a.svd().unwrap();
        let q = sorted_desc(svd.singular_values());
        assert_near(q[0], 5.0, TOL, "σ[0]");
        assert_near(q[1], 3.0, TOL, "σ[1]");
        assert_near(q[2], 1.0, TOL, "σ[2]");
    }

    #[test]
    fn negative_entries_give_non_negative_values() {
        let a = Matrix::from_vec(vec![-3.0_f64, 0.0, 0.0, 2.0], 2);
        let svd = a.svd().unwrap();
        assert!(svd.singular_values().iter().all(|&s| s >= 0.0));
        let q = sorted_desc(svd.singular_values());
        assert_near(q[0], 3.0, TOL, "σ[0]");
        assert_near(q[1], 2.0, TOL, "σ[1]");
        assert_reconstructs(&a, &svd, TOL);
    }

    #[test]
    fn known_2x2() {
        // AᵀA = [[13, 12], [12, 13]], eigenvalues 25 and 1
        let a = Matrix::from_vec(vec![3.0_f64, 2.0, 2.0, 3.0], 2);
        let svd = a.svd().unwrap();
        let q = sorted_desc(svd.singular_values());
        assert_near(q[0], 5.0, TOL, "σ[0]");
        assert_near(q[1], 1.0, TOL, "σ[1]");
        assert_reconstructs(&a, &svd, 1e-12);
    }

    #[test]
    fn reconstruction_5x3() {
        let a = Matrix::from_vec(
            vec![
                1.0_f64, 2.0, 3.0, //
                4.0, 5.0, 6.0, //
                7.0, 8.0, 0.0, //
                10.0, 11.0, 1.0, //
                13.0, 14.0, 2.0,
            ],
            3,
        );
        let svd = a.svd().unwrap();
        assert!(svd.converged());
        assert_eq!(svd.u().nrows(), 5);
        assert_eq!(svd.u().ncols(), 3);
        assert_eq!(svd.v().nrows(), 3);
        assert_orthonormal_columns(svd.u(), 1e-10, "U");
        assert_orthonormal_columns(svd.v(), 1e-10, "V");
        assert_reconstructs(&a, &svd, 1e-9);
    }

    #[test]
    fn rank_deficient() {
        let a = Matrix::from_vec(vec![1.0_f64, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 6.0, 9.0], 3);
        let svd = a.svd().unwrap();
        let q = sorted_desc(svd.singular_values());
        assert!(q[0] > 1.0);
        assert!(q[1] < 1e-9);
        assert!(q[2] < 1e-9);
        assert_eq!(svd.rank(1e-9), 1);
        assert_reconstructs(&a, &svd, 1e-9);
    }

    #[test]
    fn zero_matrix() {
        let a = Matrix::<f64>::zeros(4, 3);
        let svd = a.svd().unwrap();
        assert!(svd.converged());
        assert!(svd.singular_values().iter().all(|&s| s == 0.0));
        assert_orthonormal_columns(svd.u(), TOL, "U");
        assert_orthonormal_columns(svd.v(), TOL, "V");
    }

    #[test]
    fn zero_column_is_skipped() {
        let a = Matrix::from_vec(vec![0.0_f64, 1.0, 0.0, 2.0, 0.0, 3.0], 2);
        let svd = a.svd().unwrap();
        let q = sorted_desc(svd.singular_values());
        assert_near(q[0], 14.0_f64.sqrt(), TOL, "σ[0]");
        assert_eq!(q[1], 0.0);
        assert_reconstructs(&a, &svd, 1e-12);
    }

    #[test]
    fn single_column() {
        let a = Matrix::from_vec(vec![3.0_f64, 4.0], 1);
        let svd = a.svd().unwrap();
        assert_near(svd.singular_values()[0], 5.0, TOL, "σ");
        assert_reconstructs(&a, &svd, TOL);
    }

    #[test]
    fn size_1x1_negative() {
        let a = Matrix::from_vec(vec![-5.0_f64], 1);
        let svd = a.svd().unwrap();
        assert_near(svd.singular_values()[0], 5.0, TOL, "σ");
        assert_near(svd.u()[(0, 0)] * svd.v()[(0, 0)], -1.0, TOL, "u·v");
    }

    #[test]
    fn no_columns() {
        let a: Matrix<f64> = Matrix::from_vec(vec![], 0);
        let svd = a.svd().unwrap();
        assert!(svd.singular_values().is_empty());
        assert_eq!(svd.condition_number(), 1.0);
    }

    #[test]
    fn wide_matrix_rejected() {
        let a = Matrix::<f64>::zeros(2, 3);
        assert_eq!(
            a.svd().unwrap_err(),
            LinalgError::TooFewRows { rows: 2, cols: 3 }
        );
        assert!(a.singular_values_only().is_err());
    }

    #[test]
    fn input_is_not_mutated() {
        let a = Matrix::from_vec(vec![4.0_f64, 1.0, -2.0, 3.0, 0.5, 7.0], 2);
        let before = a.clone();
        let _ = a.svd().unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn values_only_match_full() {
        let a = Matrix::from_fn(6, 4, |i, j| ((i * 7 + j * 3) % 5) as f64 - 2.0 + 0.1 * i as f64);
        let full = a.svd().unwrap();
        let only = a.singular_values_only().unwrap();
        assert_eq!(full.singular_values(), only.as_slice());
    }

    #[test]
    fn zero_budget_reports_non_convergence() {
        let a = Matrix::from_vec(vec![3.0_f64, 2.0, 2.0, 3.0], 2);
        let opts = SvdOptions::new().with_max_iterations(0);
        let svd = SvdDecomposition::with_options(&a, &opts).unwrap();
        assert!(!svd.converged());
        assert_eq!(svd.singular_values().len(), 2);
    }

    #[test]
    fn options_defaults() {
        let opts = SvdOptions::<f64>::new();
        assert_eq!(opts.eps(), f64::EPSILON);
        assert_eq!(opts.tol(), 1e-64 / f64::EPSILON);
        assert_eq!(opts.max_iterations(), 50);
        assert_eq!(opts.with_eps(1e-10).tol(), 1e-64 / 1e-10);
        assert_eq!(opts.with_tol(1e-30).tol(), 1e-30);
    }

    #[test]
    fn decompose_matches_default() {
        let a = Matrix::from_fn(5, 3, |i, j| (i as f64 - j as f64).sin());
        let a1 = decompose(&a, None, None).unwrap();
        let a2 = SvdDecomposition::new(&a).unwrap();
        assert_eq!(a1, a2);
    }

    #[test]
    fn sort_descending_keeps_factorization() {
        let a = Matrix::from_fn(5, 4, |i, j| 1.0 / (i + j + 1) as f64 + if i == j { 1.0 } else { 0.0 });
        let mut svd = a.svd().unwrap();
        svd.sort_descending();
        let q = svd.singular_values();
        for i in 1..q.len() {
            assert!(q[i - 1] >= q[i], "not descending at {}", i);
        }
        assert_reconstructs(&a, &svd, 1e-10);
    }

    #[test]
    fn rank_and_condition() {
        let a = Matrix::from_vec(vec![2.0_f64, 0.0, 0.0, 0.5], 2);
        let svd = a.svd().unwrap();
        assert_eq!(svd.rank(1e-10), 2);
        assert_near(svd.condition_number(), 4.0, TOL, "cond");
    }

    #[test]
    fn pseudo_inverse_of_invertible() {
        let a = Matrix::from_vec(vec![1.0_f64, 2.0, 3.0, 4.0], 2);
        let pinv = a.svd().unwrap().pseudo_inverse();
        // inverse of [[1,2],[3,4]] is [[-2,1],[1.5,-0.5]]
        let expected = [-2.0, 1.0, 1.5, -0.5];
        for (k, (&got, &want)) in pinv.as_slice().iter().zip(expected.iter()).enumerate() {
            assert_near(got, want, 1e-10, &format!("pinv[{}]", k));
        }
    }

    #[test]
    fn pseudo_inverse_shape() {
        let a = Matrix::from_fn(4, 2, |i, j| (i + 2 * j) as f64);
        let pinv = a.svd().unwrap().pseudo_inverse();
        assert_eq!(pinv.nrows(), 2);
        assert_eq!(pinv.ncols(), 4);
        // A⁺ A = I for full column rank
        let pa = multiply(&pinv, &a).unwrap();
        assert!(pa.max_abs_diff(&Matrix::eye(2)).unwrap() < 1e-10);
    }

    #[test]
    fn f32_support() {
        let a = Matrix::from_vec(vec![3.0_f32, 1.0, 1.0, 3.0], 2);
        let svd = a.svd().unwrap();
        let mut q = svd.singular_values().to_vec();
        q.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert!((q[0] - 4.0).abs() < 1e-5);
        assert!((q[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn deterministic() {
        let a = Matrix::from_fn(7, 5, |i, j| ((i * 31 + j * 17) % 11) as f64 - 5.0);
        let first = a.svd().unwrap();
        let second = a.svd().unwrap();
        assert_eq!(first, second);
    }
}

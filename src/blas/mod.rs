//! Level-1 BLAS kernels over strided buffers.
//!
//! Every vector is described by a base slice, a stride and an offset, so
//! rows and columns of a row-major matrix can be addressed in place without
//! copying them out. These are the innermost loops of the SVD: they run
//! O(m·n²) times per decomposition and never allocate.
//!
//! ## Dispatch strategy
//!
//! When both strides are 1 the contiguous kernels in [`unrolled`] are used.
//! They peel off the `n % 4` leading elements and then work in blocks of
//! four. Any other stride pair goes through the plain strided loops.
//!
//! The unrolled dot product accumulates each block of four as a single
//! partial sum before adding it to the running total. That order is part
//! of the contract: decompositions are reproducible bit-for-bit.
//!
//! ## Bounds
//!
//! Callers guarantee that `offset + (n - 1) * stride` is in range for every
//! operand. Ranges are sliced once up front so the inner loops carry no
//! per-element checks; an out-of-range extent panics at that point.

pub(crate) mod unrolled;

use crate::traits::Scalar;

/// Dot product of two strided vectors.
///
/// Sums `x[offset_x + i * stride_x] * y[offset_y + i * stride_y]` for
/// `i` in `0..n`.
///
/// ```
/// use reinsch::blas::dot;
///
/// // Row 0 of a 2×2 row-major matrix against column 1.
/// let a = [1.0_f64, 2.0, 3.0, 4.0];
/// assert_eq!(dot(2, &a, 1, 0, &a, 2, 1), 10.0);
/// ```
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn dot<T: Scalar>(
    n: usize,
    x: &[T],
    stride_x: usize,
    offset_x: usize,
    y: &[T],
    stride_y: usize,
    offset_y: usize,
) -> T {
    if n == 0 {
        return T::zero();
    }
    if stride_x == 1 && stride_y == 1 {
        return unrolled::dot(&x[offset_x..offset_x + n], &y[offset_y..offset_y + n]);
    }
    let xs = x[offset_x..].iter().step_by(stride_x).take(n);
    let ys = y[offset_y..].iter().step_by(stride_y).take(n);
    let mut s = T::zero();
    for (&xi, &yi) in xs.zip(ys) {
        s = s + xi * yi;
    }
    s
}

/// Scaled accumulate: `y += alpha * x` over strided vectors.
///
/// ```
/// use reinsch::blas::axpy;
///
/// let x = [1.0_f64, 2.0, 3.0];
/// let mut y = [10.0_f64, 0.0, 20.0, 0.0, 30.0];
/// axpy(3, 2.0, &x, 1, 0, &mut y, 2, 0);
/// assert_eq!(y, [12.0, 0.0, 24.0, 0.0, 36.0]);
/// ```
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn axpy<T: Scalar>(
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: usize,
    offset_x: usize,
    y: &mut [T],
    stride_y: usize,
    offset_y: usize,
) {
    if n == 0 {
        return;
    }
    if stride_x == 1 && stride_y == 1 {
        unrolled::axpy(
            alpha,
            &x[offset_x..offset_x + n],
            &mut y[offset_y..offset_y + n],
        );
        return;
    }
    let xs = x[offset_x..].iter().step_by(stride_x).take(n);
    let ys = y[offset_y..].iter_mut().step_by(stride_y).take(n);
    for (yi, &xi) in ys.zip(xs) {
        *yi = *yi + alpha * xi;
    }
}

/// Scaled accumulate where `x` and `y` are two vectors of the same buffer.
///
/// Used to update one column of a matrix from another column of the same
/// matrix. The two index sequences must not overlap, otherwise the result
/// depends on traversal order.
///
/// ```
/// use reinsch::blas::axpy_within;
///
/// // 3×2 row-major: add 10 × column 0 into column 1.
/// let mut a = [1.0_f64, 0.0, 2.0, 0.0, 3.0, 0.0];
/// axpy_within(3, 10.0, &mut a, 2, 0, 2, 1);
/// assert_eq!(a, [1.0, 10.0, 2.0, 20.0, 3.0, 30.0]);
/// ```
#[inline]
pub fn axpy_within<T: Scalar>(
    n: usize,
    alpha: T,
    buf: &mut [T],
    stride_x: usize,
    offset_x: usize,
    stride_y: usize,
    offset_y: usize,
) {
    if n == 0 {
        return;
    }
    debug_assert!(offset_x + (n - 1) * stride_x < buf.len());
    debug_assert!(offset_y + (n - 1) * stride_y < buf.len());
    let mut ix = offset_x;
    let mut iy = offset_y;
    for _ in 0..n {
        buf[iy] = buf[iy] + alpha * buf[ix];
        ix += stride_x;
        iy += stride_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_unit_stride_all_remainders() {
        for n in 0..11 {
            let x: alloc::vec::Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
            let expected: f64 = x.iter().map(|v| v * v).sum();
            assert_eq!(dot(n, &x, 1, 0, &x, 1, 0), expected, "n = {}", n);
        }
    }

    #[test]
    fn dot_with_offsets() {
        let x = [9.0_f64, 9.0, 1.0, 2.0, 3.0];
        let y = [4.0_f64, 5.0, 6.0];
        assert_eq!(dot(3, &x, 1, 2, &y, 1, 0), 32.0);
    }

    #[test]
    fn dot_mixed_strides() {
        // Column 0 of a 3×2 row-major matrix against a contiguous vector.
        let a = [1.0_f64, 7.0, 2.0, 7.0, 3.0, 7.0];
        let y = [1.0_f64, 1.0, 1.0];
        assert_eq!(dot(3, &a, 2, 0, &y, 1, 0), 6.0);
    }

    #[test]
    fn dot_zero_length_ignores_offsets() {
        let x = [1.0_f64];
        assert_eq!(dot(0, &x, 3, 100, &x, 1, 100), 0.0);
    }

    #[test]
    fn dot_block_summation_order() {
        // Remainder first, then a single partial sum per block of four.
        let x = [1.0e16_f64, 1.0, 1.0, 1.0, 1.0];
        let y = [1.0_f64; 5];
        let blocked = 1.0e16 + (1.0 + 1.0 + 1.0 + 1.0);
        assert_eq!(dot(5, &x, 1, 0, &y, 1, 0), blocked);
    }

    #[test]
    fn axpy_unit_stride() {
        for n in 0..9 {
            let x: alloc::vec::Vec<f64> = (0..n).map(|i| i as f64).collect();
            let mut y = alloc::vec![1.0_f64; n];
            axpy(n, 3.0, &x, 1, 0, &mut y, 1, 0);
            for i in 0..n {
                assert_eq!(y[i], 1.0 + 3.0 * i as f64);
            }
        }
    }

    #[test]
    fn axpy_strided_leaves_gaps() {
        let x = [1.0_f64, 1.0];
        let mut y = [0.0_f64; 5];
        axpy(2, -1.0, &x, 1, 0, &mut y, 3, 1);
        assert_eq!(y, [0.0, -1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn axpy_within_columns() {
        // 2×3 row-major, column 2 += 0.5 * column 0
        let mut a = [2.0_f64, 0.0, 1.0, 4.0, 0.0, 1.0];
        axpy_within(2, 0.5, &mut a, 3, 0, 3, 2);
        assert_eq!(a, [2.0, 0.0, 2.0, 4.0, 0.0, 3.0]);
    }

    #[test]
    fn integer_elements() {
        let x = [1_i64, 2, 3, 4, 5, 6];
        assert_eq!(dot(6, &x, 1, 0, &x, 1, 0), 91);
    }
}

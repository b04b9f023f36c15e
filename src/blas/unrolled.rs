//! Contiguous (unit-stride) kernels, unrolled by four.
//!
//! Both operands are pre-sliced to exactly `n` elements by the caller, so
//! `chunks_exact` lets the compiler drop every per-element bounds check.

use crate::traits::Scalar;

const BLOCK: usize = 4;

/// Dot product of two equal-length contiguous slices.
///
/// Leading `n % 4` elements are summed one at a time; the rest in blocks
/// whose four products are added together before joining the total.
#[inline]
pub fn dot<T: Scalar>(x: &[T], y: &[T]) -> T {
    debug_assert_eq!(x.len(), y.len());
    let head = x.len() % BLOCK;
    let (x_head, x_body) = x.split_at(head);
    let (y_head, y_body) = y.split_at(head);

    let mut s = T::zero();
    for (&a, &b) in x_head.iter().zip(y_head) {
        s = s + a * b;
    }
    for (a, b) in x_body.chunks_exact(BLOCK).zip(y_body.chunks_exact(BLOCK)) {
        s = s + (a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]);
    }
    s
}

/// `y += alpha * x` over equal-length contiguous slices.
#[inline]
pub fn axpy<T: Scalar>(alpha: T, x: &[T], y: &mut [T]) {
    debug_assert_eq!(x.len(), y.len());
    let head = x.len() % BLOCK;
    let (x_head, x_body) = x.split_at(head);
    let (y_head, y_body) = y.split_at_mut(head);

    for (b, &a) in y_head.iter_mut().zip(x_head) {
        *b = *b + alpha * a;
    }
    for (b, a) in y_body
        .chunks_exact_mut(BLOCK)
        .zip(x_body.chunks_exact(BLOCK))
    {
        b[0] = b[0] + alpha * a[0];
        b[1] = b[1] + alpha * a[1];
        b[2] = b[2] + alpha * a[2];
        b[3] = b[3] + alpha * a[3];
    }
}

use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types. The kernels and the
/// matrix layer only need ring arithmetic, so they accept any `Scalar`.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by the decomposition and the solver (`sqrt`, `abs`,
/// machine epsilon).
pub trait FloatScalar: Scalar + Float {
    /// Default splitting tolerance for a given `eps`: `1e-64 / eps`.
    ///
    /// The numerator is floored at the smallest positive normal value so
    /// that types which cannot represent `1e-64` (`f32`) still get a
    /// positive tolerance. For `f64` the result is exactly `1e-64 / eps`.
    fn default_tol(eps: Self) -> Self {
        let tiny = Self::from(1e-64_f64)
            .unwrap_or_else(Self::min_positive_value)
            .max(Self::min_positive_value());
        tiny / eps
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

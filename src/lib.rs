//! # reinsch
//!
//! Dense singular value decomposition (Golub–Reinsch) and SVD-based least
//! squares in pure Rust, no-std compatible (requires `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use reinsch::{decompose, solve, Matrix};
//!
//! let a = Matrix::from_row_slices(&[
//!     &[2.0_f64, 0.0],
//!     &[0.0, 1.0],
//!     &[0.0, 0.0],
//! ]);
//! let svd = decompose(&a, None, None).unwrap();
//! assert_eq!(svd.singular_values().len(), 2);
//!
//! // Least squares: minimize |Ax - b|
//! let x = solve(&a, &[4.0, 3.0, 1.0]).unwrap(); // x = [2, 3]
//! assert!((x[0] - 2.0).abs() < 1e-12 && (x[1] - 3.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`blas`]: Level-1 kernels (`dot`, `axpy`) over strided buffers, unrolled
//!   by four for unit strides. The inner loops of everything else.
//!
//! - [`matrix`]: Heap-allocated row-major `Matrix<T>` with runtime
//!   dimensions, strided [`VectorView`] / [`VectorViewMut`] rows and columns,
//!   products, transpose and a pretty-printer.
//!
//! - [`linear_map`]: Closed set of structured transforms: dense adapter,
//!   diagonal, and Householder reflection, all with cheap transposes.
//!
//! - [`linalg`]: The SVD engine ([`SvdDecomposition`], [`decompose`]) and
//!   the least-squares [`solve`]. Shape errors are reported as
//!   [`LinalgError`].
//!
//! - [`traits`]: Element traits:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by the SVD
//!
//! ## Logging
//!
//! Decompositions emit [`tracing`](https://docs.rs/tracing) events: `debug`
//! on entry and exit, `warn` when a singular value runs out of QR sweeps.
//! Install any subscriber to see them.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm, `std::error::Error` |
//! | `libm`  | no       | Pure-Rust software float fallback for `no_std` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod blas;
pub mod linalg;
pub mod linear_map;
pub mod matrix;
pub mod traits;

pub use linalg::{decompose, solve, LinalgError, SvdDecomposition, SvdOptions};
pub use linear_map::{apply, DenseMap, Diagonal, Householder, LinearMap, LinearOperator};
pub use matrix::{
    col_col_dot, diagonal_multiply, multiply, row_col_dot, row_row_dot, transpose, Matrix,
    VectorView, VectorViewMut,
};
pub use traits::{FloatScalar, Scalar};

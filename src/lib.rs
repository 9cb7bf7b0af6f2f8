//! # densela
//!
//! Dense real-matrix decompositions in pure Rust: Householder QR, the
//! Golub-Kahan-Reinsch singular value decomposition, and the real
//! eigenvalue decomposition (symmetric tridiagonal QL, or Hessenberg
//! reduction followed by Francis double-shift QR for general matrices).
//! `no_std` compatible with `alloc`.
//!
//! ## Quick start
//!
//! ```
//! use densela::DenseMatrix;
//!
//! // Solve a square system Ax = b
//! let a = DenseMatrix::from_rows(&[
//!     &[2.0_f64, 1.0, -1.0],
//!     &[-3.0, -1.0, 2.0],
//!     &[-2.0, 1.0, 2.0],
//! ]).unwrap();
//! let b = DenseMatrix::from_rows(&[&[8.0], &[-11.0], &[-3.0]]).unwrap();
//! let x = a.solve(&b).unwrap(); // x = [2, 3, -1]
//! assert!((x[(0, 0)] - 2.0).abs() < 1e-12);
//!
//! // Eigenvalues of a rotation are ±i
//! let r = DenseMatrix::from_rows(&[&[0.0_f64, -1.0], &[1.0, 0.0]]).unwrap();
//! let eig = r.eig().unwrap();
//! assert_eq!(eig.imag_eigenvalues(), &[1.0, -1.0]);
//! ```
//!
//! ## Modules
//!
//! - [`dense`]: Heap-allocated [`DenseMatrix<T>`] with runtime dimensions and
//!   row-major `Vec<T>` storage. Arithmetic (operators plus `checked_*`
//!   variants), submatrix extraction and assignment, norms, and the factory
//!   methods `qr()`, `svd()`, `eig()`, `lu()`. `solve`, `inverse`, `det`,
//!   `rank`, and `cond` delegate to the decompositions.
//!
//! - [`linalg`]: [`QrDecomposition`], [`SingularValueDecomposition`],
//!   [`EigenvalueDecomposition`] and [`LuDecomposition`], plus the shared
//!   [`LinalgError`]. Every decomposition copies its input at construction
//!   and is immutable afterwards.
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: `f32` / `f64`, used by norms and decompositions
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for the kernels
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade under the `densela` target.
//! Nothing is printed unless the application installs a logger.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm |
//! | `libm`    | no       | Pure-Rust software float fallback for `no_std` |
//! | `complex` | no       | `Complex<T>` eigenvalues via `num-complex` |
//! | `all`     | no       | `std` + `complex` |

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("densela requires either the `std` or the `libm` feature for float math");

extern crate alloc;

pub mod dense;
pub mod linalg;
pub mod traits;

pub use dense::{DenseMatrix, DenseMatrixf32, DenseMatrixf64};
pub use linalg::{
    EigenvalueDecomposition, LinalgError, LuDecomposition, QrDecomposition,
    SingularValueDecomposition,
};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;

/// Log target shared by every diagnostic this crate emits.
pub(crate) const LOG_TARGET: &str = "densela";

//! Householder QR, SVD, LU, and eigenvalue decompositions of dense real
//! matrices.
//!
//! Each decomposition is computed once at construction from a private copy of
//! its input and is immutable afterwards; accessors that return factor
//! matrices build fresh, independently owned copies on every call.

pub(crate) mod eigen;
pub(crate) mod hessenberg;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod schur;
pub(crate) mod svd;
pub(crate) mod symmetric_eigen;

pub use eigen::EigenvalueDecomposition;
pub use lu::LuDecomposition;
pub use qr::QrDecomposition;
pub use svd::SingularValueDecomposition;

use thiserror::Error;

use crate::traits::FloatScalar;

/// Errors from matrix construction, arithmetic, and the decompositions.
///
/// ```
/// use densela::{DenseMatrix, LinalgError};
///
/// let singular = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 4.0]]).unwrap();
/// let b = DenseMatrix::from_rows(&[[1.0], [1.0]]).unwrap();
/// assert_eq!(singular.solve(&b).unwrap_err(), LinalgError::Singular);
///
/// let rank1 = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [2.0, 0.0], [3.0, 0.0]]).unwrap();
/// let b = DenseMatrix::from_rows(&[[1.0], [1.0], [1.0]]).unwrap();
/// assert_eq!(rank1.solve(&b).unwrap_err(), LinalgError::RankDeficient);
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand shapes are incompatible for `op`.
    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// The operation requires a square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// QR solve on a matrix whose R factor has a zero diagonal entry.
    #[error("matrix is rank deficient")]
    RankDeficient,

    /// LU solve on a matrix with an exactly zero pivot.
    #[error("matrix is singular")]
    Singular,

    /// A row/column index or range end lies outside the matrix.
    #[error("index {index} out of range for dimension {bound}")]
    IndexOutOfRange { index: usize, bound: usize },

    /// Rows of a two-dimensional array differ in length.
    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Flat array length is not a multiple of the row count.
    #[error("array length {len} is not a multiple of {rows} rows")]
    InvalidLength { len: usize, rows: usize },

    /// Iterative algorithm did not converge within the iteration budget.
    #[error("iteration did not converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },
}

#[inline]
pub(crate) fn two<T: FloatScalar>() -> T {
    T::one() + T::one()
}

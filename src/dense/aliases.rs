//! Pre-defined type aliases for the floating-point `DenseMatrix` element types.

use super::DenseMatrix;

/// Dense matrix with `f32` elements.
pub type DenseMatrixf32 = DenseMatrix<f32>;
/// Dense matrix with `f64` elements.
pub type DenseMatrixf64 = DenseMatrix<f64>;

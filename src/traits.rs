use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be stored in a [`DenseMatrix`](crate::DenseMatrix).
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by everything that needs `sqrt`, `hypot`, `abs` or a machine
/// epsilon: norms, decompositions, and the solvers built on them.
pub trait FloatScalar: Scalar + Float {
    /// Smallest magnitude the SVD treats as distinguishable from zero
    /// when testing for negligible bidiagonal entries.
    fn tiny() -> Self;

    /// Convert an `f64` constant into `Self`.
    fn constant(x: f64) -> Self;

    /// Convert a count (a dimension, an iteration number) into `Self`.
    fn from_count(n: usize) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty => $tiny_exp:expr),*) => {
        $(
            impl FloatScalar for $t {
                #[inline]
                fn tiny() -> $t {
                    <$t as Float>::powi(2.0, $tiny_exp)
                }

                #[inline]
                fn constant(x: f64) -> $t {
                    x as $t
                }

                #[inline]
                fn from_count(n: usize) -> $t {
                    n as $t
                }
            }
        )*
    };
}

impl_float_scalar!(f32 => -120, f64 => -966);

/// Read-only access to a matrix-like type.
///
/// The decomposition kernels are written against this trait rather than a
/// concrete storage type.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling the in-place
/// Householder kernels (QR, bidiagonalization) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;
}

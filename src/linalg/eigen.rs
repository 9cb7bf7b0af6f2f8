use alloc::vec::Vec;

use crate::dense::DenseMatrix;
use crate::linalg::hessenberg::reduce_to_hessenberg;
use crate::linalg::schur::{back_substitute, back_transform, francis_qr};
use crate::linalg::symmetric_eigen::{sort_ascending, tridiagonal_ql, tridiagonalize};
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Eigenvalues and eigenvectors of a real square matrix.
///
/// If `A` is symmetric, `A = V·D·Vᵗ` with `D` diagonal, `V` orthogonal and
/// the eigenvalues sorted ascending. Otherwise `A·V = V·D` where `D` is
/// block diagonal: real eigenvalues in 1x1 blocks and each complex pair
/// `λ ± iμ` in a 2x2 block `[λ, μ; -μ, λ]`. The columns of `V` are then the
/// real and imaginary parts of the eigenvectors and `V` may be badly
/// conditioned or singular.
///
/// # Example
///
/// ```
/// use densela::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(&[[2.0_f64, 1.0], [1.0, 2.0]]).unwrap();
/// let eig = a.eig().unwrap();
/// assert!(eig.is_symmetric());
/// let d = eig.real_eigenvalues();
/// assert!((d[0] - 1.0).abs() < 1e-12);
/// assert!((d[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct EigenvalueDecomposition<T> {
    v: DenseMatrix<T>,
    d: Vec<T>,
    e: Vec<T>,
    symmetric: bool,
}

impl<T: FloatScalar> EigenvalueDecomposition<T> {
    /// Decompose `a` with the default iteration cap, `30·max(n, 10)` steps
    /// per eigenvalue.
    pub fn new(a: &DenseMatrix<T>) -> Result<Self, LinalgError> {
        let max_iter = 30 * a.nrows().max(10);
        Self::with_max_iter(a, max_iter)
    }

    /// Decompose `a`, allowing at most `max_iter` QL or QR steps between
    /// deflations before giving up with `ConvergenceFailure`.
    pub fn with_max_iter(a: &DenseMatrix<T>, max_iter: usize) -> Result<Self, LinalgError> {
        let (rows, cols) = a.shape();
        if rows != cols {
            return Err(LinalgError::NotSquare { rows, cols });
        }
        let n = rows;
        let symmetric = a.is_symmetric();
        if n == 0 {
            return Ok(Self {
                v: DenseMatrix::new(0, 0),
                d: Vec::new(),
                e: Vec::new(),
                symmetric,
            });
        }

        log::debug!(
            target: crate::LOG_TARGET,
            "eig: {}x{} {} matrix",
            n,
            n,
            if symmetric { "symmetric" } else { "nonsymmetric" }
        );

        if symmetric {
            let tri = sort_ascending(tridiagonal_ql(tridiagonalize(a), max_iter)?);
            Ok(Self { v: tri.v, d: tri.d, e: tri.e, symmetric })
        } else {
            let schur = francis_qr(reduce_to_hessenberg(a), max_iter)?;
            let (v, d, e) = back_transform(back_substitute(schur));
            Ok(Self { v, d, e, symmetric })
        }
    }

    /// Whether the symmetric path was taken.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Eigenvector matrix.
    pub fn v(&self) -> DenseMatrix<T> {
        self.v.clone()
    }

    /// Real parts of the eigenvalues.
    pub fn real_eigenvalues(&self) -> &[T] {
        &self.d
    }

    /// Imaginary parts of the eigenvalues. Conjugate pairs appear with the
    /// positive member first.
    pub fn imag_eigenvalues(&self) -> &[T] {
        &self.e
    }

    /// Block diagonal eigenvalue matrix.
    ///
    /// ```
    /// use densela::DenseMatrix;
    ///
    /// let r = DenseMatrix::from_rows(&[[0.0_f64, -1.0], [1.0, 0.0]]).unwrap();
    /// let d = r.eig().unwrap().d();
    /// assert_eq!(d, DenseMatrix::from_rows(&[[0.0, 1.0], [-1.0, 0.0]]).unwrap());
    /// ```
    pub fn d(&self) -> DenseMatrix<T> {
        let n = self.d.len();
        let mut d = DenseMatrix::from_diagonal(&self.d);
        for i in 0..n {
            if self.e[i] > T::zero() {
                d[(i, i + 1)] = self.e[i];
            } else if self.e[i] < T::zero() {
                d[(i, i - 1)] = self.e[i];
            }
        }
        d
    }

    /// Eigenvalues as complex numbers.
    ///
    /// ```
    /// use densela::{Complex, DenseMatrix};
    ///
    /// let r = DenseMatrix::from_rows(&[[0.0_f64, -1.0], [1.0, 0.0]]).unwrap();
    /// let ev = r.eig().unwrap().eigenvalues();
    /// assert_eq!(ev, vec![Complex::new(0.0, 1.0), Complex::new(0.0, -1.0)]);
    /// ```
    #[cfg(feature = "complex")]
    pub fn eigenvalues(&self) -> Vec<Complex<T>> {
        self.d
            .iter()
            .zip(&self.e)
            .map(|(&re, &im)| Complex::new(re, im))
            .collect()
    }
}

use alloc::vec;
use alloc::vec::Vec;

use crate::dense::DenseMatrix;
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut};

/// Householder QR decomposition in place.
///
/// On return, `a` holds the packed factorization: the Householder vectors on
/// and below the diagonal (each scaled so its leading entry lies in `[1, 2]`)
/// and the strict upper triangle of R above it. `r_diag` receives the signed
/// diagonal of R.
///
/// The 2-norm of each sub-column is accumulated with `hypot`. A column whose
/// norm is exactly zero is left untouched and its `r_diag` entry is zero,
/// which marks the matrix as rank deficient.
///
/// Requires `a.nrows() >= a.ncols()` and `r_diag.len() == a.ncols()`.
pub fn householder_qr_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>, r_diag: &mut [T]) {
    let m = a.nrows();
    let n = a.ncols();
    debug_assert!(m >= n);
    debug_assert_eq!(r_diag.len(), n);

    for k in 0..n {
        let mut nrm = T::zero();
        for i in k..m {
            nrm = nrm.hypot(*a.get(i, k));
        }

        if nrm != T::zero() {
            // Sign opposite to the pivot so that v[k] = a[k][k]/nrm + 1 never cancels.
            if *a.get(k, k) < T::zero() {
                nrm = -nrm;
            }
            for i in k..m {
                let v = *a.get(i, k) / nrm;
                *a.get_mut(i, k) = v;
            }
            let v_kk = *a.get(k, k) + T::one();
            *a.get_mut(k, k) = v_kk;

            for j in (k + 1)..n {
                let mut s = T::zero();
                for i in k..m {
                    s = s + *a.get(i, k) * *a.get(i, j);
                }
                s = -s / *a.get(k, k);
                for i in k..m {
                    let v = *a.get(i, j) + s * *a.get(i, k);
                    *a.get_mut(i, j) = v;
                }
            }
        }
        r_diag[k] = -nrm;
    }
}

/// QR decomposition of an `m x n` matrix with `m >= n`.
///
/// `A = Q * R` with `Q` (`m x n`) having orthonormal columns and `R`
/// (`n x n`) upper triangular. The factorization always exists; a zero
/// column only makes the matrix rank deficient, which [`solve`](Self::solve)
/// reports.
///
/// # Example
///
/// ```
/// use densela::DenseMatrix;
///
/// // Least-squares fit: y = c0 + c1*x to points (0,1), (1,2), (2,4)
/// let a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [1.0, 1.0], [1.0, 2.0]]).unwrap();
/// let b = DenseMatrix::from_rows(&[[1.0], [2.0], [4.0]]).unwrap();
/// let x = a.qr().unwrap().solve(&b).unwrap();
/// assert!((x[(0, 0)] - 5.0 / 6.0).abs() < 1e-10);
/// assert!((x[(1, 0)] - 3.0 / 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    qr: DenseMatrix<T>,
    r_diag: Vec<T>,
}

impl<T: FloatScalar> QrDecomposition<T> {
    /// Decompose `a`. Fails with `DimensionMismatch` if `a` has fewer rows
    /// than columns.
    pub fn new(a: &DenseMatrix<T>) -> Result<Self, LinalgError> {
        let (m, n) = a.shape();
        if m < n {
            return Err(LinalgError::DimensionMismatch {
                op: "qr",
                lhs: (m, n),
                rhs: (n, n),
            });
        }
        let mut qr = a.clone();
        let mut r_diag = vec![T::zero(); n];
        householder_qr_in_place(&mut qr, &mut r_diag);

        let this = Self { qr, r_diag };
        if !this.is_full_rank() {
            log::debug!(target: crate::LOG_TARGET, "qr: {}x{} matrix is rank deficient", m, n);
        }
        Ok(this)
    }

    /// True iff no diagonal entry of R is exactly zero.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [0.0, 0.0]]).unwrap();
    /// assert!(!a.qr().unwrap().is_full_rank());
    /// ```
    pub fn is_full_rank(&self) -> bool {
        self.r_diag.iter().all(|&d| d != T::zero())
    }

    /// Signed diagonal of R.
    pub fn r_diag(&self) -> &[T] {
        &self.r_diag
    }

    /// Lower-trapezoidal `m x n` matrix whose columns are the Householder
    /// vectors.
    pub fn h(&self) -> DenseMatrix<T> {
        let (m, n) = self.qr.shape();
        DenseMatrix::from_fn(m, n, |i, j| if i >= j { self.qr[(i, j)] } else { T::zero() })
    }

    /// Upper-triangular `n x n` factor R.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[
    ///     [12.0_f64, -51.0, 4.0],
    ///     [6.0, 167.0, -68.0],
    ///     [-4.0, 24.0, -41.0],
    /// ]).unwrap();
    /// let r = a.qr().unwrap().r();
    /// assert_eq!(r[(1, 0)], 0.0);
    /// assert!((r[(0, 0)].abs() - 14.0).abs() < 1e-12);
    /// ```
    pub fn r(&self) -> DenseMatrix<T> {
        let n = self.qr.ncols();
        DenseMatrix::from_fn(n, n, |i, j| {
            if i < j {
                self.qr[(i, j)]
            } else if i == j {
                self.r_diag[i]
            } else {
                T::zero()
            }
        })
    }

    /// Thin orthogonal factor Q (`m x n`), rebuilt by applying the stored
    /// reflections in reverse to the first `n` columns of the identity.
    pub fn q(&self) -> DenseMatrix<T> {
        let (m, n) = self.qr.shape();
        let mut q = DenseMatrix::new(m, n);
        for k in (0..n).rev() {
            q[(k, k)] = T::one();
            let v_kk = self.qr[(k, k)];
            if v_kk == T::zero() {
                continue;
            }
            for j in k..n {
                let mut s = T::zero();
                for i in k..m {
                    s = s + self.qr[(i, k)] * q[(i, j)];
                }
                s = -s / v_kk;
                for i in k..m {
                    q[(i, j)] = q[(i, j)] + s * self.qr[(i, k)];
                }
            }
        }
        q
    }

    /// Least-squares solution `X` minimizing `||A*X - B||`.
    ///
    /// `b` must have `m` rows. Returns the top `n` rows of `R⁻¹·Qᵗ·B`, or
    /// `RankDeficient` if R has a zero diagonal entry.
    pub fn solve(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>, LinalgError> {
        let (m, n) = self.qr.shape();
        if b.nrows() != m {
            return Err(LinalgError::DimensionMismatch {
                op: "qr solve",
                lhs: (m, n),
                rhs: b.shape(),
            });
        }
        if !self.is_full_rank() {
            return Err(LinalgError::RankDeficient);
        }

        let nx = b.ncols();
        let mut x = b.clone();

        // X = Qᵗ·B
        for k in 0..n {
            for j in 0..nx {
                let mut s = T::zero();
                for i in k..m {
                    s = s + self.qr[(i, k)] * x[(i, j)];
                }
                s = -s / self.qr[(k, k)];
                for i in k..m {
                    x[(i, j)] = x[(i, j)] + s * self.qr[(i, k)];
                }
            }
        }

        // R·X = Qᵗ·B
        for k in (0..n).rev() {
            for j in 0..nx {
                x[(k, j)] = x[(k, j)] / self.r_diag[k];
            }
            for i in 0..k {
                for j in 0..nx {
                    x[(i, j)] = x[(i, j)] - x[(k, j)] * self.qr[(i, k)];
                }
            }
        }

        x.submatrix(0..n, 0..nx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn assert_mat_near(a: &DenseMatrix<f64>, b: &DenseMatrix<f64>, tol: f64, what: &str) {
        assert_eq!(a.shape(), b.shape(), "{} shape", what);
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_near(a[(i, j)], b[(i, j)], tol, &format!("{}[({},{})]", what, i, j));
            }
        }
    }

    #[test]
    fn qr_square_3x3() {
        let a = DenseMatrix::from_rows(&[
            [12.0_f64, -51.0, 4.0],
            [6.0, 167.0, -68.0],
            [-4.0, 24.0, -41.0],
        ])
        .unwrap();
        let qr = QrDecomposition::new(&a).unwrap();
        let q = qr.q();
        let r = qr.r();

        assert_mat_near(&(&q * &r), &a, TOL, "QR");
        assert_mat_near(&(&q.transpose() * &q), &DenseMatrix::identity(3, 3), TOL, "QtQ");
        assert_near(r[(0, 0)].abs(), 14.0, TOL, "|r00|");
        assert_near(r[(1, 1)].abs(), 175.0, TOL, "|r11|");
        assert_near(r[(2, 2)].abs(), 35.0, TOL, "|r22|");
    }

    #[test]
    fn qr_rectangular_4x3() {
        let a = DenseMatrix::from_rows(&[
            [1.0_f64, -1.0, 4.0],
            [1.0, 4.0, -2.0],
            [1.0, 4.0, 2.0],
            [1.0, -1.0, 0.0],
        ])
        .unwrap();
        let qr = QrDecomposition::new(&a).unwrap();
        let q = qr.q();
        assert_eq!(q.shape(), (4, 3));
        assert_eq!(qr.r().shape(), (3, 3));
        assert_mat_near(&(&q * &qr.r()), &a, TOL, "QR");
        assert_mat_near(&(&q.transpose() * &q), &DenseMatrix::identity(3, 3), TOL, "QtQ");
    }

    #[test]
    fn r_diag_is_negative_norm_signed_by_pivot() {
        // Column 0 = [3, 4], pivot positive, so R[0][0] = -5.
        let a = DenseMatrix::from_rows(&[[3.0_f64, 1.0], [4.0, 2.0]]).unwrap();
        let qr = QrDecomposition::new(&a).unwrap();
        assert_near(qr.r_diag()[0], -5.0, TOL, "rdiag0");

        let b = DenseMatrix::from_rows(&[[-3.0_f64, 1.0], [4.0, 2.0]]).unwrap();
        let qr = QrDecomposition::new(&b).unwrap();
        assert_near(qr.r_diag()[0], 5.0, TOL, "rdiag0 negative pivot");
    }

    #[test]
    fn h_is_lower_trapezoidal() {
        let a = DenseMatrix::from_fn(4, 3, |i, j| 1.0 / ((i + j + 1) as f64));
        let h = QrDecomposition::new(&a).unwrap().h();
        assert_eq!(h.shape(), (4, 3));
        for i in 0..4 {
            for j in (i + 1)..3 {
                assert_eq!(h[(i, j)], 0.0);
            }
        }
        for k in 0..3 {
            assert!(h[(k, k)] >= 1.0 && h[(k, k)] <= 2.0, "v[{k}][{k}] = {}", h[(k, k)]);
        }
    }

    #[test]
    fn qr_solve_square() {
        let a = DenseMatrix::from_rows(&[
            [2.0_f64, 1.0, -1.0],
            [-3.0, -1.0, 2.0],
            [-2.0, 1.0, 2.0],
        ])
        .unwrap();
        let b = DenseMatrix::from_rows(&[[8.0], [-11.0], [-3.0]]).unwrap();
        let x = QrDecomposition::new(&a).unwrap().solve(&b).unwrap();
        assert_near(x[(0, 0)], 2.0, TOL, "x0");
        assert_near(x[(1, 0)], 3.0, TOL, "x1");
        assert_near(x[(2, 0)], -1.0, TOL, "x2");
    }

    #[test]
    fn qr_least_squares_residual_orthogonal() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [1.0, 1.0], [1.0, 2.0]]).unwrap();
        let b = DenseMatrix::from_rows(&[[1.0, 2.0], [2.0, 0.0], [4.0, 1.0]]).unwrap();
        let x = QrDecomposition::new(&a).unwrap().solve(&b).unwrap();
        assert_eq!(x.shape(), (2, 2));
        assert_near(x[(0, 0)], 5.0 / 6.0, TOL, "c0");
        assert_near(x[(1, 0)], 3.0 / 2.0, TOL, "c1");

        let r = &b - &(&a * &x);
        let atr = &a.transpose() * &r;
        assert_mat_near(&atr, &DenseMatrix::new(2, 2), TOL, "Atr");
    }

    #[test]
    fn zero_column_is_rank_deficient() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [2.0, 0.0], [3.0, 0.0]]).unwrap();
        let qr = QrDecomposition::new(&a).unwrap();
        assert!(!qr.is_full_rank());
        assert_eq!(qr.r_diag()[1], 0.0);

        let b = DenseMatrix::filled(3, 1, 1.0);
        assert_eq!(qr.solve(&b).unwrap_err(), LinalgError::RankDeficient);

        // Q R still reconstructs A.
        assert_mat_near(&(&qr.q() * &qr.r()), &a, TOL, "QR");
    }

    #[test]
    fn solve_rejects_wrong_row_count() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap();
        let qr = QrDecomposition::new(&a).unwrap();
        assert!(matches!(
            qr.solve(&DenseMatrix::new(2, 1)),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn wide_input_rejected() {
        let a = DenseMatrix::<f64>::new(2, 3);
        assert_eq!(
            QrDecomposition::new(&a).unwrap_err(),
            LinalgError::DimensionMismatch {
                op: "qr",
                lhs: (2, 3),
                rhs: (3, 3)
            }
        );
    }

    #[test]
    fn accessors_return_equal_independent_copies() {
        let a = DenseMatrix::from_fn(3, 3, |i, j| 1.0 / ((i + j + 1) as f64));
        let qr = QrDecomposition::new(&a).unwrap();
        let mut q1 = qr.q();
        let q2 = qr.q();
        assert_eq!(q1, q2);
        q1[(0, 0)] = 100.0;
        assert_eq!(qr.q(), q2);
    }

    #[test]
    fn qr_f32() {
        let a = DenseMatrix::from_rows(&[[4.0_f32, 1.0], [2.0, 3.0]]).unwrap();
        let qr = QrDecomposition::new(&a).unwrap();
        let prod = &qr.q() * &qr.r();
        for i in 0..2 {
            for j in 0..2 {
                assert!((prod[(i, j)] - a[(i, j)]).abs() < 1e-5);
            }
        }
    }
}

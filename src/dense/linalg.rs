use crate::linalg::{
    EigenvalueDecomposition, LinalgError, LuDecomposition, QrDecomposition,
    SingularValueDecomposition,
};
use crate::traits::FloatScalar;

use super::DenseMatrix;

// ── Factories ───────────────────────────────────────────────────────

impl<T: FloatScalar> DenseMatrix<T> {
    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::new(self)
    }

    /// Householder QR decomposition. Requires `nrows >= ncols`.
    pub fn qr(&self) -> Result<QrDecomposition<T>, LinalgError> {
        QrDecomposition::new(self)
    }

    /// Singular value decomposition. Works for any shape.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[3.0_f64, 0.0], [0.0, 4.0]]).unwrap();
    /// let svd = a.svd();
    /// assert_eq!(svd.singular_values(), &[4.0, 3.0]);
    /// ```
    pub fn svd(&self) -> SingularValueDecomposition<T> {
        SingularValueDecomposition::new(self)
    }

    /// Eigenvalue decomposition of a square matrix.
    pub fn eig(&self) -> Result<EigenvalueDecomposition<T>, LinalgError> {
        EigenvalueDecomposition::new(self)
    }
}

// ── Delegating solvers ──────────────────────────────────────────────

impl<T: FloatScalar> DenseMatrix<T> {
    /// Solve `A·X = B`: exactly via LU when `A` is square, in the
    /// least-squares sense via QR when `A` is tall.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[2.0_f64, 1.0], [5.0, 3.0]]).unwrap();
    /// let b = DenseMatrix::from_rows(&[[4.0], [11.0]]).unwrap();
    /// let x = a.solve(&b).unwrap();
    /// assert!((x[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!((x[(1, 0)] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>, LinalgError> {
        if self.is_square() {
            log::debug!(target: crate::LOG_TARGET, "solve: {}x{} via LU", self.nrows, self.ncols);
            self.lu()?.solve(b)
        } else {
            log::debug!(target: crate::LOG_TARGET, "solve: {}x{} via QR", self.nrows, self.ncols);
            self.qr()?.solve(b)
        }
    }

    /// Solve `X·A = B`, i.e. `Aᵗ·Xᵗ = Bᵗ`.
    pub fn solve_transpose(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>, LinalgError> {
        Ok(self.transpose().solve(&b.transpose())?.transpose())
    }

    /// Inverse of a square matrix, or the least-squares pseudo-inverse
    /// `(AᵗA)⁻¹Aᵗ` of a tall one.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[4.0_f64, 7.0], [2.0, 6.0]]).unwrap();
    /// let id = &a * &a.inverse().unwrap();
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!(id[(0, 1)].abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<DenseMatrix<T>, LinalgError> {
        self.solve(&DenseMatrix::identity(self.nrows, self.nrows))
    }

    /// Determinant via LU. Fails with `NotSquare` for non-square input.
    pub fn det(&self) -> Result<T, LinalgError> {
        Ok(self.lu()?.det())
    }

    /// Effective numerical rank, from the SVD.
    pub fn rank(&self) -> usize {
        self.svd().rank()
    }

    /// Two-norm condition number `σ_max / σ_min`, from the SVD.
    pub fn cond(&self) -> T {
        self.svd().cond()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    #[test]
    fn solve_square_uses_exact_solution() {
        let a = DenseMatrix::from_rows(&[
            [2.0_f64, 1.0, -1.0],
            [-3.0, -1.0, 2.0],
            [-2.0, 1.0, 2.0],
        ])
        .unwrap();
        let b = DenseMatrix::from_rows(&[[8.0], [-11.0], [-3.0]]).unwrap();
        let x = a.solve(&b).unwrap();
        assert_near(x[(0, 0)], 2.0, TOL, "x0");
        assert_near(x[(1, 0)], 3.0, TOL, "x1");
        assert_near(x[(2, 0)], -1.0, TOL, "x2");
    }

    #[test]
    fn solve_tall_is_least_squares() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [1.0, 1.0], [1.0, 2.0]]).unwrap();
        let b = DenseMatrix::from_rows(&[[1.0], [2.0], [4.0]]).unwrap();
        let x = a.solve(&b).unwrap();
        assert_near(x[(0, 0)], 5.0 / 6.0, TOL, "c0");
        assert_near(x[(1, 0)], 1.5, TOL, "c1");
    }

    #[test]
    fn solve_wide_rejected() {
        let a = DenseMatrix::<f64>::new(2, 3);
        let b = DenseMatrix::new(2, 1);
        assert!(matches!(
            a.solve(&b),
            Err(LinalgError::DimensionMismatch { op: "qr", .. })
        ));
    }

    #[test]
    fn solve_errors_propagate() {
        let singular = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 4.0]]).unwrap();
        let b = DenseMatrix::from_rows(&[[1.0], [1.0]]).unwrap();
        assert_eq!(singular.solve(&b).unwrap_err(), LinalgError::Singular);

        let a = DenseMatrix::<f64>::identity(2, 2);
        let b = DenseMatrix::new(3, 1);
        assert!(matches!(
            a.solve(&b),
            Err(LinalgError::DimensionMismatch { op: "lu solve", .. })
        ));
    }

    #[test]
    fn solve_transpose_right_division() {
        let a = DenseMatrix::from_rows(&[[2.0_f64, 1.0], [5.0, 3.0]]).unwrap();
        let b = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let x = a.solve_transpose(&b).unwrap();
        assert_eq!(x.shape(), (3, 2));
        let xa = &x * &a;
        for i in 0..3 {
            for j in 0..2 {
                assert_near(xa[(i, j)], b[(i, j)], TOL, &format!("XA[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn inverse_square() {
        let a = DenseMatrix::from_rows(&[
            [4.0_f64, -2.0, 1.0],
            [-2.0, 4.0, -2.0],
            [1.0, -2.0, 4.0],
        ])
        .unwrap();
        let id = &a * &a.inverse().unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(id[(i, j)], expected, TOL, &format!("AA⁻¹[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn inverse_tall_is_left_inverse() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0], [5.0, 7.0]]).unwrap();
        let pinv = a.inverse().unwrap();
        assert_eq!(pinv.shape(), (2, 3));
        let id = &pinv * &a;
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(id[(i, j)], expected, TOL, &format!("A⁺A[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn inverse_singular() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(a.inverse().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn det_values() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0]]).unwrap();
        assert_near(a.det().unwrap(), -2.0, TOL, "det");
        assert_eq!(
            DenseMatrix::<f64>::new(2, 3).det().unwrap_err(),
            LinalgError::NotSquare { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn rank_and_cond() {
        let a = DenseMatrix::from_rows(&[
            [1.0_f64, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ])
        .unwrap();
        assert_eq!(a.rank(), 2);

        let d = DenseMatrix::from_diagonal(&[10.0_f64, 2.0]);
        assert_near(d.cond(), 5.0, TOL, "cond");
        assert_eq!(DenseMatrix::<f64>::identity(4, 4).rank(), 4);
    }

    #[test]
    fn factories_agree_with_constructors() {
        let a = DenseMatrix::from_rows(&[[2.0_f64, 1.0], [1.0, 3.0]]).unwrap();
        assert_eq!(a.qr().unwrap().r_diag(), QrDecomposition::new(&a).unwrap().r_diag());
        assert_eq!(
            a.eig().unwrap().real_eigenvalues(),
            EigenvalueDecomposition::new(&a).unwrap().real_eigenvalues()
        );
        assert_eq!(a.svd().singular_values(), SingularValueDecomposition::new(&a).singular_values());
        assert_eq!(a.lu().unwrap().pivot(), LuDecomposition::new(&a).unwrap().pivot());
    }
}

use crate::linalg::SingularValueDecomposition;
use crate::traits::FloatScalar;

use super::DenseMatrix;

impl<T: FloatScalar> DenseMatrix<T> {
    /// One norm: maximum column sum of absolute values.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0_f64, -2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.norm1(), 6.0);
    /// ```
    pub fn norm1(&self) -> T {
        let mut f = T::zero();
        for j in 0..self.ncols {
            let mut s = T::zero();
            for i in 0..self.nrows {
                s = s + self[(i, j)].abs();
            }
            f = f.max(s);
        }
        f
    }

    /// Infinity norm: maximum row sum of absolute values.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0_f64, -2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.norm_inf(), 7.0);
    /// ```
    pub fn norm_inf(&self) -> T {
        let mut f = T::zero();
        for i in 0..self.nrows {
            let s = self
                .row_slice(i)
                .iter()
                .fold(T::zero(), |acc, &x| acc + x.abs());
            f = f.max(s);
        }
        f
    }

    /// Frobenius norm, accumulated with `hypot` so that no intermediate
    /// square overflows.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[3.0_f64, 0.0], [0.0, 4.0]]).unwrap();
    /// assert_eq!(m.norm_f(), 5.0);
    /// ```
    pub fn norm_f(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc.hypot(x))
    }

    /// Two norm: the largest singular value.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[4.0_f64, 0.0], [0.0, -9.0]]).unwrap();
    /// assert!((m.norm2() - 9.0).abs() < 1e-12);
    /// ```
    pub fn norm2(&self) -> T {
        SingularValueDecomposition::new(self).norm2()
    }
}

use alloc::vec::Vec;

use crate::traits::Scalar;

use super::DenseMatrix;

impl<T: Scalar> DenseMatrix<T> {
    /// Sum of the main diagonal. Rectangular matrices sum the first
    /// `min(rows, cols)` diagonal entries.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.nrows.min(self.ncols);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Copy of the main diagonal.
    pub fn diagonal(&self) -> Vec<T> {
        (0..self.nrows.min(self.ncols)).map(|i| self[(i, i)]).collect()
    }

    /// Square matrix with `d` on the diagonal.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_diagonal(&[2.0, 3.0]);
    /// assert_eq!(m[(0, 0)], 2.0);
    /// assert_eq!(m[(1, 1)], 3.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_diagonal(d: &[T]) -> Self {
        let n = d.len();
        let mut m = Self::new(n, n);
        for (i, &x) in d.iter().enumerate() {
            m[(i, i)] = x;
        }
        m
    }

    /// Exact symmetry test, `A[i][j] == A[j][i]` for every pair.
    ///
    /// Non-square matrices are never symmetric.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let sym = DenseMatrix::from_rows(&[[1.0, 2.0], [2.0, 3.0]]).unwrap();
    /// assert!(sym.is_symmetric());
    /// let not = DenseMatrix::from_rows(&[[1.0, 2.0], [2.0 + 1e-15, 3.0]]).unwrap();
    /// assert!(!not.is_symmetric());
    /// ```
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

use alloc::vec::Vec;

use crate::dense::DenseMatrix;
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// LU decomposition with partial pivoting, in place.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `perm` is filled with the row permutation indices. A column whose pivot
/// is exactly zero is left unscaled, so the factorization completes for
/// singular input. Returns `true` if the number of row swaps was even.
pub fn lu_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>, perm: &mut [usize]) -> bool {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols());
    debug_assert_eq!(n, perm.len());

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }

    let mut even = true;

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = a.get(col, col).abs();
        for row in (col + 1)..n {
            let val = a.get(row, col).abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_row != col {
            perm.swap(col, max_row);
            for j in 0..n {
                let tmp = *a.get(col, j);
                *a.get_mut(col, j) = *a.get(max_row, j);
                *a.get_mut(max_row, j) = tmp;
            }
            even = !even;
        }

        let pivot = *a.get(col, col);
        if pivot == T::zero() {
            continue;
        }

        for row in (col + 1)..n {
            let l = *a.get(row, col) / pivot;
            *a.get_mut(row, col) = l;
            for j in (col + 1)..n {
                let x = *a.get(row, j) - l * *a.get(col, j);
                *a.get_mut(row, j) = x;
            }
        }
    }

    even
}

/// Solve `A x = b` given the packed LU factors and permutation.
///
/// `b` (input) and `x` (output) are separate slices of length n.
pub fn lu_solve<T: FloatScalar>(lu: &impl MatrixRef<T>, perm: &[usize], b: &[T], x: &mut [T]) {
    let n = lu.nrows();

    // Forward substitution: L y = P b
    for i in 0..n {
        let mut sum = b[perm[i]];
        for j in 0..i {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum;
    }

    // Back substitution: U x = y
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum / *lu.get(i, i);
    }
}

/// LU decomposition `P·A = L·U` of a square matrix, with partial pivoting.
///
/// Construction always succeeds for square input; singularity is reported by
/// [`is_nonsingular`](Self::is_nonsingular) and by [`solve`](Self::solve).
///
/// # Example
///
/// ```
/// use densela::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(&[[2.0_f64, 1.0], [5.0, 3.0]]).unwrap();
/// let lu = a.lu().unwrap();
/// assert!((lu.det() - 1.0).abs() < 1e-12);
///
/// let b = DenseMatrix::from_rows(&[[4.0], [11.0]]).unwrap();
/// let x = lu.solve(&b).unwrap();
/// assert!((x[(0, 0)] - 1.0).abs() < 1e-12);
/// assert!((x[(1, 0)] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    lu: DenseMatrix<T>,
    perm: Vec<usize>,
    even: bool,
}

impl<T: FloatScalar> LuDecomposition<T> {
    /// Decompose a square matrix. Fails with `NotSquare` otherwise.
    pub fn new(a: &DenseMatrix<T>) -> Result<Self, LinalgError> {
        if !a.is_square() {
            return Err(LinalgError::NotSquare {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }
        let mut lu = a.clone();
        let mut perm = alloc::vec![0usize; a.nrows()];
        let even = lu_in_place(&mut lu, &mut perm);
        Ok(Self { lu, perm, even })
    }

    /// True iff no pivot of U is exactly zero.
    pub fn is_nonsingular(&self) -> bool {
        (0..self.lu.nrows()).all(|i| self.lu[(i, i)] != T::zero())
    }

    /// Unit lower-triangular factor L.
    pub fn l(&self) -> DenseMatrix<T> {
        let n = self.lu.nrows();
        DenseMatrix::from_fn(n, n, |i, j| {
            if i > j {
                self.lu[(i, j)]
            } else if i == j {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    /// Upper-triangular factor U.
    pub fn u(&self) -> DenseMatrix<T> {
        let n = self.lu.nrows();
        DenseMatrix::from_fn(n, n, |i, j| if i <= j { self.lu[(i, j)] } else { T::zero() })
    }

    /// Row permutation: row `i` of `L·U` is row `pivot()[i]` of `A`.
    pub fn pivot(&self) -> &[usize] {
        &self.perm
    }

    /// Determinant of the original matrix.
    pub fn det(&self) -> T {
        let mut d = if self.even { T::one() } else { -T::one() };
        for i in 0..self.lu.nrows() {
            d = d * self.lu[(i, i)];
        }
        d
    }

    /// Solve `A·X = B` column by column.
    ///
    /// Fails with `DimensionMismatch` if `b` does not have `n` rows and with
    /// `Singular` if a pivot is exactly zero.
    pub fn solve(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>, LinalgError> {
        let n = self.lu.nrows();
        if b.nrows() != n {
            return Err(LinalgError::DimensionMismatch {
                op: "lu solve",
                lhs: self.lu.shape(),
                rhs: b.shape(),
            });
        }
        if !self.is_nonsingular() {
            return Err(LinalgError::Singular);
        }

        let nx = b.ncols();
        let mut x = DenseMatrix::new(n, nx);
        let mut rhs = alloc::vec![T::zero(); n];
        let mut col = alloc::vec![T::zero(); n];
        for j in 0..nx {
            for (i, r) in rhs.iter_mut().enumerate() {
                *r = b[(i, j)];
            }
            lu_solve(&self.lu, &self.perm, &rhs, &mut col);
            for (i, &c) in col.iter().enumerate() {
                x[(i, j)] = c;
            }
        }
        Ok(x)
    }
}

pub mod aliases;
mod block;
mod linalg;
mod norm;
mod ops;
mod square;
mod util;

pub use aliases::*;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;
use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Dense heap-allocated matrix.
///
/// Row-major `Vec<T>` storage of length `nrows * ncols`; dimensions are set
/// at runtime. Every extraction (`submatrix`, `select`, `transpose`, the
/// decomposition factors) returns a new matrix owning its own copy, so a
/// `DenseMatrix` never aliases another one.
///
/// # Examples
///
/// ```
/// use densela::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b = DenseMatrix::<f64>::identity(3, 3);
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::<f64>::new(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create a matrix with every element set to `value`.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::filled(2, 3, 7.0_f64);
    /// assert_eq!(m[(0, 0)], 7.0);
    /// assert_eq!(m[(1, 2)], 7.0);
    /// ```
    pub fn filled(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `nrows x ncols` matrix with ones on the main diagonal.
    pub fn identity(nrows: usize, ncols: usize) -> Self {
        let mut m = Self::new(nrows, ncols);
        for i in 0..nrows.min(ncols) {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Copy a two-dimensional array, one slice per row.
    ///
    /// Fails with [`LinalgError::RaggedRows`] if the rows differ in length.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    ///
    /// let ragged = DenseMatrix::from_rows(&[vec![1.0], vec![2.0, 3.0]]);
    /// assert!(ragged.is_err());
    /// ```
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(LinalgError::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected: ncols,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Wrap an owned row-major `Vec<T>` without copying.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_row_major_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m[(0, 1)], 2.0);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_row_major_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Build a matrix from a flat column-packed array (column 0 first).
    ///
    /// Fails with [`LinalgError::InvalidLength`] if `vals.len()` is not a
    /// multiple of `nrows`.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// // col0=[1,3], col1=[2,4]
    /// let m = DenseMatrix::from_column_packed(&[1.0, 3.0, 2.0, 4.0], 2).unwrap();
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// assert_eq!(m[(0, 1)], 2.0);
    /// ```
    pub fn from_column_packed(vals: &[T], nrows: usize) -> Result<Self, LinalgError> {
        if nrows == 0 {
            if vals.is_empty() {
                return Ok(Self::new(0, 0));
            }
            return Err(LinalgError::InvalidLength {
                len: vals.len(),
                rows: nrows,
            });
        }
        if vals.len() % nrows != 0 {
            return Err(LinalgError::InvalidLength {
                len: vals.len(),
                rows: nrows,
            });
        }
        let ncols = vals.len() / nrows;
        Ok(Self::from_fn(nrows, ncols, |i, j| vals[i + j * nrows]))
    }
}

impl<T> DenseMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }
}

impl<T: Copy> DenseMatrix<T> {
    /// Element at `(row, col)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }

    /// Overwrite the element at `(row, col)`. Panics when out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for DenseMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self[(row, col)]
    }
}

impl<T> MatrixMut<T> for DenseMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self[(row, col)]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> DenseMatrix<T> {
    #[inline]
    #[track_caller]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols
        );
        row * self.ncols + col
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let i = self.offset(row, col);
        &mut self.data[i]
    }
}

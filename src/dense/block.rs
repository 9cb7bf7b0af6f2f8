use core::ops::Range;

use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::DenseMatrix;

fn check_range(r: &Range<usize>, bound: usize) -> Result<(), LinalgError> {
    if r.start > r.end {
        return Err(LinalgError::IndexOutOfRange {
            index: r.start,
            bound: r.end,
        });
    }
    if r.end > bound {
        return Err(LinalgError::IndexOutOfRange {
            index: r.end - 1,
            bound,
        });
    }
    Ok(())
}

fn check_indices(idx: &[usize], bound: usize) -> Result<(), LinalgError> {
    match idx.iter().find(|&&i| i >= bound) {
        Some(&index) => Err(LinalgError::IndexOutOfRange { index, bound }),
        None => Ok(()),
    }
}

impl<T: Scalar> DenseMatrix<T> {
    /// Copy the block `rows x cols` (half-open ranges) into a new matrix.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let b = m.submatrix(1..3, 1..3).unwrap();
    /// assert_eq!(b[(0, 0)], 4.0);
    /// assert_eq!(b[(1, 1)], 8.0);
    /// assert!(m.submatrix(0..4, 0..1).is_err());
    /// ```
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self, LinalgError> {
        check_range(&rows, self.nrows)?;
        check_range(&cols, self.ncols)?;
        Ok(DenseMatrix::from_fn(rows.len(), cols.len(), |i, j| {
            self[(rows.start + i, cols.start + j)]
        }))
    }

    /// Copy the elements at the given row and column indices.
    ///
    /// Indices may repeat and appear in any order.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let s = m.select(&[2, 0], &[1]).unwrap();
    /// assert_eq!(s.shape(), (2, 1));
    /// assert_eq!(s[(0, 0)], 7.0);
    /// assert_eq!(s[(1, 0)], 1.0);
    /// ```
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Result<Self, LinalgError> {
        check_indices(rows, self.nrows)?;
        check_indices(cols, self.ncols)?;
        Ok(DenseMatrix::from_fn(rows.len(), cols.len(), |i, j| {
            self[(rows[i], cols[j])]
        }))
    }

    /// Copy the given rows, restricted to a contiguous column range.
    pub fn select_rows(&self, rows: &[usize], cols: Range<usize>) -> Result<Self, LinalgError> {
        check_indices(rows, self.nrows)?;
        check_range(&cols, self.ncols)?;
        Ok(DenseMatrix::from_fn(rows.len(), cols.len(), |i, j| {
            self[(rows[i], cols.start + j)]
        }))
    }

    /// Copy the given columns, restricted to a contiguous row range.
    pub fn select_cols(&self, rows: Range<usize>, cols: &[usize]) -> Result<Self, LinalgError> {
        check_range(&rows, self.nrows)?;
        check_indices(cols, self.ncols)?;
        Ok(DenseMatrix::from_fn(rows.len(), cols.len(), |i, j| {
            self[(rows.start + i, cols[j])]
        }))
    }

    /// Write `src` into self with its top-left corner at `(row0, col0)`.
    ///
    /// Nothing is written if the block would extend past the matrix.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let mut m = DenseMatrix::<f64>::new(3, 3);
    /// let patch = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// m.set_submatrix(1, 1, &patch).unwrap();
    /// assert_eq!(m[(1, 1)], 1.0);
    /// assert_eq!(m[(2, 2)], 4.0);
    /// assert!(m.set_submatrix(2, 2, &patch).is_err());
    /// ```
    pub fn set_submatrix(&mut self, row0: usize, col0: usize, src: &Self) -> Result<(), LinalgError> {
        let row_end = row0
            .checked_add(src.nrows)
            .ok_or(LinalgError::IndexOutOfRange { index: row0, bound: self.nrows })?;
        let col_end = col0
            .checked_add(src.ncols)
            .ok_or(LinalgError::IndexOutOfRange { index: col0, bound: self.ncols })?;
        check_range(&(row0..row_end), self.nrows)?;
        check_range(&(col0..col_end), self.ncols)?;
        for r in 0..src.nrows {
            let dst = (row0 + r) * self.ncols + col0;
            self.data[dst..dst + src.ncols].copy_from_slice(src.row_slice(r));
        }
        Ok(())
    }

    /// Scatter `src` into the elements at the given row and column indices.
    ///
    /// `src` must be `rows.len() x cols.len()`.
    pub fn set_selected(&mut self, rows: &[usize], cols: &[usize], src: &Self) -> Result<(), LinalgError> {
        if src.shape() != (rows.len(), cols.len()) {
            return Err(LinalgError::DimensionMismatch {
                op: "set_selected",
                lhs: (rows.len(), cols.len()),
                rhs: src.shape(),
            });
        }
        check_indices(rows, self.nrows)?;
        check_indices(cols, self.ncols)?;
        for (i, &r) in rows.iter().enumerate() {
            for (j, &c) in cols.iter().enumerate() {
                self[(r, c)] = src[(i, j)];
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> DenseMatrix<f64> {
        DenseMatrix::from_fn(4, 5, |i, j| (10 * i + j) as f64)
    }

    #[test]
    fn submatrix_copies() {
        let m = grid();
        let mut b = m.submatrix(1..3, 2..5).unwrap();
        assert_eq!(b.shape(), (2, 3));
        assert_eq!(b.row_slice(0), &[12.0, 13.0, 14.0]);
        assert_eq!(b.row_slice(1), &[22.0, 23.0, 24.0]);
        b[(0, 0)] = -1.0;
        assert_eq!(m[(1, 2)], 12.0);
    }

    #[test]
    fn submatrix_empty_range() {
        let b = grid().submatrix(2..2, 0..5).unwrap();
        assert_eq!(b.shape(), (0, 5));
    }

    #[test]
    fn submatrix_out_of_range() {
        let m = grid();
        assert_eq!(
            m.submatrix(0..5, 0..1).unwrap_err(),
            LinalgError::IndexOutOfRange { index: 4, bound: 4 }
        );
        assert_eq!(
            m.submatrix(0..1, 0..6).unwrap_err(),
            LinalgError::IndexOutOfRange { index: 5, bound: 5 }
        );
    }

    #[test]
    fn select_indices() {
        let m = grid();
        let s = m.select(&[3, 1, 1], &[4, 0]).unwrap();
        assert_eq!(s.row_slice(0), &[34.0, 30.0]);
        assert_eq!(s.row_slice(1), &[14.0, 10.0]);
        assert_eq!(s.row_slice(2), &[14.0, 10.0]);
    }

    #[test]
    fn select_bad_index() {
        let m = grid();
        assert_eq!(
            m.select(&[0, 7], &[0]).unwrap_err(),
            LinalgError::IndexOutOfRange { index: 7, bound: 4 }
        );
        assert!(m.select_cols(0..2, &[5]).is_err());
        assert!(m.select_rows(&[4], 0..2).is_err());
    }

    #[test]
    fn select_rows_and_cols() {
        let m = grid();
        let r = m.select_rows(&[2, 0], 1..3).unwrap();
        assert_eq!(r.row_slice(0), &[21.0, 22.0]);
        assert_eq!(r.row_slice(1), &[1.0, 2.0]);
        let c = m.select_cols(1..3, &[4, 3]).unwrap();
        assert_eq!(c.row_slice(0), &[14.0, 13.0]);
        assert_eq!(c.row_slice(1), &[24.0, 23.0]);
    }

    #[test]
    fn set_submatrix_writes_block() {
        let mut m = DenseMatrix::<f64>::new(3, 4);
        let patch = DenseMatrix::filled(2, 2, 1.0);
        m.set_submatrix(1, 2, &patch).unwrap();
        assert_eq!(m.row_slice(0), &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.row_slice(1), &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(m.row_slice(2), &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn set_submatrix_rejects_overhang() {
        let mut m = DenseMatrix::<f64>::new(3, 3);
        let patch = DenseMatrix::filled(2, 2, 1.0);
        assert!(m.set_submatrix(2, 0, &patch).is_err());
        assert_eq!(m, DenseMatrix::new(3, 3));
    }

    #[test]
    fn set_submatrix_offset_overflow() {
        let mut m = DenseMatrix::<f64>::new(3, 3);
        let patch = DenseMatrix::filled(2, 2, 1.0);
        assert_eq!(
            m.set_submatrix(usize::MAX, 0, &patch).unwrap_err(),
            LinalgError::IndexOutOfRange { index: usize::MAX, bound: 3 }
        );
        assert_eq!(
            m.set_submatrix(0, usize::MAX - 1, &patch).unwrap_err(),
            LinalgError::IndexOutOfRange { index: usize::MAX - 1, bound: 3 }
        );
        assert_eq!(m, DenseMatrix::new(3, 3));
    }

    #[test]
    fn set_selected_scatters() {
        let mut m = DenseMatrix::<f64>::new(3, 3);
        let src = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        m.set_selected(&[2, 0], &[0, 2], &src).unwrap();
        assert_eq!(m[(2, 0)], 1.0);
        assert_eq!(m[(2, 2)], 2.0);
        assert_eq!(m[(0, 0)], 3.0);
        assert_eq!(m[(0, 2)], 4.0);
        assert_eq!(m[(1, 1)], 0.0);
    }

    #[test]
    fn set_selected_shape_mismatch() {
        let mut m = DenseMatrix::<f64>::new(3, 3);
        let src = DenseMatrix::filled(1, 2, 1.0);
        assert!(matches!(
            m.set_selected(&[0, 1], &[0, 1], &src),
            Err(LinalgError::DimensionMismatch { op: "set_selected", .. })
        ));
        assert!(matches!(
            m.set_selected(&[3], &[0, 1], &src),
            Err(LinalgError::IndexOutOfRange { index: 3, bound: 3 })
        ));
    }
}

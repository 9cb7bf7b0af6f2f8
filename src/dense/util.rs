use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use super::DenseMatrix;

// ── Transpose / Map ─────────────────────────────────────────────────

impl<T: Copy> DenseMatrix<T> {
    /// Transpose into a new matrix.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), (3, 2));
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Self {
        DenseMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0_f64, 4.0], [9.0, 16.0]]).unwrap();
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(0, 0)], 1.0);
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> DenseMatrix<U> {
        DenseMatrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

// ── Copies out ──────────────────────────────────────────────────────

impl<T: Copy> DenseMatrix<T> {
    /// Row-major element storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Row `i` as a contiguous slice.
    #[inline]
    pub fn row_slice(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Consume the matrix, returning its row-major storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Copy into a vector of rows.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.to_2d(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    /// ```
    pub fn to_2d(&self) -> Vec<Vec<T>> {
        (0..self.nrows).map(|i| self.row_slice(i).to_vec()).collect()
    }

    /// Copy into a flat array, one row after another.
    pub fn to_row_packed(&self) -> Vec<T> {
        self.data.clone()
    }

    /// Copy into a flat array, one column after another.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.to_column_packed(), vec![1.0, 3.0, 2.0, 4.0]);
    /// ```
    pub fn to_column_packed(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                out.push(self[(i, j)]);
            }
        }
        out
    }
}

// ── Row / Column manipulation ───────────────────────────────────────

impl<T> DenseMatrix<T> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let mut m = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }

    /// Swap two columns in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a != b {
            for i in 0..self.nrows {
                let ia = i * self.ncols + a;
                let ib = i * self.ncols + b;
                self.data.swap(ia, ib);
            }
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// Right-aligned columns between box-drawing bars. A precision given to the
/// formatter (`{:.3}`) is applied to every element.
impl<T: fmt::Display> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;
        let prec = f.precision();

        let mut widths: Vec<usize> = alloc::vec![0; n];
        for j in 0..n {
            for i in 0..m {
                let x = &self.data[i * n + j];
                let w = WriteCounting::count(|wc| match prec {
                    Some(p) => write!(wc, "{:.*}", p, x),
                    None => write!(wc, "{}", x),
                });
                widths[j] = widths[j].max(w);
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                let x = &self.data[i * n + j];
                match prec {
                    Some(p) => write!(f, "{:>width$.prec$}", x, width = widths[j], prec = p)?,
                    None => write!(f, "{:>width$}", x, width = widths[j])?,
                }
            }
            write!(f, "│")?;
            if i + 1 < m {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}

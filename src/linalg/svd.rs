use alloc::vec;
use alloc::vec::Vec;

use crate::dense::DenseMatrix;
use crate::traits::{FloatScalar, MatrixMut};

// ── Plane rotation helpers ──────────────────────────────────────────

/// Rotate columns `j` and `k` of `m` in place:
/// `[m_j, m_k] <- [cs*m_j + sn*m_k, -sn*m_j + cs*m_k]`.
#[inline]
fn rotate_columns<T: FloatScalar>(m: &mut impl MatrixMut<T>, j: usize, k: usize, cs: T, sn: T) {
    for i in 0..m.nrows() {
        let mj = *m.get(i, j);
        let mk = *m.get(i, k);
        *m.get_mut(i, k) = -sn * mj + cs * mk;
        *m.get_mut(i, j) = cs * mj + sn * mk;
    }
}

#[inline]
fn swap_columns<T: FloatScalar>(m: &mut impl MatrixMut<T>, j: usize, k: usize) {
    for i in 0..m.nrows() {
        let t = *m.get(i, j);
        *m.get_mut(i, j) = *m.get(i, k);
        *m.get_mut(i, k) = t;
    }
}

// ── Householder bidiagonalization ───────────────────────────────────

/// Reduce an `m x n` matrix (`m >= n >= 1`) to upper bidiagonal form.
///
/// Column reflections leave the diagonal in `s` and row reflections the
/// superdiagonal in `e` (`e[n-1] = 0`). `u` (`m x n`) and `v` (`n x n`)
/// receive the accumulated orthogonal transforms, so `A = U · B · Vᵗ`.
/// `a` is overwritten with the Householder vectors.
pub(crate) fn bidiagonalize<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    s: &mut [T],
    e: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
) {
    let m = a.nrows();
    let n = a.ncols();
    debug_assert!(m >= n && n >= 1);
    debug_assert!(s.len() == n && e.len() == n);

    let mut work = vec![T::zero(); m];
    let nct = (m - 1).min(n);
    let nrt = n.saturating_sub(2).min(m);

    for k in 0..nct.max(nrt) {
        if k < nct {
            // Column transform: zero A[k+1.., k], diagonal into s[k].
            s[k] = T::zero();
            for i in k..m {
                s[k] = s[k].hypot(*a.get(i, k));
            }
            if s[k] != T::zero() {
                if *a.get(k, k) < T::zero() {
                    s[k] = -s[k];
                }
                for i in k..m {
                    let x = *a.get(i, k) / s[k];
                    *a.get_mut(i, k) = x;
                }
                let x = *a.get(k, k) + T::one();
                *a.get_mut(k, k) = x;
            }
            s[k] = -s[k];
        }

        for j in (k + 1)..n {
            if k < nct && s[k] != T::zero() {
                let mut t = T::zero();
                for i in k..m {
                    t = t + *a.get(i, k) * *a.get(i, j);
                }
                t = -t / *a.get(k, k);
                for i in k..m {
                    let x = *a.get(i, j) + t * *a.get(i, k);
                    *a.get_mut(i, j) = x;
                }
            }
            // Row k of the trailing block feeds the next row transform.
            e[j] = *a.get(k, j);
        }

        if k < nct {
            for i in k..m {
                *u.get_mut(i, k) = *a.get(i, k);
            }
        }

        if k < nrt {
            // Row transform: zero A[k, k+2..], superdiagonal into e[k].
            e[k] = T::zero();
            for i in (k + 1)..n {
                e[k] = e[k].hypot(e[i]);
            }
            if e[k] != T::zero() {
                if e[k + 1] < T::zero() {
                    e[k] = -e[k];
                }
                for i in (k + 1)..n {
                    e[i] = e[i] / e[k];
                }
                e[k + 1] = e[k + 1] + T::one();
            }
            e[k] = -e[k];

            if k + 1 < m && e[k] != T::zero() {
                for w in work.iter_mut().skip(k + 1) {
                    *w = T::zero();
                }
                for j in (k + 1)..n {
                    for i in (k + 1)..m {
                        work[i] = work[i] + e[j] * *a.get(i, j);
                    }
                }
                for j in (k + 1)..n {
                    let t = -e[j] / e[k + 1];
                    for i in (k + 1)..m {
                        let x = *a.get(i, j) + t * work[i];
                        *a.get_mut(i, j) = x;
                    }
                }
            }

            for i in (k + 1)..n {
                *v.get_mut(i, k) = e[i];
            }
        }
    }

    // Final bidiagonal matrix of order n.
    if nct < n {
        s[nct] = *a.get(nct, nct);
    }
    if nrt + 1 < n {
        e[nrt] = *a.get(nrt, n - 1);
    }
    e[n - 1] = T::zero();

    // Generate U.
    for j in nct..n {
        for i in 0..m {
            *u.get_mut(i, j) = T::zero();
        }
        *u.get_mut(j, j) = T::one();
    }
    for k in (0..nct).rev() {
        if s[k] != T::zero() {
            for j in (k + 1)..n {
                let mut t = T::zero();
                for i in k..m {
                    t = t + *u.get(i, k) * *u.get(i, j);
                }
                t = -t / *u.get(k, k);
                for i in k..m {
                    let x = *u.get(i, j) + t * *u.get(i, k);
                    *u.get_mut(i, j) = x;
                }
            }
            for i in k..m {
                let x = -*u.get(i, k);
                *u.get_mut(i, k) = x;
            }
            let x = T::one() + *u.get(k, k);
            *u.get_mut(k, k) = x;
            for i in 0..k {
                *u.get_mut(i, k) = T::zero();
            }
        } else {
            for i in 0..m {
                *u.get_mut(i, k) = T::zero();
            }
            *u.get_mut(k, k) = T::one();
        }
    }

    // Generate V.
    for k in (0..n).rev() {
        if k < nrt && e[k] != T::zero() {
            for j in (k + 1)..n {
                let mut t = T::zero();
                for i in (k + 1)..n {
                    t = t + *v.get(i, k) * *v.get(i, j);
                }
                t = -t / *v.get(k + 1, k);
                for i in (k + 1)..n {
                    let x = *v.get(i, j) + t * *v.get(i, k);
                    *v.get_mut(i, j) = x;
                }
            }
        }
        for i in 0..n {
            *v.get_mut(i, k) = T::zero();
        }
        *v.get_mut(k, k) = T::one();
    }
}

// ── Implicit-shift QR on the bidiagonal ─────────────────────────────

/// Classification of the active window `[lo, p)` of the bidiagonal.
enum Case {
    /// `s[p-1]` is negligible.
    DeflateLast,
    /// `s[k-1]` is negligible for the carried `k`.
    Split(usize),
    /// No negligible entries: take a shifted QR sweep.
    QrStep,
    /// `e[p-2]` is negligible: `s[p-1]` has converged.
    Converged,
}

/// Diagonalize the bidiagonal `(s, e)` in place with Golub-Kahan implicit
/// shifted QR sweeps, applying every rotation to the columns of `u` and `v`.
///
/// On return `s` holds the singular values, non-negative and sorted
/// descending, with the columns of `u` and `v` permuted to match. Returns
/// the number of QR sweeps performed.
///
/// An entry is negligible once it drops below
/// `tiny + eps·(|s_k| + |s_{k+1}|)`. The iteration runs until every entry
/// has converged; callers must not pass non-finite data.
pub(crate) fn bidiagonal_qr<T: FloatScalar>(
    s: &mut [T],
    e: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
) -> usize {
    let m = u.nrows();
    let n = v.nrows();
    let eps = T::epsilon();
    let tiny = T::tiny();
    let two = super::two::<T>();

    let mut p = s.len();
    let pp = p.saturating_sub(1);
    let mut sweeps = 0usize;

    while p > 0 {
        // Largest lo such that e[lo-1] is negligible (lo = 0 if none).
        let mut lo = p - 1;
        while lo > 0 {
            let k = lo - 1;
            if e[k].abs() <= tiny + eps * (s[k].abs() + s[k + 1].abs()) {
                e[k] = T::zero();
                break;
            }
            lo -= 1;
        }

        let case = if lo == p - 1 {
            Case::Converged
        } else {
            let mut found = None;
            for ks in (lo..p).rev() {
                let mut t = e[ks].abs();
                if ks != lo {
                    t = t + e[ks - 1].abs();
                }
                if s[ks].abs() <= tiny + eps * t {
                    s[ks] = T::zero();
                    found = Some(ks);
                    break;
                }
            }
            match found {
                None => Case::QrStep,
                Some(ks) if ks == p - 1 => Case::DeflateLast,
                Some(ks) => Case::Split(ks + 1),
            }
        };

        match case {
            // s[p-1] is negligible: chase e[p-2] out with rotations on V.
            Case::DeflateLast => {
                let mut f = e[p - 2];
                e[p - 2] = T::zero();
                for j in (lo..=(p - 2)).rev() {
                    let t = s[j].hypot(f);
                    let cs = s[j] / t;
                    let sn = f / t;
                    s[j] = t;
                    if j != lo {
                        f = -sn * e[j - 1];
                        e[j - 1] = cs * e[j - 1];
                    }
                    rotate_columns(v, j, p - 1, cs, sn);
                }
            }

            // s[k-1] is negligible: split, chasing e[k-1] with rotations on U.
            Case::Split(k) => {
                let mut f = e[k - 1];
                e[k - 1] = T::zero();
                for j in k..p {
                    let t = s[j].hypot(f);
                    let cs = s[j] / t;
                    let sn = f / t;
                    s[j] = t;
                    f = -sn * e[j];
                    e[j] = cs * e[j];
                    rotate_columns(u, j, k - 1, cs, sn);
                }
            }

            // One implicit QR sweep over [lo, p) shifted by the trailing 2x2.
            Case::QrStep => {
                let k = lo;
                let scale = s[p - 1]
                    .abs()
                    .max(s[p - 2].abs())
                    .max(e[p - 2].abs())
                    .max(s[k].abs())
                    .max(e[k].abs());
                let sp = s[p - 1] / scale;
                let spm1 = s[p - 2] / scale;
                let epm1 = e[p - 2] / scale;
                let sk = s[k] / scale;
                let ek = e[k] / scale;
                let b = ((spm1 + sp) * (spm1 - sp) + epm1 * epm1) / two;
                let c = (sp * epm1) * (sp * epm1);
                let mut shift = T::zero();
                if b != T::zero() || c != T::zero() {
                    shift = (b * b + c).sqrt();
                    if b < T::zero() {
                        shift = -shift;
                    }
                    shift = c / (b + shift);
                }
                let mut f = (sk + sp) * (sk - sp) + shift;
                let mut g = sk * ek;

                for j in k..(p - 1) {
                    let t = f.hypot(g);
                    let cs = f / t;
                    let sn = g / t;
                    if j != k {
                        e[j - 1] = t;
                    }
                    f = cs * s[j] + sn * e[j];
                    e[j] = cs * e[j] - sn * s[j];
                    g = sn * s[j + 1];
                    s[j + 1] = cs * s[j + 1];
                    rotate_columns(v, j, j + 1, cs, sn);

                    let t = f.hypot(g);
                    let cs = f / t;
                    let sn = g / t;
                    s[j] = t;
                    f = cs * e[j] + sn * s[j + 1];
                    s[j + 1] = -sn * e[j] + cs * s[j + 1];
                    g = sn * e[j + 1];
                    e[j + 1] = cs * e[j + 1];
                    if j + 1 < m {
                        rotate_columns(u, j, j + 1, cs, sn);
                    }
                }
                e[p - 2] = f;
                sweeps += 1;
            }

            // s[lo] has converged: make it non-negative and sift it into place.
            Case::Converged => {
                let mut k = lo;
                if s[k] <= T::zero() {
                    s[k] = if s[k] < T::zero() { -s[k] } else { T::zero() };
                    for i in 0..=pp {
                        let x = -*v.get(i, k);
                        *v.get_mut(i, k) = x;
                    }
                }
                while k < pp {
                    if s[k] >= s[k + 1] {
                        break;
                    }
                    s.swap(k, k + 1);
                    if k + 1 < n {
                        swap_columns(v, k, k + 1);
                    }
                    if k + 1 < m {
                        swap_columns(u, k, k + 1);
                    }
                    k += 1;
                }
                p -= 1;
            }
        }
    }

    sweeps
}

// ── SingularValueDecomposition ──────────────────────────────────────

/// Singular value decomposition `A = U · diag(S) · Vᵗ` of any `m x n`
/// real matrix.
///
/// Factors are thin: with `k = min(m, n)`, `U` is `m x k`, `S` has length
/// `k`, and `V` is `n x k`. For `m >= n` these are the classic `m x n`,
/// `n`, `n x n`. `S` has length `min(m, n)` for every shape, wide ones
/// included. A wide matrix is decomposed through its transpose. The
/// decomposition always exists, so construction cannot fail.
///
/// # Example
///
/// ```
/// use densela::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [0.0, 2.0], [0.0, 0.0]]).unwrap();
/// let svd = a.svd();
/// assert!((svd.singular_values()[0] - 2.0).abs() < 1e-10);
/// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-10);
/// assert_eq!(svd.u().shape(), (3, 2));
/// assert_eq!(svd.v().shape(), (2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct SingularValueDecomposition<T> {
    u: DenseMatrix<T>,
    s: Vec<T>,
    v: DenseMatrix<T>,
    m: usize,
    n: usize,
}

impl<T: FloatScalar> SingularValueDecomposition<T> {
    /// Decompose `a`.
    ///
    /// Input containing NaN or infinity yields NaN singular values and
    /// factors (and logs a warning) instead of iterating.
    pub fn new(a: &DenseMatrix<T>) -> Self {
        let (m, n) = a.shape();
        let k = m.min(n);

        if a.as_slice().iter().any(|x| !x.is_finite()) {
            log::warn!(
                target: crate::LOG_TARGET,
                "svd: {}x{} input contains non-finite values",
                m,
                n
            );
            return Self {
                u: DenseMatrix::filled(m, k, T::nan()),
                s: vec![T::nan(); k],
                v: DenseMatrix::filled(n, k, T::nan()),
                m,
                n,
            };
        }

        if k == 0 {
            return Self {
                u: DenseMatrix::new(m, 0),
                s: Vec::new(),
                v: DenseMatrix::new(n, 0),
                m,
                n,
            };
        }

        // Work on a tall copy; a wide matrix swaps the roles of U and V.
        let wide = m < n;
        let mut work = if wide { a.transpose() } else { a.clone() };
        let (rows, cols) = work.shape();

        let mut s = vec![T::zero(); cols];
        let mut e = vec![T::zero(); cols];
        let mut u = DenseMatrix::new(rows, cols);
        let mut v = DenseMatrix::new(cols, cols);

        bidiagonalize(&mut work, &mut s, &mut e, &mut u, &mut v);
        let sweeps = bidiagonal_qr(&mut s, &mut e, &mut u, &mut v);
        log::debug!(
            target: crate::LOG_TARGET,
            "svd: {}x{} converged after {} QR sweeps",
            m,
            n,
            sweeps
        );

        let (u, v) = if wide { (v, u) } else { (u, v) };
        Self { u, s, v, m, n }
    }

    /// Left singular vectors, `m x min(m, n)`.
    pub fn u(&self) -> DenseMatrix<T> {
        self.u.clone()
    }

    /// Right singular vectors, `n x min(m, n)`.
    pub fn v(&self) -> DenseMatrix<T> {
        self.v.clone()
    }

    /// Singular values, non-negative and sorted descending.
    pub fn singular_values(&self) -> &[T] {
        &self.s
    }

    /// Diagonal matrix of the singular values.
    pub fn s(&self) -> DenseMatrix<T> {
        DenseMatrix::from_diagonal(&self.s)
    }

    /// Two norm, the largest singular value (zero for an empty matrix).
    pub fn norm2(&self) -> T {
        self.s.first().copied().unwrap_or_else(T::zero)
    }

    /// Two-norm condition number `S[0] / S[last]`.
    ///
    /// Infinite for a singular matrix, NaN for an empty one.
    pub fn cond(&self) -> T {
        match (self.s.first(), self.s.last()) {
            (Some(&hi), Some(&lo)) => hi / lo,
            _ => T::nan(),
        }
    }

    /// Effective numerical rank: the number of singular values above
    /// `max(m, n) · S[0] · eps`.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 4.0]]).unwrap();
    /// assert_eq!(a.svd().rank(), 1);
    /// ```
    pub fn rank(&self) -> usize {
        let tol = T::from_count(self.m.max(self.n)) * self.norm2() * T::epsilon();
        self.s.iter().filter(|&&x| x > tol).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn assert_identity(m: &DenseMatrix<f64>, tol: f64, what: &str) {
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(m[(i, j)], expected, tol, &format!("{}[({},{})]", what, i, j));
            }
        }
    }

    fn check_reconstruction(a: &DenseMatrix<f64>, tol: f64) {
        let svd = SingularValueDecomposition::new(a);
        let u = svd.u();
        let v = svd.v();
        let k = a.nrows().min(a.ncols());
        assert_eq!(u.shape(), (a.nrows(), k));
        assert_eq!(v.shape(), (a.ncols(), k));
        assert_eq!(svd.singular_values().len(), k);

        let usv = &(&u * &svd.s()) * &v.transpose();
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_near(usv[(i, j)], a[(i, j)], tol, &format!("USVt[({},{})]", i, j));
            }
        }
        assert_identity(&(&u.transpose() * &u), tol, "UtU");
        assert_identity(&(&v.transpose() * &v), tol, "VtV");

        let sv = svd.singular_values();
        for w in sv.windows(2) {
            assert!(w[0] >= w[1], "not sorted: {:?}", sv);
        }
        assert!(sv.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn identity_3x3() {
        let a = DenseMatrix::<f64>::identity(3, 3);
        let svd = SingularValueDecomposition::new(&a);
        for i in 0..3 {
            assert_near(svd.singular_values()[i], 1.0, TOL, &format!("σ[{}]", i));
        }
        assert_identity(&(&svd.u().transpose() * &svd.u()), TOL, "UtU");
    }

    #[test]
    fn diagonal_with_negative() {
        let a = DenseMatrix::from_rows(&[[-3.0_f64, 0.0], [0.0, 2.0]]).unwrap();
        let svd = SingularValueDecomposition::new(&a);
        assert_near(svd.singular_values()[0], 3.0, TOL, "σ[0]");
        assert_near(svd.singular_values()[1], 2.0, TOL, "σ[1]");
        check_reconstruction(&a, TOL);
    }

    #[test]
    fn diagonal_sorted_descending() {
        let a = DenseMatrix::from_rows(&[[4.0_f64, 0.0], [0.0, 9.0]]).unwrap();
        let svd = SingularValueDecomposition::new(&a);
        assert_eq!(svd.singular_values(), &[9.0, 4.0]);
    }

    #[test]
    fn known_2x2() {
        // AᵗA = [[13, 12], [12, 13]], eigenvalues 25 and 1.
        let a = DenseMatrix::from_rows(&[[3.0_f64, 2.0], [2.0, 3.0]]).unwrap();
        let svd = SingularValueDecomposition::new(&a);
        assert_near(svd.singular_values()[0], 5.0, TOL, "σ[0]");
        assert_near(svd.singular_values()[1], 1.0, TOL, "σ[1]");
        assert_near(svd.cond(), 5.0, TOL, "cond");
        assert_near(svd.norm2(), 5.0, TOL, "norm2");
    }

    #[test]
    fn reconstruction_square() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 0.0]])
            .unwrap();
        check_reconstruction(&a, 1e-9);
    }

    #[test]
    fn reconstruction_tall() {
        let a = DenseMatrix::from_fn(5, 3, |i, j| ((i * 7 + j * 3) % 5) as f64 - 1.5);
        check_reconstruction(&a, 1e-9);
    }

    #[test]
    fn reconstruction_wide() {
        let a = DenseMatrix::from_fn(2, 4, |i, j| (i + 2 * j) as f64 + if i == j { 1.0 } else { 0.0 });
        check_reconstruction(&a, 1e-9);
    }

    #[test]
    fn single_column_and_row() {
        let col = DenseMatrix::from_rows(&[[3.0_f64], [4.0]]).unwrap();
        let svd = SingularValueDecomposition::new(&col);
        assert_near(svd.singular_values()[0], 5.0, TOL, "column");
        check_reconstruction(&col, TOL);

        let row = col.transpose();
        let svd = SingularValueDecomposition::new(&row);
        assert_near(svd.singular_values()[0], 5.0, TOL, "row");
        check_reconstruction(&row, TOL);
    }

    #[test]
    fn size_1x1_negative() {
        let a = DenseMatrix::from_rows(&[[-7.0_f64]]).unwrap();
        let svd = SingularValueDecomposition::new(&a);
        assert_eq!(svd.singular_values(), &[7.0]);
        assert_eq!(svd.v()[(0, 0)], -1.0);
        assert_eq!(svd.u()[(0, 0)], 1.0);
    }

    #[test]
    fn rank_deficient() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]])
            .unwrap();
        let svd = SingularValueDecomposition::new(&a);
        assert_eq!(svd.rank(), 2);
        assert!(svd.singular_values()[2] < 1e-12);
        assert!(svd.cond() > 1e12);
        check_reconstruction(&a, 1e-9);
    }

    // Exact zeros on the bidiagonal force the deflation and split cases.
    #[test]
    fn zero_diagonal_entries() {
        let shift2 = DenseMatrix::from_rows(&[[0.0, 1.0], [0.0, 0.0]]).unwrap();
        check_reconstruction(&shift2, TOL);
        assert_eq!(SingularValueDecomposition::new(&shift2).singular_values(), &[1.0, 0.0]);

        let shift3 = DenseMatrix::from_rows(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
        ])
        .unwrap();
        check_reconstruction(&shift3, TOL);
        let sv = SingularValueDecomposition::new(&shift3);
        assert_near(sv.singular_values()[0], 1.0, TOL, "σ0");
        assert_near(sv.singular_values()[1], 1.0, TOL, "σ1");
        assert_near(sv.singular_values()[2], 0.0, TOL, "σ2");
        assert_eq!(sv.rank(), 2);

        let mixed = DenseMatrix::from_rows(&[
            [1.0, 2.0, 0.0],
            [0.0, 0.0, 3.0],
            [0.0, 0.0, 4.0],
        ])
        .unwrap();
        check_reconstruction(&mixed, TOL);
        let sv = SingularValueDecomposition::new(&mixed);
        assert_near(sv.singular_values()[0], 5.0, TOL, "σ0");
        assert_near(sv.singular_values()[1], 5.0_f64.sqrt(), TOL, "σ1");
        assert_near(sv.singular_values()[2], 0.0, TOL, "σ2");
    }

    #[test]
    fn zero_matrix() {
        let a = DenseMatrix::<f64>::new(3, 2);
        let svd = SingularValueDecomposition::new(&a);
        assert_eq!(svd.singular_values(), &[0.0, 0.0]);
        assert_eq!(svd.rank(), 0);
        check_reconstruction(&a, TOL);
    }

    #[test]
    fn empty_matrix() {
        let a = DenseMatrix::<f64>::new(0, 3);
        let svd = SingularValueDecomposition::new(&a);
        assert!(svd.singular_values().is_empty());
        assert_eq!(svd.u().shape(), (0, 0));
        assert_eq!(svd.v().shape(), (3, 0));
        assert_eq!(svd.rank(), 0);
        assert_eq!(svd.norm2(), 0.0);
        assert!(svd.cond().is_nan());
    }

    #[test]
    fn non_finite_input() {
        let mut a = DenseMatrix::<f64>::identity(3, 3);
        a[(1, 2)] = f64::NAN;
        let svd = SingularValueDecomposition::new(&a);
        assert!(svd.singular_values().iter().all(|x| x.is_nan()));
        assert!(svd.u().as_slice().iter().all(|x| x.is_nan()));

        a[(1, 2)] = f64::INFINITY;
        let svd = SingularValueDecomposition::new(&a);
        assert_eq!(svd.singular_values().len(), 3);
        assert!(svd.norm2().is_nan());
    }

    #[test]
    fn deterministic() {
        let a = DenseMatrix::from_fn(4, 4, |i, j| ((i * 5 + j * 11) % 7) as f64 - 3.0);
        let s1 = SingularValueDecomposition::new(&a);
        let s2 = SingularValueDecomposition::new(&a);
        assert_eq!(s1.singular_values(), s2.singular_values());
        assert_eq!(s1.u(), s2.u());
        assert_eq!(s1.v(), s2.v());
    }

    #[test]
    fn f32_support() {
        let a = DenseMatrix::from_rows(&[[3.0_f32, 2.0], [2.0, 3.0]]).unwrap();
        let svd = SingularValueDecomposition::new(&a);
        assert!((svd.singular_values()[0] - 5.0).abs() < 1e-5);
        assert!((svd.singular_values()[1] - 1.0).abs() < 1e-5);
    }
}

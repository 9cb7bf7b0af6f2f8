use alloc::vec;
use alloc::vec::Vec;

use crate::dense::DenseMatrix;
use crate::linalg::{two, LinalgError};
use crate::traits::FloatScalar;

/// Symmetric tridiagonal form `Vᵗ·A·V = T`, carried between the phases of
/// the symmetric eigensolver.
///
/// After [`tridiagonalize`], `d` is the diagonal of `T` and `e[1..]` its
/// subdiagonal (`e[0] = 0`). After [`tridiagonal_ql`], `d` holds the
/// eigenvalues, `e` is zero, and the columns of `v` are the eigenvectors.
#[derive(Debug, Clone)]
pub(crate) struct Tridiagonal<T> {
    pub d: Vec<T>,
    pub e: Vec<T>,
    pub v: DenseMatrix<T>,
}

/// Householder reduction of a symmetric matrix to tridiagonal form
/// (EISPACK `tred2`), accumulating the orthogonal transform.
///
/// Columns are eliminated from the last one backwards; each Householder
/// vector is scaled by the 1-norm of its column to avoid under/overflow.
/// `a` must be square with `n >= 1`; only its lower triangle is read.
pub(crate) fn tridiagonalize<T: FloatScalar>(a: &DenseMatrix<T>) -> Tridiagonal<T> {
    let n = a.nrows();
    debug_assert!(a.is_square() && n >= 1);

    let mut v = a.clone();
    let mut d: Vec<T> = v.row_slice(n - 1).to_vec();
    let mut e = vec![T::zero(); n];

    for i in (1..n).rev() {
        let mut scale = T::zero();
        let mut h = T::zero();
        for x in &d[..i] {
            scale = scale + x.abs();
        }

        if scale == T::zero() {
            e[i] = d[i - 1];
            for j in 0..i {
                d[j] = v[(i - 1, j)];
                v[(i, j)] = T::zero();
                v[(j, i)] = T::zero();
            }
        } else {
            // Householder vector.
            for x in &mut d[..i] {
                *x = *x / scale;
                h = h + *x * *x;
            }
            let mut f = d[i - 1];
            let mut g = h.sqrt();
            if f > T::zero() {
                g = -g;
            }
            e[i] = scale * g;
            h = h - f * g;
            d[i - 1] = f - g;
            for x in &mut e[..i] {
                *x = T::zero();
            }

            // Similarity transform of the leading i x i block.
            for j in 0..i {
                f = d[j];
                v[(j, i)] = f;
                g = e[j] + v[(j, j)] * f;
                for k in (j + 1)..i {
                    g = g + v[(k, j)] * d[k];
                    e[k] = e[k] + v[(k, j)] * f;
                }
                e[j] = g;
            }
            f = T::zero();
            for j in 0..i {
                e[j] = e[j] / h;
                f = f + e[j] * d[j];
            }
            let hh = f / (h + h);
            for j in 0..i {
                e[j] = e[j] - hh * d[j];
            }
            for j in 0..i {
                f = d[j];
                g = e[j];
                for k in j..i {
                    v[(k, j)] = v[(k, j)] - (f * e[k] + g * d[k]);
                }
                d[j] = v[(i - 1, j)];
                v[(i, j)] = T::zero();
            }
        }
        d[i] = h;
    }

    // Accumulate transformations.
    for i in 0..(n - 1) {
        v[(n - 1, i)] = v[(i, i)];
        v[(i, i)] = T::one();
        let h = d[i + 1];
        if h != T::zero() {
            for k in 0..=i {
                d[k] = v[(k, i + 1)] / h;
            }
            for j in 0..=i {
                let mut g = T::zero();
                for k in 0..=i {
                    g = g + v[(k, i + 1)] * v[(k, j)];
                }
                for k in 0..=i {
                    v[(k, j)] = v[(k, j)] - g * d[k];
                }
            }
        }
        for k in 0..=i {
            v[(k, i + 1)] = T::zero();
        }
    }
    for j in 0..n {
        d[j] = v[(n - 1, j)];
        v[(n - 1, j)] = T::zero();
    }
    v[(n - 1, n - 1)] = T::one();
    e[0] = T::zero();

    Tridiagonal { d, e, v }
}

/// Implicit-shift QL iteration on a symmetric tridiagonal matrix (EISPACK
/// `tql2`), accumulating the rotations into `tri.v`.
///
/// An off-diagonal entry is negligible once `|e[m]| <= eps·tst1`, where
/// `tst1` is the running maximum of `|d[l]| + |e[l]|`. Each eigenvalue may
/// take at most `max_iter` sweeps before `ConvergenceFailure` is returned.
pub(crate) fn tridiagonal_ql<T: FloatScalar>(
    mut tri: Tridiagonal<T>,
    max_iter: usize,
) -> Result<Tridiagonal<T>, LinalgError> {
    let Tridiagonal { d, e, v } = &mut tri;
    let n = d.len();

    for i in 1..n {
        e[i - 1] = e[i];
    }
    e[n - 1] = T::zero();

    let eps = T::epsilon();
    let mut f = T::zero();
    let mut tst1 = T::zero();

    for l in 0..n {
        tst1 = tst1.max(d[l].abs() + e[l].abs());
        let mut m = l;
        // e[n-1] is zero, so this stops at n-1 for finite input.
        while m + 1 < n && !(e[m].abs() <= eps * tst1) {
            m += 1;
        }

        if m > l {
            let mut iter = 0usize;
            loop {
                iter += 1;
                if iter > max_iter {
                    log::warn!(
                        target: crate::LOG_TARGET,
                        "tql2: eigenvalue {} of {} not converged after {} iterations",
                        l,
                        n,
                        max_iter
                    );
                    return Err(LinalgError::ConvergenceFailure { iterations: max_iter });
                }

                // Implicit shift.
                let mut g = d[l];
                let mut p = (d[l + 1] - g) / (two::<T>() * e[l]);
                let mut r = p.hypot(T::one());
                if p < T::zero() {
                    r = -r;
                }
                d[l] = e[l] / (p + r);
                d[l + 1] = e[l] * (p + r);
                let dl1 = d[l + 1];
                let mut h = g - d[l];
                for x in &mut d[(l + 2)..n] {
                    *x = *x - h;
                }
                f = f + h;

                // Implicit QL transformation.
                p = d[m];
                let mut c = T::one();
                let mut c2 = c;
                let mut c3 = c;
                let el1 = e[l + 1];
                let mut s = T::zero();
                let mut s2 = T::zero();
                for i in (l..m).rev() {
                    c3 = c2;
                    c2 = c;
                    s2 = s;
                    g = c * e[i];
                    h = c * p;
                    r = p.hypot(e[i]);
                    e[i + 1] = s * r;
                    s = e[i] / r;
                    c = p / r;
                    p = c * d[i] - s * g;
                    d[i + 1] = h + s * (c * g + s * d[i]);

                    for k in 0..n {
                        h = v[(k, i + 1)];
                        v[(k, i + 1)] = s * v[(k, i)] + c * h;
                        v[(k, i)] = c * v[(k, i)] - s * h;
                    }
                }
                p = -s * s2 * c3 * el1 * e[l] / dl1;
                e[l] = s * p;
                d[l] = c * p;

                if !(e[l].abs() > eps * tst1) {
                    break;
                }
            }
        }
        d[l] = d[l] + f;
        e[l] = T::zero();
    }

    Ok(tri)
}

/// Selection-sort the eigenvalues ascending, permuting the eigenvector
/// columns to match.
pub(crate) fn sort_ascending<T: FloatScalar>(mut tri: Tridiagonal<T>) -> Tridiagonal<T> {
    let n = tri.d.len();
    for i in 0..n.saturating_sub(1) {
        let mut k = i;
        let mut p = tri.d[i];
        for j in (i + 1)..n {
            if tri.d[j] < p {
                k = j;
                p = tri.d[j];
            }
        }
        if k != i {
            tri.d.swap(i, k);
            tri.v.swap_cols(i, k);
        }
    }
    tri
}

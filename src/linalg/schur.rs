use alloc::vec;
use alloc::vec::Vec;

use crate::dense::DenseMatrix;
use crate::linalg::hessenberg::Hessenberg;
use crate::linalg::{two, LinalgError};
use crate::traits::FloatScalar;

/// Real Schur form produced by [`francis_qr`].
///
/// `h` is quasi-upper-triangular with 1x1 and 2x2 diagonal blocks, `v` the
/// accumulated orthogonal transform. `d[i] + i·e[i]` are the eigenvalues;
/// a complex pair has `e[i] > 0` for the first and `e[i+1] < 0` for the
/// second member. `norm` is the entry-wise 1-norm of the Hessenberg input.
#[derive(Debug, Clone)]
pub(crate) struct RealSchur<T> {
    pub h: DenseMatrix<T>,
    pub v: DenseMatrix<T>,
    pub d: Vec<T>,
    pub e: Vec<T>,
    pub norm: T,
}

/// Complex scalar division `(xr + i·xi) / (yr + i·yi)` (Smith's method).
pub(crate) fn cdiv<T: FloatScalar>(xr: T, xi: T, yr: T, yi: T) -> (T, T) {
    if yr.abs() > yi.abs() {
        let r = yi / yr;
        let d = yr + r * yi;
        ((xr + r * xi) / d, (xi - r * xr) / d)
    } else {
        let r = yr / yi;
        let d = yi + r * yr;
        ((r * xr + xi) / d, (r * xi - xr) / d)
    }
}

/// Francis double-shift QR iteration on an upper Hessenberg matrix (the
/// iteration half of EISPACK `hqr2`).
///
/// Deflates one root or a 2x2 block at a time from the bottom. Ad hoc
/// exceptional shifts are applied after 10 and 30 steps without deflation.
/// More than `max_iter` steps without deflation gives `ConvergenceFailure`.
pub(crate) fn francis_qr<T: FloatScalar>(
    hess: Hessenberg<T>,
    max_iter: usize,
) -> Result<RealSchur<T>, LinalgError> {
    let Hessenberg { mut h, mut v } = hess;
    let nn = h.nrows();
    debug_assert!(nn >= 1);

    let mut d = vec![T::zero(); nn];
    let mut e = vec![T::zero(); nn];
    let eps = T::epsilon();
    let half = T::constant(0.5);

    let mut norm = T::zero();
    for i in 0..nn {
        for j in i.saturating_sub(1)..nn {
            norm = norm + h[(i, j)].abs();
        }
    }

    let mut n = nn - 1;
    let mut exshift = T::zero();
    let mut iter = 0usize;

    loop {
        // Look for a single small subdiagonal element.
        let mut l = n;
        while l > 0 {
            let mut s = h[(l - 1, l - 1)].abs() + h[(l, l)].abs();
            if s == T::zero() {
                s = norm;
            }
            if h[(l, l - 1)].abs() < eps * s {
                break;
            }
            l -= 1;
        }

        if l == n {
            // One root found.
            h[(n, n)] = h[(n, n)] + exshift;
            d[n] = h[(n, n)];
            e[n] = T::zero();
            iter = 0;
            if n == 0 {
                break;
            }
            n -= 1;
        } else if l + 1 == n {
            // Two roots found.
            let w = h[(n, n - 1)] * h[(n - 1, n)];
            let mut p = (h[(n - 1, n - 1)] - h[(n, n)]) * half;
            let mut q = p * p + w;
            let mut z = q.abs().sqrt();
            h[(n, n)] = h[(n, n)] + exshift;
            h[(n - 1, n - 1)] = h[(n - 1, n - 1)] + exshift;
            let x = h[(n, n)];

            if q >= T::zero() {
                // Real pair.
                z = if p >= T::zero() { p + z } else { p - z };
                d[n - 1] = x + z;
                d[n] = d[n - 1];
                if z != T::zero() {
                    d[n] = x - w / z;
                }
                e[n - 1] = T::zero();
                e[n] = T::zero();

                let x = h[(n, n - 1)];
                let s = x.abs() + z.abs();
                p = x / s;
                q = z / s;
                let r = (p * p + q * q).sqrt();
                p = p / r;
                q = q / r;

                for j in (n - 1)..nn {
                    let z = h[(n - 1, j)];
                    h[(n - 1, j)] = q * z + p * h[(n, j)];
                    h[(n, j)] = q * h[(n, j)] - p * z;
                }
                for i in 0..=n {
                    let z = h[(i, n - 1)];
                    h[(i, n - 1)] = q * z + p * h[(i, n)];
                    h[(i, n)] = q * h[(i, n)] - p * z;
                }
                for i in 0..nn {
                    let z = v[(i, n - 1)];
                    v[(i, n - 1)] = q * z + p * v[(i, n)];
                    v[(i, n)] = q * v[(i, n)] - p * z;
                }
            } else {
                // Complex pair.
                d[n - 1] = x + p;
                d[n] = x + p;
                e[n - 1] = z;
                e[n] = -z;
            }
            iter = 0;
            if n < 2 {
                break;
            }
            n -= 2;
        } else {
            // No convergence yet; form the shift.
            let mut x = h[(n, n)];
            let mut y = h[(n - 1, n - 1)];
            let mut w = h[(n, n - 1)] * h[(n - 1, n)];

            if iter == 10 {
                // Wilkinson's original ad hoc shift.
                exshift = exshift + x;
                for i in 0..=n {
                    h[(i, i)] = h[(i, i)] - x;
                }
                let s = h[(n, n - 1)].abs() + h[(n - 1, n - 2)].abs();
                x = T::constant(0.75) * s;
                y = x;
                w = T::constant(-0.4375) * s * s;
            }

            if iter == 30 {
                // MATLAB's ad hoc shift.
                let mut s = (y - x) * half;
                s = s * s + w;
                if s > T::zero() {
                    s = s.sqrt();
                    if y < x {
                        s = -s;
                    }
                    s = x - w / ((y - x) * half + s);
                    for i in 0..=n {
                        h[(i, i)] = h[(i, i)] - s;
                    }
                    exshift = exshift + s;
                    x = T::constant(0.964);
                    y = x;
                    w = x;
                }
            }

            iter += 1;
            if iter > max_iter {
                log::warn!(
                    target: crate::LOG_TARGET,
                    "hqr2: no deflation at row {} after {} iterations",
                    n,
                    max_iter
                );
                return Err(LinalgError::ConvergenceFailure { iterations: max_iter });
            }

            // Look for two consecutive small subdiagonal elements.
            let mut m = n - 2;
            let mut p;
            let mut q;
            let mut r;
            loop {
                let z = h[(m, m)];
                r = x - z;
                let s = y - z;
                p = (r * s - w) / h[(m + 1, m)] + h[(m, m + 1)];
                q = h[(m + 1, m + 1)] - z - r - s;
                r = h[(m + 2, m + 1)];
                let s = p.abs() + q.abs() + r.abs();
                p = p / s;
                q = q / s;
                r = r / s;
                if m == l {
                    break;
                }
                let lhs = h[(m, m - 1)].abs() * (q.abs() + r.abs());
                let rhs = eps * (p.abs() * (h[(m - 1, m - 1)].abs() + z.abs() + h[(m + 1, m + 1)].abs()));
                if lhs < rhs {
                    break;
                }
                m -= 1;
            }

            for i in (m + 2)..=n {
                h[(i, i - 2)] = T::zero();
                if i > m + 2 {
                    h[(i, i - 3)] = T::zero();
                }
            }

            // Double QR step on rows l..=n and columns m..=n.
            let mut k = m;
            while k < n {
                let notlast = k != n - 1;
                if k != m {
                    p = h[(k, k - 1)];
                    q = h[(k + 1, k - 1)];
                    r = if notlast { h[(k + 2, k - 1)] } else { T::zero() };
                    x = p.abs() + q.abs() + r.abs();
                    if x == T::zero() {
                        k += 1;
                        continue;
                    }
                    p = p / x;
                    q = q / x;
                    r = r / x;
                }

                let mut s = (p * p + q * q + r * r).sqrt();
                if p < T::zero() {
                    s = -s;
                }
                if s != T::zero() {
                    if k != m {
                        h[(k, k - 1)] = -s * x;
                    } else if l != m {
                        h[(k, k - 1)] = -h[(k, k - 1)];
                    }
                    p = p + s;
                    x = p / s;
                    y = q / s;
                    let z = r / s;
                    q = q / p;
                    r = r / p;

                    // Row modification.
                    for j in k..nn {
                        let mut p = h[(k, j)] + q * h[(k + 1, j)];
                        if notlast {
                            p = p + r * h[(k + 2, j)];
                            h[(k + 2, j)] = h[(k + 2, j)] - p * z;
                        }
                        h[(k, j)] = h[(k, j)] - p * x;
                        h[(k + 1, j)] = h[(k + 1, j)] - p * y;
                    }

                    // Column modification.
                    for i in 0..=n.min(k + 3) {
                        let mut p = x * h[(i, k)] + y * h[(i, k + 1)];
                        if notlast {
                            p = p + z * h[(i, k + 2)];
                            h[(i, k + 2)] = h[(i, k + 2)] - p * r;
                        }
                        h[(i, k)] = h[(i, k)] - p;
                        h[(i, k + 1)] = h[(i, k + 1)] - p * q;
                    }

                    // Accumulate transformations.
                    for i in 0..nn {
                        let mut p = x * v[(i, k)] + y * v[(i, k + 1)];
                        if notlast {
                            p = p + z * v[(i, k + 2)];
                            v[(i, k + 2)] = v[(i, k + 2)] - p * r;
                        }
                        v[(i, k)] = v[(i, k)] - p;
                        v[(i, k + 1)] = v[(i, k + 1)] - p * q;
                    }
                }
                k += 1;
            }
        }
    }

    Ok(RealSchur { h, v, d, e, norm })
}

/// Back-substitute the quasi-triangular Schur form to obtain the
/// eigenvectors of `h` in place. A zero `norm` leaves everything untouched.
pub(crate) fn back_substitute<T: FloatScalar>(mut schur: RealSchur<T>) -> RealSchur<T> {
    if schur.norm == T::zero() {
        return schur;
    }
    let norm = schur.norm;
    let RealSchur { h, d, e, .. } = &mut schur;
    let nn = h.nrows();
    let eps = T::epsilon();

    let (mut z, mut r, mut s) = (T::zero(), T::zero(), T::zero());

    for n in (0..nn).rev() {
        let p = d[n];
        let q = e[n];

        if q == T::zero() {
            // Real vector.
            let mut l = n;
            h[(n, n)] = T::one();
            for i in (0..n).rev() {
                let w = h[(i, i)] - p;
                r = T::zero();
                for j in l..=n {
                    r = r + h[(i, j)] * h[(j, n)];
                }
                if e[i] < T::zero() {
                    z = w;
                    s = r;
                    continue;
                }

                l = i;
                if e[i] == T::zero() {
                    h[(i, n)] = if w != T::zero() { -r / w } else { -r / (eps * norm) };
                } else {
                    // Solve the 2x2 real system.
                    let x = h[(i, i + 1)];
                    let y = h[(i + 1, i)];
                    let q = (d[i] - p) * (d[i] - p) + e[i] * e[i];
                    let t = (x * s - z * r) / q;
                    h[(i, n)] = t;
                    h[(i + 1, n)] = if x.abs() > z.abs() {
                        (-r - w * t) / x
                    } else {
                        (-s - y * t) / z
                    };
                }

                // Overflow control.
                let t = h[(i, n)].abs();
                if (eps * t) * t > T::one() {
                    for j in i..=n {
                        h[(j, n)] = h[(j, n)] / t;
                    }
                }
            }
        } else if q < T::zero() {
            // Complex vector; the last component is chosen imaginary so
            // the system is triangular.
            let mut l = n - 1;
            if h[(n, n - 1)].abs() > h[(n - 1, n)].abs() {
                h[(n - 1, n - 1)] = q / h[(n, n - 1)];
                h[(n - 1, n)] = -(h[(n, n)] - p) / h[(n, n - 1)];
            } else {
                let (cr, ci) = cdiv(T::zero(), -h[(n - 1, n)], h[(n - 1, n - 1)] - p, q);
                h[(n - 1, n - 1)] = cr;
                h[(n - 1, n)] = ci;
            }
            h[(n, n - 1)] = T::zero();
            h[(n, n)] = T::one();

            for i in (0..n - 1).rev() {
                let mut ra = T::zero();
                let mut sa = T::zero();
                for j in l..=n {
                    ra = ra + h[(i, j)] * h[(j, n - 1)];
                    sa = sa + h[(i, j)] * h[(j, n)];
                }
                let w = h[(i, i)] - p;

                if e[i] < T::zero() {
                    z = w;
                    r = ra;
                    s = sa;
                    continue;
                }

                l = i;
                if e[i] == T::zero() {
                    let (cr, ci) = cdiv(-ra, -sa, w, q);
                    h[(i, n - 1)] = cr;
                    h[(i, n)] = ci;
                } else {
                    // Solve the complex 2x2 system.
                    let x = h[(i, i + 1)];
                    let y = h[(i + 1, i)];
                    let mut vr = (d[i] - p) * (d[i] - p) + e[i] * e[i] - q * q;
                    let vi = (d[i] - p) * two::<T>() * q;
                    if vr == T::zero() && vi == T::zero() {
                        vr = eps * norm * (w.abs() + q.abs() + x.abs() + y.abs() + z.abs());
                    }
                    let (cr, ci) = cdiv(
                        x * r - z * ra + q * sa,
                        x * s - z * sa - q * ra,
                        vr,
                        vi,
                    );
                    h[(i, n - 1)] = cr;
                    h[(i, n)] = ci;
                    if x.abs() > z.abs() + q.abs() {
                        h[(i + 1, n - 1)] = (-ra - w * h[(i, n - 1)] + q * h[(i, n)]) / x;
                        h[(i + 1, n)] = (-sa - w * h[(i, n)] - q * h[(i, n - 1)]) / x;
                    } else {
                        let (cr, ci) = cdiv(-r - y * h[(i, n - 1)], -s - y * h[(i, n)], z, q);
                        h[(i + 1, n - 1)] = cr;
                        h[(i + 1, n)] = ci;
                    }
                }

                // Overflow control.
                let t = h[(i, n - 1)].abs().max(h[(i, n)].abs());
                if (eps * t) * t > T::one() {
                    for j in i..=n {
                        h[(j, n - 1)] = h[(j, n - 1)] / t;
                        h[(j, n)] = h[(j, n)] / t;
                    }
                }
            }
        }
    }

    schur
}

/// Multiply the Schur vectors by the back-substituted triangular vectors,
/// giving the eigenvectors of the original matrix. Returns `(V, d, e)`.
pub(crate) fn back_transform<T: FloatScalar>(
    schur: RealSchur<T>,
) -> (DenseMatrix<T>, Vec<T>, Vec<T>) {
    let RealSchur { h, mut v, d, e, norm } = schur;
    if norm == T::zero() {
        return (v, d, e);
    }
    let nn = h.nrows();
    for j in (0..nn).rev() {
        for i in 0..nn {
            let mut z = T::zero();
            for k in 0..=j {
                z = z + v[(i, k)] * h[(k, j)];
            }
            v[(i, j)] = z;
        }
    }
    (v, d, e)
}

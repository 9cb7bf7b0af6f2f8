use alloc::vec;

use crate::dense::DenseMatrix;
use crate::traits::FloatScalar;

/// Upper Hessenberg form `Vᵗ·A·V = H` of a square matrix.
#[derive(Debug, Clone)]
pub(crate) struct Hessenberg<T> {
    pub h: DenseMatrix<T>,
    pub v: DenseMatrix<T>,
}

/// Reduce a nonsymmetric matrix to upper Hessenberg form by orthogonal
/// similarity transforms (EISPACK `orthes`), accumulating them into `v`.
///
/// Each Householder vector is scaled by the 1-norm of the column segment it
/// annihilates. Entries of `h` below the first subdiagonal are exactly zero
/// on return.
pub(crate) fn reduce_to_hessenberg<T: FloatScalar>(a: &DenseMatrix<T>) -> Hessenberg<T> {
    let n = a.nrows();
    debug_assert!(a.is_square() && n >= 1);

    let mut h = a.clone();
    let mut ort = vec![T::zero(); n];
    let high = n - 1;

    for m in 1..high {
        let mut scale = T::zero();
        for i in m..=high {
            scale = scale + h[(i, m - 1)].abs();
        }
        if scale == T::zero() {
            continue;
        }

        let mut hh = T::zero();
        for i in (m..=high).rev() {
            ort[i] = h[(i, m - 1)] / scale;
            hh = hh + ort[i] * ort[i];
        }
        let mut g = hh.sqrt();
        if ort[m] > T::zero() {
            g = -g;
        }
        hh = hh - ort[m] * g;
        ort[m] = ort[m] - g;

        // H = (I - u·uᵗ/h) · H · (I - u·uᵗ/h)
        for j in m..n {
            let mut f = T::zero();
            for i in (m..=high).rev() {
                f = f + ort[i] * h[(i, j)];
            }
            f = f / hh;
            for i in m..=high {
                h[(i, j)] = h[(i, j)] - f * ort[i];
            }
        }
        for i in 0..=high {
            let mut f = T::zero();
            for j in (m..=high).rev() {
                f = f + ort[j] * h[(i, j)];
            }
            f = f / hh;
            for j in m..=high {
                h[(i, j)] = h[(i, j)] - f * ort[j];
            }
        }
        ort[m] = scale * ort[m];
        h[(m, m - 1)] = scale * g;
    }

    // Accumulate transformations. The Householder vectors still live below
    // the subdiagonal of `h` at this point.
    let mut v = DenseMatrix::identity(n, n);
    for m in (1..high).rev() {
        let sub = h[(m, m - 1)];
        if sub == T::zero() {
            continue;
        }
        for i in (m + 1)..=high {
            ort[i] = h[(i, m - 1)];
        }
        for j in m..=high {
            let mut g = T::zero();
            for i in m..=high {
                g = g + ort[i] * v[(i, j)];
            }
            // Double division avoids possible underflow.
            g = (g / ort[m]) / sub;
            for i in m..=high {
                v[(i, j)] = v[(i, j)] + g * ort[i];
            }
        }
    }

    for i in 2..n {
        for j in 0..(i - 1) {
            h[(i, j)] = T::zero();
        }
    }

    Hessenberg { h, v }
}

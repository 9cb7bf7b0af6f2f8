use alloc::vec;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::DenseMatrix;

// ── Checked element-wise arithmetic ─────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    fn ensure_same_shape(&self, rhs: &Self, op: &'static str) -> Result<(), LinalgError> {
        if self.shape() != rhs.shape() {
            return Err(LinalgError::DimensionMismatch {
                op,
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        Ok(())
    }

    fn zip_with(
        &self,
        rhs: &Self,
        op: &'static str,
        f: impl Fn(T, T) -> T,
    ) -> Result<Self, LinalgError> {
        self.ensure_same_shape(rhs, op)?;
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(DenseMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }

    fn zip_with_assign(
        &mut self,
        rhs: &Self,
        op: &'static str,
        f: impl Fn(T, T) -> T,
    ) -> Result<(), LinalgError> {
        self.ensure_same_shape(rhs, op)?;
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = f(*a, b);
        }
        Ok(())
    }

    /// `self + rhs`, or `DimensionMismatch` if the shapes differ.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let b = DenseMatrix::filled(2, 2, 1.0);
    /// let c = a.checked_add(&b).unwrap();
    /// assert_eq!(c[(1, 1)], 5.0);
    /// assert!(a.checked_add(&DenseMatrix::new(3, 2)).is_err());
    /// ```
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.zip_with(rhs, "add", |a, b| a + b)
    }

    /// `self - rhs`, or `DimensionMismatch` if the shapes differ.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.zip_with(rhs, "sub", |a, b| a - b)
    }

    /// `self += rhs` in place.
    pub fn checked_add_assign(&mut self, rhs: &Self) -> Result<(), LinalgError> {
        self.zip_with_assign(rhs, "add", |a, b| a + b)
    }

    /// `self -= rhs` in place.
    pub fn checked_sub_assign(&mut self, rhs: &Self) -> Result<(), LinalgError> {
        self.zip_with_assign(rhs, "sub", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product: `c[i][j] = a[i][j] * b[i][j]`.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let b = DenseMatrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
    /// let c = a.hadamard(&b).unwrap();
    /// assert_eq!(c[(0, 0)], 5.0);
    /// assert_eq!(c[(1, 1)], 32.0);
    /// ```
    pub fn hadamard(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.zip_with(rhs, "hadamard", |a, b| a * b)
    }

    /// In-place Hadamard product.
    pub fn hadamard_assign(&mut self, rhs: &Self) -> Result<(), LinalgError> {
        self.zip_with_assign(rhs, "hadamard", |a, b| a * b)
    }

    /// Element-wise right division: `c[i][j] = a[i][j] / b[i][j]`.
    pub fn checked_div_elementwise(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.zip_with(rhs, "div_elementwise", |a, b| a / b)
    }

    /// In-place element-wise right division.
    pub fn checked_div_elementwise_assign(&mut self, rhs: &Self) -> Result<(), LinalgError> {
        self.zip_with_assign(rhs, "div_elementwise", |a, b| a / b)
    }

    /// Element-wise left division: `c[i][j] = b[i][j] / a[i][j]`.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[2.0, 4.0]]).unwrap();
    /// let b = DenseMatrix::from_rows(&[[8.0, 2.0]]).unwrap();
    /// let c = a.checked_ldiv_elementwise(&b).unwrap();
    /// assert_eq!(c.row_slice(0), &[4.0, 0.5]);
    /// ```
    pub fn checked_ldiv_elementwise(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.zip_with(rhs, "ldiv_elementwise", |a, b| b / a)
    }

    /// In-place element-wise left division.
    pub fn checked_ldiv_elementwise_assign(&mut self, rhs: &Self) -> Result<(), LinalgError> {
        self.zip_with_assign(rhs, "ldiv_elementwise", |a, b| b / a)
    }

    /// Multiply every element by `s`.
    pub fn scale(&self, s: T) -> Self {
        self.map(|x| x * s)
    }

    /// Multiply every element by `s` in place.
    pub fn scale_assign(&mut self, s: T) {
        for x in self.data.iter_mut() {
            *x = *x * s;
        }
    }
}

// ── Matrix product ──────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Matrix product `self * rhs`, or `DimensionMismatch` if
    /// `self.ncols() != rhs.nrows()`.
    ///
    /// ```
    /// use densela::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let b = DenseMatrix::from_rows(&[[5.0], [6.0]]).unwrap();
    /// let c = a.checked_mul(&b).unwrap();
    /// assert_eq!(c[(0, 0)], 17.0);
    /// assert_eq!(c[(1, 0)], 39.0);
    /// ```
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::DimensionMismatch {
                op: "mul",
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        for i in 0..m {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                for j in 0..p {
                    data[i * p + j] = data[i * p + j] + a_ik * rhs.data[k * p + j];
                }
            }
        }
        Ok(DenseMatrix {
            data,
            nrows: m,
            ncols: p,
        })
    }
}

// ── Operator overloads ──────────────────────────────────────────────

macro_rules! impl_binop {
    ($Trait:ident, $method:ident, $checked:ident) => {
        impl<T: Scalar> $Trait<&DenseMatrix<T>> for &DenseMatrix<T> {
            type Output = DenseMatrix<T>;

            fn $method(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
                match self.$checked(rhs) {
                    Ok(m) => m,
                    Err(e) => panic!("{e}"),
                }
            }
        }

        impl<T: Scalar> $Trait for DenseMatrix<T> {
            type Output = DenseMatrix<T>;

            fn $method(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
                (&self).$method(&rhs)
            }
        }

        impl<T: Scalar> $Trait<&DenseMatrix<T>> for DenseMatrix<T> {
            type Output = DenseMatrix<T>;

            fn $method(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
                (&self).$method(rhs)
            }
        }

        impl<T: Scalar> $Trait<DenseMatrix<T>> for &DenseMatrix<T> {
            type Output = DenseMatrix<T>;

            fn $method(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
                self.$method(&rhs)
            }
        }
    };
}

impl_binop!(Add, add, checked_add);
impl_binop!(Sub, sub, checked_sub);
impl_binop!(Mul, mul, checked_mul);

macro_rules! impl_assign_op {
    ($Trait:ident, $method:ident, $checked:ident) => {
        impl<T: Scalar> $Trait<&DenseMatrix<T>> for DenseMatrix<T> {
            fn $method(&mut self, rhs: &DenseMatrix<T>) {
                if let Err(e) = self.$checked(rhs) {
                    panic!("{e}");
                }
            }
        }

        impl<T: Scalar> $Trait for DenseMatrix<T> {
            fn $method(&mut self, rhs: DenseMatrix<T>) {
                self.$method(&rhs);
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, checked_add_assign);
impl_assign_op!(SubAssign, sub_assign, checked_sub_assign);

// ── Scalar multiplication: matrix * scalar ──────────────────────────

impl<T: Scalar> Mul<T> for DenseMatrix<T> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self {
        self.scale_assign(rhs);
        self
    }
}

impl<T: Scalar> Mul<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: T) -> DenseMatrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> MulAssign<T> for DenseMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale_assign(rhs);
    }
}

// ── scalar * matrix (concrete impls) ────────────────────────────────

macro_rules! impl_scalar_mul_dense {
    ($($t:ty),*) => {
        $(
            impl Mul<DenseMatrix<$t>> for $t {
                type Output = DenseMatrix<$t>;
                fn mul(self, rhs: DenseMatrix<$t>) -> DenseMatrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&DenseMatrix<$t>> for $t {
                type Output = DenseMatrix<$t>;
                fn mul(self, rhs: &DenseMatrix<$t>) -> DenseMatrix<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul_dense!(f32, f64);

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar + Neg<Output = T>> Neg for DenseMatrix<T> {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn neg(self) -> DenseMatrix<T> {
        self.map(|x| -x)
    }
}

//! Element-wise arithmetic, broadcasting and matrix products.
//!
//! Every in-place operation mutates `self` and leaves its operands untouched.
//! Binary operations validate shapes first and never write partial results.
use crate::error::{MatrixError, Result};
use crate::math::matrix::{Array2, Element, Matrix};

/// How a vector lines up against a matrix in a broadcast.
enum Broadcast {
    /// `1 x cols` vector applied to every row.
    PerRow,
    /// `rows x 1` vector applied to every column.
    PerColumn,
}

impl<T: Element> Array2<T> {
    pub fn scale(&mut self, factor: T) {
        for v in self.data.iter_mut() {
            *v = *v * factor;
        }
    }

    pub fn add_scalar(&mut self, scalar: T) {
        for v in self.data.iter_mut() {
            *v = *v + scalar;
        }
    }

    /// `self += other`, shapes must be identical.
    pub fn add(&mut self, other: &Array2<T>) -> Result<()> {
        self.zip_apply("add", other, |a, b| a + b)
    }

    /// `self -= other`, shapes must be identical.
    pub fn sub(&mut self, other: &Array2<T>) -> Result<()> {
        self.zip_apply("sub", other, |a, b| a - b)
    }

    fn zip_apply<F>(&mut self, op: &'static str, other: &Array2<T>, f: F) -> Result<()>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape() != other.shape() {
            return Err(MatrixError::shape(op, self.shape(), other.shape()));
        }
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a = f(*a, b);
        }
        Ok(())
    }

    /// Add a row vector to every row, or a column vector to every column.
    pub fn vec_add(&mut self, vec: &Array2<T>) -> Result<()> {
        self.broadcast_apply("vec_add", vec, |a, b| a + b)
    }

    /// Subtract a row vector from every row, or a column vector from every column.
    pub fn vec_sub(&mut self, vec: &Array2<T>) -> Result<()> {
        self.broadcast_apply("vec_sub", vec, |a, b| a - b)
    }

    fn broadcast_kind(&self, op: &'static str, vec: &Array2<T>) -> Result<Broadcast> {
        if vec.is_row_vector() && vec.cols == self.cols {
            Ok(Broadcast::PerRow)
        } else if vec.is_column_vector() && vec.rows == self.rows {
            Ok(Broadcast::PerColumn)
        } else {
            Err(MatrixError::shape(op, self.shape(), vec.shape()))
        }
    }

    fn broadcast_apply<F>(&mut self, op: &'static str, vec: &Array2<T>, f: F) -> Result<()>
    where
        F: Fn(T, T) -> T,
    {
        let kind = self.broadcast_kind(op, vec)?;
        let cols = self.cols;
        for (offset, value) in self.data.iter_mut().enumerate() {
            let operand = match kind {
                Broadcast::PerRow => vec.data[offset % cols],
                Broadcast::PerColumn => vec.data[offset / cols],
            };
            *value = f(*value, operand);
        }
        Ok(())
    }

    /// Logical shape of `self` once the transpose flag is applied.
    fn logical_shape(&self, transpose: bool) -> (usize, usize) {
        if transpose {
            (self.cols, self.rows)
        } else {
            (self.rows, self.cols)
        }
    }

    /// (row stride, column stride) of the logical view.
    fn strides(&self, transpose: bool) -> (usize, usize) {
        if transpose {
            (1, self.cols)
        } else {
            (self.cols, 1)
        }
    }

    /// Matrix product `op(self) * op(other)`, allocating the result.
    ///
    /// Transposition is logical: the operand is walked with swapped strides
    /// and never materialized.
    pub fn matmul(
        &self,
        transpose_a: bool,
        other: &Array2<T>,
        transpose_b: bool,
    ) -> Result<Array2<T>> {
        let (m, _) = self.logical_shape(transpose_a);
        let (_, n) = other.logical_shape(transpose_b);
        let mut out = Array2::create(m, n)?;
        self.matmul_into(transpose_a, other, transpose_b, &mut out)?;
        Ok(out)
    }

    /// Matrix product written into a pre-shaped `dst` of shape `(m, n)`.
    pub fn matmul_into(
        &self,
        transpose_a: bool,
        other: &Array2<T>,
        transpose_b: bool,
        dst: &mut Array2<T>,
    ) -> Result<()> {
        let (m, k) = self.logical_shape(transpose_a);
        let (k_other, n) = other.logical_shape(transpose_b);
        if k != k_other {
            return Err(MatrixError::shape("matmul", (m, k), (k_other, n)));
        }
        if dst.shape() != (m, n) {
            return Err(MatrixError::shape("matmul_into", dst.shape(), (m, n)));
        }

        let (a_rs, a_cs) = self.strides(transpose_a);
        let (b_rs, b_cs) = other.strides(transpose_b);
        for i in 0..m {
            for j in 0..n {
                let mut acc = T::zero();
                for p in 0..k {
                    acc = acc + self.data[i * a_rs + p * a_cs] * other.data[p * b_rs + j * b_cs];
                }
                dst.data[i * n + j] = acc;
            }
        }
        Ok(())
    }
}

impl Matrix {
    /// Frobenius norm.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn abs_sum(&self) -> f64 {
        self.data.iter().map(|v| v.abs()).sum()
    }
}

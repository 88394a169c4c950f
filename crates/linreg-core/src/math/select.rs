//! Index ranges, tiling and gather.
use crate::error::{MatrixError, Result};
use crate::math::matrix::{Array2, Axis, Element, IndexMatrix};

fn checked_index(index: i64, bound: usize) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < bound)
        .ok_or(MatrixError::IndexOutOfBounds { index, bound })
}

impl<T: Element> Array2<T> {
    /// Arithmetic sequence `low, low + step, ...` strictly below `high`.
    ///
    /// `Axis::Rows` lays the sequence down a column vector (`n x 1`),
    /// `Axis::Cols` across a row vector (`1 x n`). The length is fixed up
    /// front, so bounds near the limits of `T` never overflow.
    pub fn range(low: T, high: T, step: T, axis: Axis) -> Result<Self> {
        if !(step > T::zero()) {
            return Err(MatrixError::invalid(format!(
                "range step must be positive, got {}",
                step
            )));
        }
        let len = T::range_len(low, high, step).ok_or_else(|| {
            MatrixError::invalid(format!(
                "range [{}, {}) with step {} has no representable length",
                low, high, step
            ))
        })?;

        let shape = match axis {
            Axis::Rows => (len, 1),
            Axis::Cols => (1, len),
        };
        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|_| MatrixError::Allocation {
                rows: shape.0,
                cols: shape.1,
            })?;
        values.extend((0..len).map(|n| T::range_term(low, step, n)));

        Self::from_shape_vec(shape, values)
    }

    /// Tile `self` `repeats` times, stacked vertically (`Axis::Rows`) or
    /// side by side (`Axis::Cols`).
    pub fn repeat(&self, axis: Axis, repeats: usize) -> Array2<T> {
        match axis {
            Axis::Rows => {
                let mut data = Vec::with_capacity(self.data.len() * repeats);
                for _ in 0..repeats {
                    data.extend_from_slice(&self.data);
                }
                Array2 {
                    data,
                    rows: self.rows * repeats,
                    cols: self.cols,
                }
            }
            Axis::Cols => {
                let mut data = Vec::with_capacity(self.data.len() * repeats);
                for row in 0..self.rows {
                    for _ in 0..repeats {
                        data.extend_from_slice(self.row_slice(row));
                    }
                }
                Array2 {
                    data,
                    rows: self.rows,
                    cols: self.cols * repeats,
                }
            }
        }
    }

    /// Copy the rows (`Axis::Rows`) or columns (`Axis::Cols`) named by
    /// `indices` into `to`, in index order.
    ///
    /// `indices` is read in row-major order whatever its shape. `to` must be
    /// `(indices.len(), cols)` for a row gather and `(rows, indices.len())`
    /// for a column gather. All indices are checked before anything is
    /// written.
    pub fn gather(&self, to: &mut Array2<T>, indices: &IndexMatrix, axis: Axis) -> Result<()> {
        let n = indices.len();
        let (expected, bound) = match axis {
            Axis::Rows => ((n, self.cols), self.rows),
            Axis::Cols => ((self.rows, n), self.cols),
        };
        if to.shape() != expected {
            return Err(MatrixError::shape("gather", to.shape(), expected));
        }
        for &index in indices.as_slice() {
            checked_index(index, bound)?;
        }

        match axis {
            Axis::Rows => {
                let cols = self.cols;
                for (k, &index) in indices.as_slice().iter().enumerate() {
                    let row = index as usize;
                    to.data[k * cols..(k + 1) * cols].copy_from_slice(self.row_slice(row));
                }
            }
            Axis::Cols => {
                for (k, &index) in indices.as_slice().iter().enumerate() {
                    let col = index as usize;
                    for row in 0..self.rows {
                        to.data[row * n + k] = self.data[row * self.cols + col];
                    }
                }
            }
        }
        Ok(())
    }

    /// Allocating form of [`Array2::gather`].
    pub fn select(&self, indices: &IndexMatrix, axis: Axis) -> Result<Array2<T>> {
        let (rows, cols) = match axis {
            Axis::Rows => (indices.len(), self.cols),
            Axis::Cols => (self.rows, indices.len()),
        };
        let mut out = Array2::create(rows, cols)?;
        self.gather(&mut out, indices, axis)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Matrix;

    #[test]
    fn integer_range_as_column_and_row() {
        let col = IndexMatrix::range(2, 7, 2, Axis::Rows).unwrap();
        assert_eq!(col.shape(), (3, 1));
        assert_eq!(col.as_slice(), &[2, 4, 6]);

        let row = IndexMatrix::range(0, 3, 1, Axis::Cols).unwrap();
        assert_eq!(row.shape(), (1, 3));
    }

    #[test]
    fn float_range_excludes_high() {
        let r = Matrix::range(0.0, 1.0, 0.25, Axis::Rows).unwrap();
        assert_eq!(r.as_slice(), &[0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn range_rejects_non_positive_step_and_allows_empty() {
        assert!(IndexMatrix::range(0, 10, 0, Axis::Rows).is_err());
        assert!(Matrix::range(0.0, 1.0, -0.5, Axis::Rows).is_err());
        let empty = IndexMatrix::range(5, 5, 1, Axis::Rows).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn range_near_integer_limits_does_not_overflow() {
        let last = IndexMatrix::range(i64::MAX - 1, i64::MAX, 5, Axis::Rows).unwrap();
        assert_eq!(last.as_slice(), &[i64::MAX - 1]);

        let wide = IndexMatrix::range(i64::MIN, i64::MAX, i64::MAX, Axis::Cols).unwrap();
        assert_eq!(wide.as_slice(), &[i64::MIN, -1, i64::MAX - 1]);
    }

    #[test]
    fn float_range_length_is_exact_for_large_bounds() {
        let r = Matrix::range(1e17, 1e17 + 64.0, 1.0, Axis::Rows).unwrap();
        assert_eq!(r.shape(), (64, 1));
        assert!(Matrix::range(0.0, f64::INFINITY, 1.0, Axis::Rows).is_err());
        assert!(Matrix::range(f64::NAN, 1.0, 1.0, Axis::Rows).is_err());
    }

    #[test]
    fn repeat_tiles_along_axis() {
        let v = IndexMatrix::from_shape_vec((1, 2), vec![1, 2]).unwrap();
        let down = v.repeat(Axis::Rows, 3);
        assert_eq!(down.shape(), (3, 2));
        assert_eq!(down.as_slice(), &[1, 2, 1, 2, 1, 2]);

        let c = IndexMatrix::from_shape_vec((2, 1), vec![1, 2]).unwrap();
        let across = c.repeat(Axis::Cols, 2);
        assert_eq!(across.shape(), (2, 2));
        assert_eq!(across.as_slice(), &[1, 1, 2, 2]);
    }

    #[test]
    fn gather_columns_preserves_index_order() {
        let a = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let idx = IndexMatrix::from_shape_vec((1, 2), vec![2, 0]).unwrap();
        let picked = a.select(&idx, Axis::Cols).unwrap();
        assert_eq!(picked.shape(), (2, 2));
        assert_eq!(picked.as_slice(), &[3.0, 1.0, 6.0, 4.0]);
    }

    #[test]
    fn gather_checks_bounds_before_writing() {
        let a = Matrix::from_shape_vec((3, 1), vec![1.0, 2.0, 3.0]).unwrap();
        let mut to = Matrix::zeros(2, 1);
        let idx = IndexMatrix::from_shape_vec((2, 1), vec![0, 3]).unwrap();
        assert_eq!(
            a.gather(&mut to, &idx, Axis::Rows),
            Err(MatrixError::IndexOutOfBounds { index: 3, bound: 3 })
        );
        assert_eq!(to.as_slice(), &[0.0, 0.0]);

        let negative = IndexMatrix::from_shape_vec((2, 1), vec![-1, 0]).unwrap();
        assert!(a.gather(&mut to, &negative, Axis::Rows).is_err());
    }
}

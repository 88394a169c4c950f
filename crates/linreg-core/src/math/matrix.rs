use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::{Num, NumCast};

use crate::error::{MatrixError, Result};

/// Numeric element stored in an [`Array2`].
pub trait Element:
    Copy + PartialOrd + fmt::Debug + fmt::Display + Num + NumCast + Send + Sync + 'static
{
    /// Number of terms of `low, low + step, ...` strictly below `high`, for a
    /// positive `step`. `None` when the count is not representable.
    fn range_len(low: Self, high: Self, step: Self) -> Option<usize>;

    /// Term `n` of that sequence, `low + n * step`.
    ///
    /// Only called with `n < range_len(..)`, so the term lies in `[low, high)`.
    fn range_term(low: Self, step: Self, n: usize) -> Self;
}

macro_rules! int_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            fn range_len(low: Self, high: Self, step: Self) -> Option<usize> {
                if low >= high {
                    return Some(0);
                }
                let span = high as i128 - low as i128;
                let step = step as i128;
                usize::try_from((span + step - 1) / step).ok()
            }

            fn range_term(low: Self, step: Self, n: usize) -> Self {
                (low as i128 + step as i128 * n as i128) as $t
            }
        }
    )*};
}

macro_rules! float_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            fn range_len(low: Self, high: Self, step: Self) -> Option<usize> {
                if !(low.is_finite() && high.is_finite() && step.is_finite()) {
                    return None;
                }
                if low >= high {
                    return Some(0);
                }
                let n = ((high - low) / step).ceil();
                if n.is_finite() && n < usize::MAX as $t {
                    Some(n as usize)
                } else {
                    None
                }
            }

            fn range_term(low: Self, step: Self, n: usize) -> Self {
                low + step * n as $t
            }
        }
    )*};
}

int_element!(i32, i64, isize, u32, u64, usize);
float_element!(f32, f64);

/// Axis selector for reductions, broadcasts, ranges and gathers.
///
/// `Axis::Rows` walks down the rows (row selection, column vectors, column-wise
/// reductions); `Axis::Cols` walks across the columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

/// Dense, row-major, two-dimensional buffer.
///
/// Element `(i, j)` lives at offset `i * cols + j` and `data.len()` always
/// equals `rows * cols`. A matrix with zero rows or zero columns is a valid
/// empty matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    pub(crate) data: Vec<T>,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
}

/// Real-valued matrix.
pub type Matrix = Array2<f64>;

/// Integer matrix, mostly used as a list of row/column coordinates.
pub type IndexMatrix = Array2<i64>;

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self> {
        let (rows, cols) = shape;
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::InvalidBuffer {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        Self::from_shape_vec((rows, cols), data)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_row_vector(&self) -> bool {
        self.rows == 1
    }

    pub fn is_column_vector(&self) -> bool {
        self.cols == 1
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T: Element> Array2<T> {
    /// Allocate a zero-initialized `rows x cols` matrix.
    ///
    /// Reports [`MatrixError::Allocation`] instead of aborting when the
    /// element count overflows or the allocator refuses the reservation.
    pub fn create(rows: usize, cols: usize) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .ok_or(MatrixError::Allocation { rows, cols })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::Allocation { rows, cols })?;
        data.resize(len, T::zero());
        Ok(Self { data, rows, cols })
    }

    /// # Panics
    ///
    /// When `rows * cols` overflows `usize`. [`Array2::create`] is the
    /// fallible form.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, T::zero())
    }

    /// # Panics
    ///
    /// When `rows * cols` overflows `usize`.
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Self {
        let len = match rows.checked_mul(cols) {
            Some(len) => len,
            None => panic!("matrix of {} x {} elements overflows usize", rows, cols),
        };
        Self {
            data: vec![value; len],
            rows,
            cols,
        }
    }

    /// Deep copy into an existing matrix of the same shape.
    pub fn copy_into(&self, dst: &mut Array2<T>) -> Result<()> {
        if self.shape() != dst.shape() {
            return Err(MatrixError::shape("copy_into", self.shape(), dst.shape()));
        }
        dst.data.copy_from_slice(&self.data);
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        for v in self.data.iter_mut() {
            *v = value;
        }
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Array2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, ",\n ")?;
            }
            write!(f, "[")?;
            for (idx, value) in self.row_slice(row).iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_is_zeroed_and_shaped() {
        let m = Matrix::create(3, 4).unwrap();
        assert_eq!(m.shape(), (3, 4));
        assert_eq!(m.len(), 12);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn create_reports_overflow_as_allocation_error() {
        let err = Matrix::create(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Allocation {
                rows: usize::MAX,
                cols: 2
            }
        );
    }

    #[test]
    fn empty_matrix_is_valid() {
        let m = IndexMatrix::create(0, 5).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.shape(), (0, 5));
    }

    #[test]
    fn copy_into_requires_matching_shape() {
        let src = Matrix::from_elem(2, 2, 1.5);
        let mut dst = Matrix::zeros(2, 2);
        src.copy_into(&mut dst).unwrap();
        assert_eq!(dst, src);

        let mut wrong = Matrix::zeros(2, 3);
        assert!(matches!(
            src.copy_into(&mut wrong),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn from_elem_panics_on_size_overflow() {
        let _ = Matrix::from_elem(usize::MAX, 2, 1.0);
    }

    #[test]
    fn display_prints_rows() {
        let m = IndexMatrix::from_shape_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.to_string(), "[[1, 2],\n [3, 4]]");
    }
}

use std::error::Error;
use std::fmt;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors raised by the matrix engine and everything built on it.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Operand dimensions violate the operation's contract.
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// A buffer of `len` elements cannot back a `rows x cols` matrix.
    InvalidBuffer { rows: usize, cols: usize, len: usize },
    /// A gather index fell outside `0..bound`.
    IndexOutOfBounds { index: i64, bound: usize },
    /// The backing buffer could not be allocated.
    Allocation { rows: usize, cols: usize },
    /// A numeric argument is outside its valid domain.
    InvalidParameter(String),
}

impl MatrixError {
    pub(crate) fn shape(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        MatrixError::ShapeMismatch { op, lhs, rhs }
    }

    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        MatrixError::InvalidParameter(msg.into())
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::ShapeMismatch { op, lhs, rhs } => write!(
                f,
                "{}: incompatible shapes ({}, {}) and ({}, {})",
                op, lhs.0, lhs.1, rhs.0, rhs.1
            ),
            MatrixError::InvalidBuffer { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            MatrixError::IndexOutOfBounds { index, bound } => {
                write!(f, "index {} out of bounds for dimension of size {}", index, bound)
            }
            MatrixError::Allocation { rows, cols } => {
                write!(f, "failed to allocate a ({}, {}) matrix", rows, cols)
            }
            MatrixError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl Error for MatrixError {}

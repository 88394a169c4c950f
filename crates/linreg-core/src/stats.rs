//! Mean reductions and regression metrics.
use crate::error::{MatrixError, Result};
use crate::math::{Axis, Matrix};

/// Arithmetic mean of a matrix.
///
/// * `Some(Axis::Rows)` reduces down the rows: one mean per column, `1 x cols`.
/// * `Some(Axis::Cols)` reduces across the columns: one mean per row, `rows x 1`.
/// * `None` reduces everything to a `1 x 1` matrix.
///
/// Reducing over zero elements yields NaN.
pub fn mean(mat: &Matrix, axis: Option<Axis>) -> Matrix {
    let (rows, cols) = mat.shape();
    match axis {
        Some(Axis::Rows) => {
            let mut out = Matrix::zeros(1, cols);
            for row in 0..rows {
                for (acc, v) in out.as_mut_slice().iter_mut().zip(mat.row_slice(row)) {
                    *acc += v;
                }
            }
            out.scale(1.0 / rows as f64);
            out
        }
        Some(Axis::Cols) => {
            let mut out = Matrix::zeros(rows, 1);
            for (row, acc) in out.as_mut_slice().iter_mut().enumerate() {
                *acc = mat.row_slice(row).iter().sum::<f64>() / cols as f64;
            }
            out
        }
        None => Matrix::from_elem(1, 1, mean_all(mat)),
    }
}

/// Mean over every element.
pub fn mean_all(mat: &Matrix) -> f64 {
    mat.as_slice().iter().sum::<f64>() / mat.len() as f64
}

fn check_targets(op: &'static str, y_true: &Matrix, y_pred: &Matrix) -> Result<()> {
    if !y_true.is_column_vector() || y_true.shape() != y_pred.shape() {
        return Err(MatrixError::shape(op, y_true.shape(), y_pred.shape()));
    }
    Ok(())
}

/// Residual `y_true - y_pred` after the column-vector check.
fn residual(op: &'static str, y_true: &Matrix, y_pred: &Matrix) -> Result<Matrix> {
    check_targets(op, y_true, y_pred)?;
    let mut diff = y_true.clone();
    diff.sub(y_pred)?;
    Ok(diff)
}

/// Mean squared error. Zero for empty operands.
pub fn mse(y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
    let diff = residual("mse", y_true, y_pred)?;
    if diff.is_empty() {
        return Ok(0.0);
    }
    let norm = diff.norm();
    Ok(norm * norm / y_true.nrows() as f64)
}

/// Mean absolute error. Zero for empty operands.
pub fn mae(y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
    let diff = residual("mae", y_true, y_pred)?;
    if diff.is_empty() {
        return Ok(0.0);
    }
    Ok(diff.abs_sum() / y_true.len() as f64)
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// A constant `y_true` has no variance; the division is left unguarded and
/// the result is NaN or infinite.
pub fn r2(y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
    let diff = residual("r2", y_true, y_pred)?;
    let ss_res = diff.norm().powi(2);

    let mut spread = y_true.clone();
    spread.add_scalar(-mean_all(y_true));
    let ss_tot = spread.norm().powi(2);

    Ok(1.0 - ss_res / ss_tot)
}

//! Mean-centering used to separate the intercept from the coefficients.
//!
//! Subtracting the column means of `x` and the mean of `y` turns
//! `y = x theta + b` into the intercept-free problem `y_c = x_c theta`.
//! Once `theta` is known the intercept is recovered as
//! `b = mean(y) - mean(x) theta`.

use crate::error::{MatrixError, Result};
use crate::math::{Axis, Matrix};
use crate::stats;

/// Offsets fitted on a feature matrix and its targets.
#[derive(Clone, Debug)]
pub struct Centering {
    /// Column means of `x`, `1 x features`.
    pub x_offset: Matrix,
    /// Mean of `y`, `1 x 1`.
    pub y_offset: Matrix,
}

/// Fit a `Centering` from `x` (`rows x features`) and `y` (`rows x 1`).
pub fn fit_centering(x: &Matrix, y: &Matrix) -> Result<Centering> {
    if !y.is_column_vector() || y.nrows() != x.nrows() {
        return Err(MatrixError::shape("fit_centering", x.shape(), y.shape()));
    }
    if x.nrows() == 0 {
        return Err(MatrixError::invalid("cannot center an empty dataset"));
    }

    Ok(Centering {
        x_offset: stats::mean(x, Some(Axis::Rows)),
        y_offset: stats::mean(y, Some(Axis::Rows)),
    })
}

impl Centering {
    /// Centered copies of `x` and `y`; the inputs are left untouched.
    pub fn transform(&self, x: &Matrix, y: &Matrix) -> Result<(Matrix, Matrix)> {
        let mut x_centered = x.clone();
        let mut y_centered = y.clone();
        x_centered.vec_sub(&self.x_offset)?;
        y_centered.vec_sub(&self.y_offset)?;
        Ok((x_centered, y_centered))
    }

    /// Intercept implied by `theta`: `mean(y) - mean(x) theta`.
    pub fn recover_bias(&self, theta: &Matrix) -> Result<f64> {
        let x_offset_theta = self.x_offset.matmul(false, theta, false)?;
        let mut bias = self.y_offset.clone();
        bias.sub(&x_offset_theta)?;
        Ok(stats::mean_all(&bias))
    }
}

/// Fit the offsets and return them with the centered copies in one call.
pub fn fit_transform(x: &Matrix, y: &Matrix) -> Result<(Centering, Matrix, Matrix)> {
    let centering = fit_centering(x, y)?;
    let (x_centered, y_centered) = centering.transform(x, y)?;
    Ok((centering, x_centered, y_centered))
}

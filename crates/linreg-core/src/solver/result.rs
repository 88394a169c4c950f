use crate::error::Result;
use crate::math::Matrix;

use super::LOSS_INTERVAL;

/// Fitted parameters and the trace of a solver run.
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Whether the loss dropped below the tolerance before the cap.
    pub converged: bool,
    /// Coefficients, `features x 1`.
    pub theta: Matrix,
    /// Intercept.
    pub bias: f64,
    /// Iterations performed: the converging iteration, or the cap.
    pub n_iter: usize,
    /// Loss recorded every `LOSS_INTERVAL` iterations.
    pub losses: Vec<f64>,
}

impl SolverResult {
    /// `x theta + bias` for `x` with `features` columns.
    pub fn predict(&self, x: &Matrix) -> Result<Matrix> {
        let mut y_pred = x.matmul(false, &self.theta, false)?;
        y_pred.add_scalar(self.bias);
        Ok(y_pred)
    }

    /// Iteration numbers matching each entry of `losses`.
    pub fn loss_iterations(&self) -> Vec<usize> {
        (1..=self.losses.len()).map(|k| k * LOSS_INTERVAL).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_applies_theta_and_bias() {
        let result = SolverResult {
            converged: true,
            theta: Matrix::from_shape_vec((2, 1), vec![2.0, -1.0]).unwrap(),
            bias: 0.5,
            n_iter: 1,
            losses: vec![3.0, 2.0],
        };
        let x = Matrix::from_shape_vec((2, 2), vec![1.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(result.predict(&x).unwrap().as_slice(), &[1.5, 4.5]);
        assert_eq!(result.loss_iterations(), vec![100, 200]);
    }
}

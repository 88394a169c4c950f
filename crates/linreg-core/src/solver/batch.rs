use crate::config::SolverConfig;
use crate::error::{MatrixError, Result};
use crate::losses::LossFunction;
use crate::math::Matrix;
use crate::preprocessing;

use super::{descend, BatchSource, DescentParams, Solver, SolverResult};

/// Full-batch gradient descent: every step uses all rows.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    pub params: DescentParams,
}

impl GradientDescent {
    pub fn new(learning_rate: f64, n_iter: usize, tol: f64, seed: u64) -> Self {
        Self {
            params: DescentParams {
                learning_rate,
                n_iter,
                tol,
                seed,
            },
        }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.learning_rate, config.n_iter, config.tol, config.seed)
    }
}

struct FullBatch<'a> {
    x: &'a Matrix,
    y: &'a Matrix,
}

impl BatchSource for FullBatch<'_> {
    fn batch_rows(&self) -> usize {
        self.x.nrows()
    }

    fn next_batch(&mut self) -> Result<(&Matrix, &Matrix)> {
        Ok((self.x, self.y))
    }
}

/// Rejects hyper-parameters no solver can run with.
pub(crate) fn validate_params(params: &DescentParams) -> Result<()> {
    if !params.learning_rate.is_finite() || params.learning_rate <= 0.0 {
        return Err(MatrixError::invalid(format!(
            "learning rate must be positive, got {}",
            params.learning_rate
        )));
    }
    if params.tol.is_nan() {
        return Err(MatrixError::invalid("tolerance must not be NaN"));
    }
    Ok(())
}

impl Solver for GradientDescent {
    fn solve(&self, x: &Matrix, y: &Matrix, loss_fn: &dyn LossFunction) -> Result<SolverResult> {
        validate_params(&self.params)?;
        let (centering, x_centered, y_centered) = preprocessing::fit_transform(x, y)?;

        let mut theta = Matrix::create(x.ncols(), 1)?;
        theta.fill_random_uniform(self.params.seed);

        log::debug!(
            "{}: {} rows, {} features, lr = {}, n_iter = {}, tol = {}, loss = {}",
            self.name(),
            x.nrows(),
            x.ncols(),
            self.params.learning_rate,
            self.params.n_iter,
            self.params.tol,
            loss_fn.name()
        );

        let mut source = FullBatch {
            x: &x_centered,
            y: &y_centered,
        };
        let descent = descend(&mut source, &mut theta, loss_fn, &self.params, self.name())?;
        let bias = centering.recover_bias(&theta)?;

        Ok(SolverResult {
            converged: descent.converged,
            theta,
            bias,
            n_iter: descent.iterations,
            losses: descent.losses,
        })
    }

    fn name(&self) -> &str {
        "gradient_descent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::losses::L2Loss;

    #[test]
    fn zero_iterations_returns_the_initial_guess() {
        let x = Matrix::from_shape_vec((3, 1), vec![1.0, 2.0, 3.0]).unwrap();
        let y = Matrix::from_shape_vec((3, 1), vec![2.0, 4.0, 6.0]).unwrap();
        let result = GradientDescent::new(0.1, 0, 1e-9, 3)
            .solve(&x, &y, &L2Loss)
            .unwrap();

        let mut expected = Matrix::zeros(1, 1);
        expected.fill_random_uniform(3);
        assert!(!result.converged);
        assert_eq!(result.n_iter, 0);
        assert!(result.losses.is_empty());
        assert_eq!(result.theta, expected);
    }

    #[test]
    fn rejects_non_positive_learning_rate() {
        let x = Matrix::zeros(2, 1);
        let y = Matrix::zeros(2, 1);
        let err = GradientDescent::new(0.0, 10, 1e-3, 0)
            .solve(&x, &y, &L2Loss)
            .unwrap_err();
        assert!(matches!(err, MatrixError::InvalidParameter(_)));
    }
}

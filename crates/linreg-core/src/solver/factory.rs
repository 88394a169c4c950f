use crate::config::{SolverConfig, SolverType};
use crate::error::Result;
use crate::losses::build_loss;
use crate::math::Matrix;

use super::{GradientDescent, MiniBatchSgd, Solver, SolverResult};

/// Build a boxed solver from a `SolverConfig`.
pub fn build_solver(config: &SolverConfig) -> Box<dyn Solver> {
    match config.solver {
        SolverType::GradientDescent => Box::new(GradientDescent::from_config(config)),
        SolverType::MiniBatch { batch_size } => {
            Box::new(MiniBatchSgd::from_config(config, batch_size))
        }
    }
}

/// Build the configured solver and loss, then fit `x` and `y`.
pub fn fit(config: &SolverConfig, x: &Matrix, y: &Matrix) -> Result<SolverResult> {
    let loss_fn = build_loss(&config.loss)?;
    build_solver(config).solve(x, y, loss_fn.as_ref())
}

//! Gradient-descent solvers for centered linear regression.
//!
//! Both solvers share the same iteration: forward pass, loss, convergence
//! check, periodic loss recording, backward pass. They differ only in which
//! rows feed each step, which is abstracted by [`BatchSource`].
pub mod batch;
pub mod factory;
pub mod minibatch;
pub mod result;

pub use batch::GradientDescent;
pub use factory::{build_solver, fit};
pub use minibatch::MiniBatchSgd;
pub use result::SolverResult;

use crate::error::Result;
use crate::losses::LossFunction;
use crate::math::Matrix;

/// Iteration interval at which the loss is recorded.
pub const LOSS_INTERVAL: usize = 100;

/// A solver fitting `theta` and the intercept of `y = x theta + b`.
pub trait Solver: Send + Sync {
    /// Fit on `x` (`rows x features`) and `y` (`rows x 1`).
    ///
    /// The inputs are never mutated; all working buffers are owned by the call.
    fn solve(&self, x: &Matrix, y: &Matrix, loss_fn: &dyn LossFunction) -> Result<SolverResult>;

    fn name(&self) -> &str {
        "solver"
    }
}

/// Step parameters shared by every solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentParams {
    pub learning_rate: f64,
    pub n_iter: usize,
    pub tol: f64,
    pub seed: u64,
}

/// Forward pass, `y_pred = x theta`, written into a pre-shaped buffer.
pub fn forward(x: &Matrix, theta: &Matrix, y_pred: &mut Matrix) -> Result<()> {
    x.matmul_into(false, theta, false, y_pred)
}

/// Backward pass, `theta -= 2 * eta / n * gradient(x, y, theta)`.
pub fn backward(
    x: &Matrix,
    y: &Matrix,
    theta: &mut Matrix,
    eta: f64,
    loss_fn: &dyn LossFunction,
) -> Result<()> {
    let mut grad = loss_fn.gradient(x, y, theta)?;
    grad.scale(2.0 * eta / y.nrows() as f64);
    theta.sub(&grad)
}

/// Supplies the `(x, y)` pair used by one step.
pub(crate) trait BatchSource {
    /// Row count of every batch this source hands out.
    fn batch_rows(&self) -> usize;

    fn next_batch(&mut self) -> Result<(&Matrix, &Matrix)>;
}

/// Outcome of the iteration loop, before the intercept is recovered.
#[derive(Debug)]
pub(crate) struct Descent {
    pub converged: bool,
    pub iterations: usize,
    pub losses: Vec<f64>,
}

pub(crate) fn descend<S: BatchSource>(
    source: &mut S,
    theta: &mut Matrix,
    loss_fn: &dyn LossFunction,
    params: &DescentParams,
    label: &str,
) -> Result<Descent> {
    let mut y_pred = Matrix::create(source.batch_rows(), 1)?;
    let mut losses = Vec::with_capacity(params.n_iter / LOSS_INTERVAL);

    for i in 0..params.n_iter {
        let (x, y) = source.next_batch()?;
        forward(x, theta, &mut y_pred)?;
        let loss = loss_fn.loss(y, &y_pred)?;

        if loss < params.tol {
            log::info!("{}: converged in {} iterations", label, i + 1);
            return Ok(Descent {
                converged: true,
                iterations: i + 1,
                losses,
            });
        }

        if (i + 1) % LOSS_INTERVAL == 0 {
            log::info!("It. {}, loss = {:.4}", i + 1, loss);
            losses.push(loss);
        }

        backward(x, y, theta, params.learning_rate, loss_fn)?;
    }

    log::warn!(
        "{}: did not converge within {} iterations",
        label,
        params.n_iter
    );
    Ok(Descent {
        converged: false,
        iterations: params.n_iter,
        losses,
    })
}

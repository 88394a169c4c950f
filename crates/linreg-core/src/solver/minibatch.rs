use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SolverConfig;
use crate::error::{MatrixError, Result};
use crate::losses::LossFunction;
use crate::math::{Axis, IndexMatrix, Matrix};
use crate::preprocessing;

use super::batch::validate_params;
use super::{descend, BatchSource, DescentParams, Solver, SolverResult};

/// Mini-batch stochastic gradient descent.
///
/// Each step draws `batch_size` rows uniformly with replacement, so a batch
/// may repeat rows and may be larger than the dataset.
#[derive(Debug, Clone)]
pub struct MiniBatchSgd {
    pub batch_size: usize,
    pub params: DescentParams,
}

impl MiniBatchSgd {
    pub fn new(batch_size: usize, learning_rate: f64, n_iter: usize, tol: f64, seed: u64) -> Self {
        Self {
            batch_size,
            params: DescentParams {
                learning_rate,
                n_iter,
                tol,
                seed,
            },
        }
    }

    pub fn from_config(config: &SolverConfig, batch_size: usize) -> Self {
        Self::new(
            batch_size,
            config.learning_rate,
            config.n_iter,
            config.tol,
            config.seed,
        )
    }
}

/// Rows resampled on every call into buffers owned by the source.
struct SampledBatch<'a> {
    x: &'a Matrix,
    y: &'a Matrix,
    indices: IndexMatrix,
    x_batch: Matrix,
    y_batch: Matrix,
    rng: StdRng,
}

impl<'a> SampledBatch<'a> {
    fn new(x: &'a Matrix, y: &'a Matrix, batch_size: usize, rng: StdRng) -> Result<Self> {
        Ok(Self {
            x,
            y,
            indices: IndexMatrix::create(batch_size, 1)?,
            x_batch: Matrix::create(batch_size, x.ncols())?,
            y_batch: Matrix::create(batch_size, 1)?,
            rng,
        })
    }
}

impl BatchSource for SampledBatch<'_> {
    fn batch_rows(&self) -> usize {
        self.indices.nrows()
    }

    fn next_batch(&mut self) -> Result<(&Matrix, &Matrix)> {
        let rows = self.x.nrows() as i64;
        self.indices
            .fill_random_range_with(0, rows, true, &mut self.rng)?;
        self.x.gather(&mut self.x_batch, &self.indices, Axis::Rows)?;
        self.y.gather(&mut self.y_batch, &self.indices, Axis::Rows)?;
        log::trace!("batch indices: {:?}", self.indices.as_slice());
        Ok((&self.x_batch, &self.y_batch))
    }
}

impl Solver for MiniBatchSgd {
    fn solve(&self, x: &Matrix, y: &Matrix, loss_fn: &dyn LossFunction) -> Result<SolverResult> {
        if self.batch_size == 0 {
            return Err(MatrixError::invalid("batch size must be at least 1"));
        }
        validate_params(&self.params)?;
        let (centering, x_centered, y_centered) = preprocessing::fit_transform(x, y)?;

        // theta draws first, then the batch indices continue the same stream
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut theta = Matrix::create(x.ncols(), 1)?;
        theta.fill_random_uniform_with(&mut rng);

        log::debug!(
            "{}: {} rows, {} features, batch_size = {}, lr = {}, n_iter = {}, tol = {}, loss = {}",
            self.name(),
            x.nrows(),
            x.ncols(),
            self.batch_size,
            self.params.learning_rate,
            self.params.n_iter,
            self.params.tol,
            loss_fn.name()
        );

        let mut source = SampledBatch::new(&x_centered, &y_centered, self.batch_size, rng)?;
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
        "minibatch_sgd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::losses::L2Loss;

    fn line() -> (Matrix, Matrix) {
        let x = Matrix::from_shape_vec((4, 1), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let y = Matrix::from_shape_vec((4, 1), vec![1.0, 3.0, 5.0, 7.0]).unwrap();
        (x, y)
    }

    #[test]
    fn rejects_empty_batches() {
        let (x, y) = line();
        let err = MiniBatchSgd::new(0, 0.1, 10, 1e-6, 1)
            .solve(&x, &y, &L2Loss)
            .unwrap_err();
        assert!(matches!(err, MatrixError::InvalidParameter(_)));
    }

    #[test]
    fn batches_larger_than_the_dataset_are_sampled_with_replacement() {
        let (x, y) = line();
        let result = MiniBatchSgd::new(16, 0.05, 500, 1e-8, 9)
            .solve(&x, &y, &L2Loss)
            .unwrap();
        assert!((result.theta[(0, 0)] - 2.0).abs() < 1e-2);
        assert!((result.bias - 1.0).abs() < 1e-2);
    }

    #[test]
    fn same_seed_gives_the_same_fit() {
        let (x, y) = line();
        let solver = MiniBatchSgd::new(2, 0.05, 300, 0.0, 4);
        let a = solver.solve(&x, &y, &L2Loss).unwrap();
        let b = solver.solve(&x, &y, &L2Loss).unwrap();
        assert_eq!(a.theta, b.theta);
        assert_eq!(a.losses, b.losses);
        assert_eq!(a.losses.len(), 3);
    }
}

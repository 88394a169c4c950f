//! Synthetic regression data and seeded train/test splitting.
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{MatrixError, Result};
use crate::math::{Axis, IndexMatrix, Matrix};

/// A generated regression problem together with its ground truth.
#[derive(Debug, Clone)]
pub struct RegressionData {
    /// Features, `n_samples x n_features`.
    pub x: Matrix,
    /// Targets, `n_samples x 1`.
    pub y: Matrix,
    /// True coefficients, `n_features x 1`.
    pub coefficients: Matrix,
}

/// Rows of `x`/`y` partitioned into disjoint train and test sets.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Matrix,
    pub y_train: Matrix,
    pub x_test: Matrix,
    pub y_test: Matrix,
}

/// Generate `y = x coefficients + bias + noise * N(0, 1)`.
///
/// Column `j` of `x` is drawn from `N(mean_j, std_j)` with `mean_j` and
/// `std_j` in `[0, 10)`; coefficients lie in `[-25, 25)`. Every draw comes
/// from one stream seeded with `seed`.
pub fn make_regression(
    n_samples: usize,
    n_features: usize,
    bias: f64,
    noise: f64,
    seed: u64,
) -> Result<RegressionData> {
    if !noise.is_finite() || noise < 0.0 {
        return Err(MatrixError::invalid(format!(
            "noise must be finite and non-negative, got {}",
            noise
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let mut means = Matrix::create(n_features, 1)?;
    means.fill_random_uniform_with(&mut rng);
    means.scale(10.0);
    let mut stds = Matrix::create(n_features, 1)?;
    stds.fill_random_uniform_with(&mut rng);
    stds.scale(10.0);

    let mut x = Matrix::create(n_samples, n_features)?;
    x.fill_random_gaussian_with(&means, &stds, &mut rng)?;

    let mut coefficients = Matrix::create(n_features, 1)?;
    coefficients.fill_random_uniform_with(&mut rng);
    coefficients.scale(50.0);
    coefficients.add_scalar(-25.0);

    let mut noise_vec = Matrix::create(n_samples, 1)?;
    noise_vec.fill_random_gaussian_with(
        &Matrix::zeros(1, 1),
        &Matrix::from_elem(1, 1, 1.0),
        &mut rng,
    )?;
    noise_vec.scale(noise);

    let mut y = x.matmul(false, &coefficients, false)?;
    y.add_scalar(bias);
    y.add(&noise_vec)?;

    log::trace!(
        "generated {} x {} regression data, bias = {}, noise = {}",
        n_samples,
        n_features,
        bias,
        noise
    );

    Ok(RegressionData { x, y, coefficients })
}

/// Seeded permutation of `0..total` cut into `(train, test)` index columns.
///
/// The first `n_test` entries of the permutation form the test set and the
/// remaining `n_train` the train set.
pub fn split_indices(
    total: usize,
    n_train: usize,
    n_test: usize,
    seed: u64,
) -> Result<(IndexMatrix, IndexMatrix)> {
    if n_test >= n_train {
        return Err(MatrixError::invalid(format!(
            "test rows ({}) must be fewer than train rows ({})",
            n_test, n_train
        )));
    }
    if n_train + n_test != total {
        return Err(MatrixError::invalid(format!(
            "train ({}) and test ({}) rows must add up to {}",
            n_train, n_test, total
        )));
    }

    let total_i = total as i64;
    let n_test_i = n_test as i64;

    let mut permutation = IndexMatrix::create(total, 1)?;
    permutation.fill_random_range(0, total_i, false, seed)?;

    let mut test = IndexMatrix::create(n_test, 1)?;
    let head = IndexMatrix::range(0, n_test_i, 1, Axis::Rows)?;
    permutation.gather(&mut test, &head, Axis::Rows)?;

    let mut train = IndexMatrix::create(n_train, 1)?;
    let tail = IndexMatrix::range(n_test_i, total_i, 1, Axis::Rows)?;
    permutation.gather(&mut train, &tail, Axis::Rows)?;

    log::trace!("split {} rows into {} train / {} test", total, n_train, n_test);
    Ok((train, test))
}

/// Shuffle rows into train and test sets, `floor(rows * test_frac)` of them
/// going to test.
pub fn train_test_split(x: &Matrix, y: &Matrix, test_frac: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_frac) {
        return Err(MatrixError::invalid(format!(
            "test fraction must lie in [0, 1), got {}",
            test_frac
        )));
    }
    if !y.is_column_vector() || y.nrows() != x.nrows() {
        return Err(MatrixError::shape("train_test_split", x.shape(), y.shape()));
    }

    let total = x.nrows();
    let n_test = (total as f64 * test_frac).floor() as usize;
    let n_train = total - n_test;
    let (train_idx, test_idx) = split_indices(total, n_train, n_test, seed)?;

    Ok(TrainTestSplit {
        x_train: x.select(&train_idx, Axis::Rows)?,
        y_train: y.select(&train_idx, Axis::Rows)?,
        x_test: x.select(&test_idx, Axis::Rows)?,
        y_test: y.select(&test_idx, Axis::Rows)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noiseless_targets_follow_the_coefficients() {
        let data = make_regression(50, 3, 4.0, 0.0, 11).unwrap();
        let mut expected = data.x.matmul(false, &data.coefficients, false).unwrap();
        expected.add_scalar(4.0);
        for (a, b) in data.y.as_slice().iter().zip(expected.as_slice()) {
            assert!((a - b).abs() < 1e-9);
        }
        assert!(data
            .coefficients
            .as_slice()
            .iter()
            .all(|c| (-25.0..25.0).contains(c)));
    }

    #[test]
    fn split_rejects_inconsistent_sizes() {
        assert!(split_indices(10, 5, 5, 0).is_err());
        assert!(split_indices(10, 6, 3, 0).is_err());
        assert!(split_indices(10, 7, 3, 0).is_ok());
    }
}

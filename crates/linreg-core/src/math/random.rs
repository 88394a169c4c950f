//! Seeded random fills.
//!
//! Every fill comes in two flavours: one taking an explicit `u64` seed, which
//! builds a fresh `StdRng` for the call, and a `_with` variant drawing from a
//! generator owned by the caller. No global or thread-local generator is used.
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;

use crate::error::{MatrixError, Result};
use crate::math::matrix::{IndexMatrix, Matrix};

impl Matrix {
    /// Fill with independent draws from U[0, 1).
    pub fn fill_random_uniform(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.fill_random_uniform_with(&mut rng);
    }

    pub fn fill_random_uniform_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for v in self.data.iter_mut() {
            *v = rng.gen::<f64>();
        }
    }

    /// Fill column `j` with draws from N(`means[j]`, `stds[j]`).
    ///
    /// `means` and `stds` must both be `cols x 1` column vectors.
    pub fn fill_random_gaussian(&mut self, means: &Matrix, stds: &Matrix, seed: u64) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.fill_random_gaussian_with(means, stds, &mut rng)
    }

    pub fn fill_random_gaussian_with<R: Rng + ?Sized>(
        &mut self,
        means: &Matrix,
        stds: &Matrix,
        rng: &mut R,
    ) -> Result<()> {
        let expected = (self.cols, 1);
        if means.shape() != expected {
            return Err(MatrixError::shape(
                "fill_random_gaussian",
                means.shape(),
                expected,
            ));
        }
        if stds.shape() != expected {
            return Err(MatrixError::shape(
                "fill_random_gaussian",
                stds.shape(),
                expected,
            ));
        }
        if let Some(bad) = stds.data.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(MatrixError::invalid(format!(
                "standard deviation must be finite and non-negative, got {}",
                bad
            )));
        }

        let standard = Normal::new(0.0, 1.0).map_err(|e| MatrixError::invalid(e.to_string()))?;
        let cols = self.cols;
        for (offset, v) in self.data.iter_mut().enumerate() {
            let col = offset % cols;
            let z: f64 = standard.sample(rng);
            *v = means.data[col] + stds.data[col] * z;
        }
        Ok(())
    }
}

impl IndexMatrix {
    /// Fill with integers drawn from `[low, high)`.
    ///
    /// Without replacement every element is distinct, which needs
    /// `high - low >= len`. Drawing `len` values from a range of exactly
    /// `len` integers yields a random permutation.
    pub fn fill_random_range(&mut self, low: i64, high: i64, replace: bool, seed: u64) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.fill_random_range_with(low, high, replace, &mut rng)
    }

    pub fn fill_random_range_with<R: Rng + ?Sized>(
        &mut self,
        low: i64,
        high: i64,
        replace: bool,
        rng: &mut R,
    ) -> Result<()> {
        if low >= high {
            return Err(MatrixError::invalid(format!(
                "empty sampling range [{}, {})",
                low, high
            )));
        }

        if replace {
            for v in self.data.iter_mut() {
                *v = rng.gen_range(low..high);
            }
            return Ok(());
        }

        let span = high
            .checked_sub(low)
            .and_then(|s| usize::try_from(s).ok())
            .ok_or_else(|| MatrixError::invalid("sampling range too wide"))?;
        if span < self.data.len() {
            return Err(MatrixError::invalid(format!(
                "cannot draw {} distinct values from a range of {}",
                self.data.len(),
                span
            )));
        }
        let picks = rand::seq::index::sample(rng, span, self.data.len());
        for (v, pick) in self.data.iter_mut().zip(picks.into_iter()) {
            *v = low + pick as i64;
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::losses::LossType;

/// Central configuration for the solvers in the crate.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub learning_rate: f64,
    pub n_iter: usize,
    pub tol: f64,
    pub seed: u64,
    pub solver: SolverType,
    pub loss: LossType,
}

/// Supported solvers and their specific hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SolverType {
    /// Full-batch gradient descent.
    GradientDescent,
    /// Mini-batch stochastic gradient descent.
    MiniBatch { batch_size: usize },
}

impl SolverType {
    pub const DEFAULT_BATCH_SIZE: usize = 32;

    /// Short identifier used in logs and reports.
    pub fn short_name(&self) -> &'static str {
        match self {
            SolverType::GradientDescent => "gd",
            SolverType::MiniBatch { .. } => "sgd",
        }
    }
}

impl Default for SolverType {
    fn default() -> Self {
        SolverType::GradientDescent
    }
}

impl FromStr for SolverType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gd" | "gradient_descent" | "batch" => Ok(SolverType::GradientDescent),
            "sgd" | "minibatch" | "mini_batch" => Ok(SolverType::MiniBatch {
                batch_size: SolverType::DEFAULT_BATCH_SIZE,
            }),
            _ => Err(format!(
                "Unknown solver type: {}. Expected one of: gd, sgd",
                s
            )),
        }
    }
}

impl SolverConfig {
    pub fn new(learning_rate: f64, n_iter: usize, tol: f64, seed: u64, solver: SolverType) -> Self {
        Self {
            learning_rate,
            n_iter,
            tol,
            seed,
            solver,
            loss: LossType::default(),
        }
    }

    pub fn with_loss(mut self, loss: LossType) -> Self {
        self.loss = loss;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            n_iter: 10000,
            tol: 0.001,
            seed: 42,
            solver: SolverType::default(),
            loss: LossType::default(),
        }
    }
}

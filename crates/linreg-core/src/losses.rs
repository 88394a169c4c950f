//! Loss functions and their gradients with respect to the coefficients.
//!
//! Gradients are scale-free: the solver applies the `2 * eta / n` step
//! factor, so the same loss works with any learning-rate schedule.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};
use crate::math::Matrix;
use crate::stats;

/// A loss together with its gradient.
pub trait LossFunction: Send + Sync {
    /// Scalar loss between targets and predictions (both `n x 1`).
    fn loss(&self, y_true: &Matrix, y_pred: &Matrix) -> Result<f64>;

    /// Gradient with respect to `theta` (`features x 1`).
    fn gradient(&self, x: &Matrix, y: &Matrix, theta: &Matrix) -> Result<Matrix>;

    fn name(&self) -> &str {
        "loss"
    }
}

/// Mean squared error, `||y_true - y_pred||^2 / n`.
#[derive(Debug, Default, Clone, Copy)]
pub struct L2Loss;

impl L2Loss {
    pub fn new() -> Self {
        Self
    }
}

/// `X^T (X theta - y)`
fn residual_gradient(x: &Matrix, y: &Matrix, theta: &Matrix) -> Result<Matrix> {
    let mut x_theta = x.matmul(false, theta, false)?;
    x_theta.sub(y)?;
    x.matmul(true, &x_theta, false)
}

impl LossFunction for L2Loss {
    fn loss(&self, y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
        stats::mse(y_true, y_pred)
    }

    fn gradient(&self, x: &Matrix, y: &Matrix, theta: &Matrix) -> Result<Matrix> {
        residual_gradient(x, y, theta)
    }

    fn name(&self) -> &str {
        "l2"
    }
}

/// L2 loss with an L2 penalty on the coefficients.
///
/// The reported loss is the data term only; the penalty enters through the
/// gradient, `X^T (X theta - y) + lambda * theta`.
#[derive(Debug, Clone, Copy)]
pub struct RidgeLoss {
    pub lambda: f64,
}

impl RidgeLoss {
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }
}

impl LossFunction for RidgeLoss {
    fn loss(&self, y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
        stats::mse(y_true, y_pred)
    }

    fn gradient(&self, x: &Matrix, y: &Matrix, theta: &Matrix) -> Result<Matrix> {
        let mut grad = residual_gradient(x, y, theta)?;
        let mut penalty = theta.clone();
        penalty.scale(self.lambda);
        grad.add(&penalty)?;
        Ok(grad)
    }

    fn name(&self) -> &str {
        "ridge"
    }
}

/// Loss selection as it appears in configuration files.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    L2,
    Ridge { lambda: f64 },
}

impl Default for LossType {
    fn default() -> Self {
        LossType::L2
    }
}

impl FromStr for LossType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l2" | "mse" => Ok(LossType::L2),
            "ridge" => Ok(LossType::Ridge { lambda: 0.1 }),
            _ => Err(format!("Unknown loss type: {}. Expected one of: l2, ridge", s)),
        }
    }
}

/// Build a boxed loss from its configuration.
pub fn build_loss(loss_type: &LossType) -> Result<Box<dyn LossFunction>> {
    match *loss_type {
        LossType::L2 => Ok(Box::new(L2Loss::new())),
        LossType::Ridge { lambda } => {
            if !lambda.is_finite() || lambda < 0.0 {
                return Err(MatrixError::invalid(format!(
                    "ridge lambda must be finite and non-negative, got {}",
                    lambda
                )));
            }
            Ok(Box::new(RidgeLoss::new(lambda)))
        }
    }
}

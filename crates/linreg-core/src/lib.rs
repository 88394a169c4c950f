//! linreg-core: linear regression fitted by gradient descent.
//!
//! This crate provides a small row-major matrix engine, pluggable losses,
//! batch and mini-batch gradient-descent solvers, regression metrics, and a
//! synthetic dataset generator with seeded train/test splitting.
//!
//! All randomness is derived from explicit `u64` seeds so every run is
//! reproducible.
pub mod config;
pub mod dataset;
pub mod error;
pub mod losses;
pub mod math;
pub mod preprocessing;
pub mod solver;
pub mod stats;

pub use error::{MatrixError, Result};

//! Dense matrix engine.
//!
//! `Array2<T>` is a small row-major container with shape-checked arithmetic,
//! broadcasting, transpose-aware products, seeded random fills and gather.
//! It comes in a real-valued flavour (`Matrix`) and an integer flavour
//! (`IndexMatrix`) with identical shape semantics.
pub mod arith;
pub mod matrix;
pub mod random;
pub mod select;

pub use matrix::{Array2, Axis, Element, IndexMatrix, Matrix};

//! The benchmark matrix and the two ways of walking it.
//!
//! Storage is a single row-major `Vec<i32>`, so walking a row touches
//! consecutive addresses while walking a column strides by `dim` elements.

pub mod setup;
pub mod traverse;

pub use setup::Matrix;
pub use traverse::Order;

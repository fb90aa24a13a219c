use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid matrix dimension {dim}: must be at most {max}")]
    InvalidDimension { dim: usize, max: usize },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("Invalid harness configuration: {0}")]
    InvalidHarness(String),

    /// The N×N matrix could not be allocated. A benchmark over partial data
    /// is meaningless, so callers should abort the run.
    #[error("Failed to allocate matrix of {elements} elements: {source}")]
    Allocation {
        elements: usize,
        #[source]
        source: TryReserveError,
    },
}

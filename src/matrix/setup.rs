use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};

/// Square `i32` matrix, row-major. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    pub(super) data: Vec<i32>,
    pub(super) dim: usize,
}

impl Matrix {
    /// Allocate a `dim × dim` matrix and fill it from a ChaCha8 generator
    /// seeded with `config.seed()`.
    ///
    /// Cells are filled in row-major order. The same config always yields
    /// the same matrix on every platform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the backing buffer cannot be
    /// reserved. No partially filled matrix is ever returned.
    pub fn setup(config: &Config) -> Result<Self> {
        let dim = config.dim();
        let elements = config.elements();

        let mut data = allocate(elements)?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed());
        data.extend((0..elements).map(|_| rng.r#gen::<i32>()));

        info!(
            dim,
            seed = config.seed(),
            bytes = config.bytes(),
            "matrix initialised"
        );

        Ok(Self { data, dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of elements, `dim²`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row >= self.dim || col >= self.dim {
            return None;
        }
        Some(self.data[row * self.dim + col])
    }

    /// The backing buffer in row-major order.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }
}

/// Empty buffer with room for exactly `elements` values.
pub(crate) fn allocate(elements: usize) -> Result<Vec<i32>> {
    let mut data = Vec::new();
    data.try_reserve_exact(elements)
        .map_err(|source| Error::Allocation { elements, source })?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_failure_is_reported() {
        match allocate(usize::MAX) {
            Err(Error::Allocation { elements, .. }) => assert_eq!(elements, usize::MAX),
            other => panic!("expected Allocation, got {:?}", other),
        }
    }

    #[test]
    fn test_allocate_reserves_exactly() {
        let data = allocate(100).unwrap();
        assert!(data.is_empty());
        assert!(data.capacity() >= 100);
    }
}

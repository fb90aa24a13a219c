//! Matrix configuration: dimension and seed.

use std::env;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Dimension used by the reference run (4096×4096 `i32` = 64 MiB).
pub const DEFAULT_DIM: usize = 4096;

/// Seed used by the reference run.
pub const DEFAULT_SEED: u64 = 1234;

/// Largest accepted dimension. 32768² `i32` is 4 GiB.
/// The element count (2³⁰) still fits a 32-bit `usize`.
pub const MAX_DIM: usize = 1 << 15;

pub const ENV_DIM: &str = "CACHE_ACCESS_DIM";
pub const ENV_SEED: &str = "CACHE_ACCESS_SEED";

/// Shape and contents of the benchmark matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    dim: usize,
    seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dim: DEFAULT_DIM,
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Validated config. `dim == 0` is allowed and yields an empty matrix.
    ///
    /// ```
    /// use cache_access::Config;
    ///
    /// let config = Config::new(4, 1234).unwrap();
    /// assert_eq!(config.elements(), 16);
    ///
    /// assert!(Config::new(1 << 20, 1234).is_err());
    /// ```
    pub fn new(dim: usize, seed: u64) -> Result<Self> {
        if dim > MAX_DIM {
            return Err(Error::InvalidDimension { dim, max: MAX_DIM });
        }
        Ok(Self { dim, seed })
    }

    /// Defaults overridden by `CACHE_ACCESS_DIM` and `CACHE_ACCESS_SEED`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let dim = env_or(ENV_DIM, defaults.dim)?;
        let seed = env_or(ENV_SEED, defaults.seed)?;
        Self::new(dim, seed)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// N², the number of elements each traversal visits.
    pub fn elements(&self) -> usize {
        self.dim * self.dim
    }

    /// Size of the matrix in bytes. `u64` so `MAX_DIM` fits on 32-bit targets.
    pub fn bytes(&self) -> u64 {
        self.elements() as u64 * std::mem::size_of::<i32>() as u64
    }
}

/// Parse `key` from the environment, falling back to `default` when unset.
pub(crate) fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidConfig { key, value }),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(env::VarError::NotUnicode(raw)) => Err(Error::InvalidConfig {
            key,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

//! Row-first vs column-first matrix traversal.
//!
//! Many performance differences come down to how memory is accessed. This
//! crate walks the same square `i32` matrix two ways: row by row, which
//! reads memory sequentially, and column by column, which jumps a whole row
//! ahead on every read. Same elements, same work, very different cache
//! behaviour once a column's cache lines stop fitting in L1.
//!
//! ## Usage
//!
//! ```
//! use cache_access::{Blackhole, Config, Matrix};
//!
//! let matrix = Matrix::setup(&Config::new(256, 1234).unwrap()).unwrap();
//!
//! matrix.row_first(&mut Blackhole);
//! matrix.col_first(&mut Blackhole);
//! ```
//!
//! For timings, use the binary (`cargo run --release`) or the criterion
//! bench (`cargo bench`).
//!
//! ## What's inside
//!
//! - Seeded, reproducible matrix setup
//! - The two traversal operations and a [`Sink`] to keep reads alive
//! - A small warmup/measure/fork harness driven by [`HarnessConfig`]

pub mod config;
pub mod error;
pub mod harness;
pub mod logging;
pub mod matrix;
pub mod sink;

pub use config::Config;
pub use error::{Error, Result};
pub use harness::{HarnessConfig, Measurement, TimeUnit};
pub use matrix::{Matrix, Order};
pub use sink::{Blackhole, Sink};

//! Consumers for visited values.
//!
//! A traversal that discards what it reads can be optimised away entirely.
//! Every operation therefore hands each value to a [`Sink`].

use std::hint::black_box;

/// Receives every value a traversal reads.
pub trait Sink {
    fn consume(&mut self, value: i32);
}

/// Sink that only defeats dead-code elimination. Used when timing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blackhole;

impl Sink for Blackhole {
    #[inline(always)]
    fn consume(&mut self, value: i32) {
        black_box(value);
    }
}

/// Closures are sinks, which lets tests record what was visited.
///
/// ```
/// use cache_access::{Config, Matrix};
///
/// let matrix = Matrix::setup(&Config::new(3, 1234).unwrap()).unwrap();
/// let mut seen = Vec::new();
/// matrix.row_first(&mut |v| seen.push(v));
/// assert_eq!(seen, matrix.as_slice());
/// ```
impl<F: FnMut(i32)> Sink for F {
    #[inline(always)]
    fn consume(&mut self, value: i32) {
        self(value)
    }
}

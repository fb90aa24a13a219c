use std::fmt;

use super::Matrix;
use crate::sink::Sink;

/// Loop nesting used to visit the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Outer loop over rows, inner over columns. Follows the memory layout.
    RowFirst,
    /// Outer loop over columns, inner over rows. Strides by a full row on
    /// every read.
    ColFirst,
}

impl Order {
    pub const ALL: [Order; 2] = [Order::RowFirst, Order::ColFirst];

    pub fn name(&self) -> &'static str {
        match self {
            Order::RowFirst => "row_first",
            Order::ColFirst => "col_first",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Matrix {
    /// Visit every `(row, col, value)` once, in the given order.
    ///
    /// Both orders read `matrix[row][col]`; only the loop nesting differs.
    ///
    /// ```
    /// use cache_access::{Config, Matrix, Order};
    ///
    /// let matrix = Matrix::setup(&Config::new(2, 1234).unwrap()).unwrap();
    /// let mut visited = Vec::new();
    /// matrix.walk(Order::ColFirst, |r, c, _| visited.push((r, c)));
    /// assert_eq!(visited, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    /// ```
    #[inline(always)]
    pub fn walk<F>(&self, order: Order, mut f: F)
    where
        F: FnMut(usize, usize, i32),
    {
        let n = self.dim;
        let data = self.data.as_slice();

        match order {
            Order::RowFirst => {
                for r in 0..n {
                    for c in 0..n {
                        f(r, c, data[r * n + c]);
                    }
                }
            }
            Order::ColFirst => {
                for c in 0..n {
                    for r in 0..n {
                        f(r, c, data[r * n + c]);
                    }
                }
            }
        }
    }

    /// Row-first traversal: sequential reads, one cache line serves many
    /// consecutive elements.
    #[inline(never)]
    pub fn row_first<S: Sink>(&self, sink: &mut S) {
        self.walk(Order::RowFirst, |_, _, v| sink.consume(v));
    }

    /// Column-first traversal: each read lands `dim * 4` bytes after the
    /// previous one. Once a column's worth of lines no longer fits in cache
    /// nearly every read misses.
    #[inline(never)]
    pub fn col_first<S: Sink>(&self, sink: &mut S) {
        self.walk(Order::ColFirst, |_, _, v| sink.consume(v));
    }

    /// Run the operation for `order`.
    pub fn traverse<S: Sink>(&self, order: Order, sink: &mut S) {
        match order {
            Order::RowFirst => self.row_first(sink),
            Order::ColFirst => self.col_first(sink),
        }
    }
}

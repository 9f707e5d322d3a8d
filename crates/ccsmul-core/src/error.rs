//! Error type shared by the ccsmul crates

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CcsError {
    /// Operand shapes cannot be multiplied (`cols_a != rows_b`).
    #[error("dimension mismatch: cannot multiply {rows_a}x{cols_a} by {rows_b}x{cols_b}")]
    DimensionMismatch {
        rows_a: usize,
        cols_a: usize,
        rows_b: usize,
        cols_b: usize,
    },

    /// A flat buffer does not hold `rows * cols` elements.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLength { expected: usize, got: usize },

    /// Raw parts violate a CCS invariant.
    #[error("invalid CCS structure: {0}")]
    InvalidStructure(&'static str),

    #[error("multiplication cancelled after {completed_columns} columns")]
    Cancelled { completed_columns: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

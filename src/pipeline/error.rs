//! Error types for correlation pruning.
//!
//! Every variant is a precondition violation on the input matrix or the
//! configuration. Pruning itself is deterministic and cannot fail part-way.

use thiserror::Error;

/// Errors that can occur when building a correlation matrix or pruning it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PruneError {
    /// The matrix has no variables.
    #[error("correlation matrix is empty: nothing to prune")]
    EmptyInput,

    /// The matrix is not square.
    #[error("correlation matrix must be square, got {rows}x{cols}")]
    Shape { rows: usize, cols: usize },

    /// A mirrored pair of entries disagrees beyond the symmetry tolerance.
    #[error("correlation matrix is not symmetric at ({row}, {col}): {upper} vs {lower}")]
    NotSymmetric {
        row: usize,
        col: usize,
        upper: f64,
        lower: f64,
    },

    /// An off-diagonal entry is infinite.
    #[error("correlation matrix entry ({row}, {col}) is not finite: {value}")]
    InvalidEntry { row: usize, col: usize, value: f64 },

    /// The threshold is NaN or infinite.
    #[error("threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),

    /// The number of labels does not match the number of variables.
    #[error("expected {expected} column labels, got {actual}")]
    LabelCount { expected: usize, actual: usize },

    /// Labels were requested but the matrix carries none.
    #[error("column labels requested but the correlation matrix has no labels")]
    MissingLabels,
}

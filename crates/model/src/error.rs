//! Error types for the process data model.

use thiserror::Error;

/// Errors raised while building or mutating a robust MDP.
///
/// Validation faults surface synchronously at the call site; nothing is
/// recovered internally. Mutations are atomic at the branch level: a
/// rejected append leaves the model unchanged apart from any grow-on-write
/// resizing that preceded the rejection.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A state/action/outcome/sample id at or beyond the container size at
    /// its level.
    #[error("invalid {what} id {id} (container holds {count})")]
    InvalidIndex {
        what: &'static str,
        id: usize,
        count: usize,
    },

    /// Parallel vectors differ in length.
    #[error("length mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// A numeric parameter outside its admissible interval.
    #[error("{what} out of range: {value} (allowed [{lo}, {hi}])")]
    OutOfRange {
        what: &'static str,
        value: f64,
        lo: f64,
        hi: f64,
    },

    /// A purported probability vector that does not sum to 1.
    #[error("distribution not normalized: sum = {sum} (expected 1.0)")]
    NotNormalized { sum: f64 },

    /// Normalization attempted on a zero-sum transition.
    #[error("cannot normalize: probabilities sum to zero")]
    EmptyDistribution,

    /// A malformed CSV record.
    #[error("csv parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Underlying stream failure in the CSV file routines.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

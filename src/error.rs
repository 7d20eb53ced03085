//! Error types for matrix construction, problem setup and pheromone input.

use thiserror::Error;

/// Errors raised while building a square matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("matrix must have at least one row")]
    Empty,

    #[error("row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("entry ({row}, {col}) is {value}, expected a finite non-negative number")]
    InvalidEntry { row: usize, col: usize, value: f64 },

    #[error("matrix is {found}x{found}, expected {expected}x{expected}")]
    SizeMismatch { expected: usize, found: usize },
}

/// Errors raised while defining a start-to-end path problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("node {node} is out of range for a graph of {size} nodes")]
    NodeOutOfRange { node: usize, size: usize },

    #[error("start and end are both node {node}")]
    StartIsEnd { node: usize },

    #[error("expected {expected} labels, got {found}")]
    LabelCount { expected: usize, found: usize },
}

/// Errors raised while reading an initial pheromone matrix.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("expected {expected} values, got {found}")]
    WrongTokenCount { expected: usize, found: usize },

    #[error("'{token}' is not a number")]
    InvalidNumber { token: String },

    #[error("'{token}' must be a finite non-negative number")]
    NegativeValue { token: String },

    #[error("input ended before row {row} was entered")]
    UnexpectedEof { row: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl InputError {
    /// Whether the reader should report the problem and ask for the row again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InputError::WrongTokenCount { .. }
                | InputError::InvalidNumber { .. }
                | InputError::NegativeValue { .. }
        )
    }
}

use std::fmt;

use thiserror::Error;

/// Which of the two compared datasets an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Failures raised by the reconciliation core.
///
/// "No similar columns", "empty dataset", and "zero common records" are not
/// represented here: those are valid, empty results.
#[derive(Debug, Error, PartialEq)]
pub enum ReconcileError {
    #[error("Field mapping is empty; no columns to reconcile")]
    EmptyMapping,
    #[error("Key column '{column}' not found in {side} dataset")]
    KeyNotFound { side: Side, column: String },
    #[error("Field '{field}' not found in comparison result")]
    FieldNotFound { field: String },
    #[error("Duplicate column '{0}' in dataset header")]
    DuplicateColumn(String),
    #[error("Row {row} has {found} value(s) but the dataset has {expected} column(s)")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Similarity threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),
}

pub type Result<T, E = ReconcileError> = std::result::Result<T, E>;

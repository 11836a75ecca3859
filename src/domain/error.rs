//! Composition and grid placement errors

use thiserror::Error;

/// Errors that can occur while composing a dashboard figure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    #[error("Input sequences differ in length: {periods} periods, {targets} targets, {actuals} actuals")]
    LengthMismatch {
        periods: usize,
        targets: usize,
        actuals: usize,
    },

    #[error("Input sequences are empty")]
    EmptyInput,

    #[error("Gauge headroom must be finite and non-negative, got {0}")]
    InvalidHeadroom(f64),

    #[error("Non-finite {field} value at period {index}")]
    NonFiniteValue { field: &'static str, index: usize },

    #[error("Trace placement failed: {0}")]
    Grid(#[from] GridError),
}

/// Errors that can occur while building a grid or placing a trace on it
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Grid must have at least one row and one column")]
    EmptyGrid,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Expected {expected} row heights, got {found}")]
    RowHeights { expected: usize, found: usize },

    #[error("Cell ({row}, {col}) spans past the last column")]
    SpanOverflow { row: usize, col: usize },

    #[error("Cell ({row}, {col}) is covered by another cell's span")]
    CoveredCell { row: usize, col: usize },

    #[error("No cell at ({row}, {col})")]
    NoSuchCell { row: usize, col: usize },

    #[error("Cell ({row}, {col}) holds {cell} traces, not {trace} traces")]
    KindMismatch {
        row: usize,
        col: usize,
        cell: &'static str,
        trace: &'static str,
    },
}

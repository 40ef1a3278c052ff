//! Error types for the editor

use scribe_common::InvalidOperation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid operation: {0}")]
    Invalid(#[from] InvalidOperation),

    #[error("Text not found: {0:?}")]
    TextNotFound(String),

    #[error("Target text is empty")]
    EmptyTarget,

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Cell ({row}, {col}) is outside a {rows}x{cols} table")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Nothing to modify: give a cell (row/col) or table_data")]
    NothingToModify,

    #[error("No style given")]
    MissingStyle,

    #[error("No image path given")]
    MissingImagePath,
}

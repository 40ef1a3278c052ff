//! Validation errors for operations

use crate::OperationKind;
use thiserror::Error;

/// Reason an [`Operation`](crate::Operation) cannot be turned into an edit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidOperation {
    #[error("unknown operation type: {0}")]
    UnknownKind(String),

    #[error("{kind} requires non-empty content")]
    MissingContent { kind: OperationKind },

    #[error("modify_text requires a non-empty metadata.old_text")]
    MissingOldText,

    #[error("add_table requires table_data")]
    MissingTable,

    #[error("table must have at least one row and one column, got {rows}x{cols}")]
    EmptyTable { rows: usize, cols: usize },

    #[error("table of {rows}x{cols} exceeds the size limit")]
    TableTooLarge { rows: usize, cols: usize },

    #[error("add_list requires a non-empty metadata.items sequence")]
    MissingItems,

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

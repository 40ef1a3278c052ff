//! # Scribe Common
//!
//! Shared data model for the Scribe document agent.
//!
//! ## Two views of an edit
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Operation: wire shape (JSON from callers    │
//! │ and from the completion model)              │
//! └─────────────────────────────────────────────┘
//!                     ↓  Operation::to_edit()
//! ┌─────────────────────────────────────────────┐
//! │ Edit: typed, well-formed, one variant per   │
//! │ operation kind                              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: applies Edit to the document tree   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every [`Operation`] that survives [`validate`] converts to an [`Edit`].

pub mod error;
pub mod operation;
pub mod style;
pub mod validate;

pub use error::InvalidOperation;
pub use operation::{
    CellEdit, Edit, Metadata, Operation, OperationKind, Position, TableSpec, MAX_TABLE_COLS,
    MAX_TABLE_ROWS,
};
pub use style::{Rgb, Style};
pub use validate::validate;

//! # Scribe Editor
//!
//! Document mutation engine for Scribe.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ common: Operation → Edit (validated)        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save document trees                 │
//! │  - Apply edits (one exhaustive dispatch)    │
//! │  - Best-effort batch execution              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree: paragraphs, tables, images            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: text previews are derived views
//! 2. **Positional addressing**: paragraphs are targeted by index at the
//!    time of the edit; indices shift after deletions in the same batch
//! 3. **Independent edits**: a failed edit never aborts the rest of a batch
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scribe_editor::Document;
//! use scribe_common::Operation;
//!
//! let mut doc = Document::new();
//! let results = doc.execute_operations(&[
//!     Operation::add_heading("Report", 1),
//!     Operation::add_text("Intro"),
//! ]);
//! assert_eq!(results, vec![true, true]);
//! assert_eq!(doc.text(), "Report\nIntro");
//!
//! doc.save("workspace/report.sdoc")?;
//! ```

mod document;
mod errors;
mod mutations;
pub mod tree;

pub use document::{Document, NATIVE_EXTENSION};
pub use errors::EditorError;
pub use mutations::DeleteSummary;
pub use tree::{Block, Cell, DocumentTree, Image, Paragraph, ParagraphKind, Run, RunFormat, Table};

//! # Document Handle
//!
//! A Document owns one [`DocumentTree`] and its editing state.
//! Documents can be:
//! - **Unsaved**: created in memory, no backing path yet
//! - **File-backed**: loaded from or saved to a native `.sdoc` file
//!
//! ## Lifecycle
//!
//! ```text
//! New/Load → Edit → Save
//!    ↓         ↓      ↓
//!  Tree     Edits   File
//! ```

use crate::{DocumentTree, EditorError};
use scribe_common::Operation;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File extension of the native document format
pub const NATIVE_EXTENSION: &str = "sdoc";

/// Editable document
#[derive(Debug, Default)]
pub struct Document {
    /// Backing file, `None` until first saved
    path: Option<PathBuf>,

    /// Current version number (increments on each applied edit)
    pub version: u64,

    pub(crate) tree: DocumentTree,

    dirty: bool,
}

impl Document {
    /// Empty, unsaved document
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a native document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let tree: DocumentTree = serde_json::from_str(&source)?;

        debug!(path = %path.display(), blocks = tree.blocks.len(), "Loaded document");

        Ok(Self {
            path: Some(path.to_path_buf()),
            version: 0,
            tree,
            dirty: false,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn paragraph_count(&self) -> usize {
        self.tree.paragraph_count()
    }

    pub fn table_count(&self) -> usize {
        self.tree.table_count()
    }

    /// All paragraph texts joined by newlines. Tables and images are excluded.
    pub fn text(&self) -> String {
        self.tree.text()
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
    }

    /// Apply each operation independently, in order.
    ///
    /// Returns one success flag per operation. A failure is logged and does
    /// not stop later operations.
    pub fn execute_operations(&mut self, operations: &[Operation]) -> Vec<bool> {
        operations
            .iter()
            .enumerate()
            .map(|(index, operation)| {
                let result = operation
                    .to_edit()
                    .map_err(EditorError::from)
                    .and_then(|edit| self.apply(&edit));

                match result {
                    Ok(()) => true,
                    Err(error) => {
                        warn!(index, kind = %operation.kind, %error, "Operation failed");
                        false
                    }
                }
            })
            .collect()
    }

    /// Write the tree to `path`, creating parent directories.
    /// On success `path` becomes the backing file.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.tree)?;
        std::fs::write(path, json)?;

        self.path = Some(path.to_path_buf());
        self.dirty = false;

        info!(path = %path.display(), version = self.version, "Saved document");
        Ok(())
    }
}

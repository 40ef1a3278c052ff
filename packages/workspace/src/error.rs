use scribe_editor::EditorError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("failed to save document: {0}")]
    Save(#[source] EditorError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export to {0} is not supported")]
    UnsupportedFormat(String),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

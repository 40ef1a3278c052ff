//! # Scribe Workspace
//!
//! Owns the workspace directory and the open-document cache, and runs each
//! request through parse → validate → execute → save.
//!
//! Requests on the same document path are serialized; different paths run
//! in parallel.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod paths;
pub mod requests;
pub mod state;

pub use config::{AgentConfig, DEFAULT_CONFIG_NAME};
pub use error::WorkspaceError;
pub use orchestrator::{Orchestrator, NO_VALID_OPERATIONS, PREVIEW_CHARS};
pub use requests::{
    CreateDocumentRequest, DocumentFormat, ExportRequest, ProcessRequest, ProcessResponse,
    UnknownFormat,
};
pub use state::{DocumentCache, SharedDocument};

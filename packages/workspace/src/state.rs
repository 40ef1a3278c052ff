use crate::WorkspaceError;
use scribe_editor::{Document, EditorError};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// One open document. The async lock is held for a whole request, which
/// serializes requests on the same path.
pub type SharedDocument = Arc<tokio::sync::Mutex<Document>>;

pub fn share(document: Document) -> SharedDocument {
    Arc::new(tokio::sync::Mutex::new(document))
}

/// Absolute form of `path` with `.` and `..` resolved lexically, so that
/// spellings of one file share a cache entry
fn cache_key(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut key = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                key.pop();
            }
            other => key.push(other),
        }
    }
    key
}

/// Open documents keyed by normalized path. Several keys may share one document (a
/// source file and the output it was saved to).
#[derive(Default)]
pub struct DocumentCache {
    entries: Mutex<HashMap<PathBuf, SharedDocument>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, SharedDocument>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, path: &Path) -> Option<SharedDocument> {
        self.entries().get(&cache_key(path)).cloned()
    }

    /// Cached document for `path`, loading it from disk on first use
    pub fn get_or_load(&self, path: &Path) -> Result<SharedDocument, WorkspaceError> {
        if let Some(document) = self.get(path) {
            return Ok(document);
        }

        let document = Document::load(path).map_err(|e| match e {
            EditorError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                WorkspaceError::DocumentNotFound(path.to_path_buf())
            }
            other => WorkspaceError::Editor(other),
        })?;
        debug!(path = %path.display(), "Loaded document into cache");

        // A concurrent load may have won; keep the first entry
        Ok(self
            .entries()
            .entry(cache_key(path))
            .or_insert_with(|| share(document))
            .clone())
    }

    pub fn insert(&self, path: impl Into<PathBuf>, document: SharedDocument) {
        let path: PathBuf = path.into();
        self.entries().insert(cache_key(&path), document);
    }

    /// Insert under the first candidate free both in the cache and on disk.
    /// Returns the candidate as given.
    pub fn insert_unused(
        &self,
        candidates: impl IntoIterator<Item = PathBuf>,
        document: SharedDocument,
    ) -> Option<PathBuf> {
        let mut entries = self.entries();
        let path = candidates
            .into_iter()
            .find(|path| !entries.contains_key(&cache_key(path)) && !path.exists())?;
        entries.insert(cache_key(&path), document);
        Some(path)
    }

    pub fn remove(&self, path: &Path) -> bool {
        self.entries().remove(&cache_key(path)).is_some()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries().contains_key(&cache_key(path))
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}

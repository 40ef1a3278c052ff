//! Request pipeline: resolve → parse → validate → execute → save.

use crate::paths::{self, base_name, candidates, clean_title, export_path, is_plain_file_name};
use crate::requests::{
    CreateDocumentRequest, DocumentFormat, ExportRequest, ProcessRequest, ProcessResponse,
};
use crate::state::{share, DocumentCache, SharedDocument};
use crate::{AgentConfig, WorkspaceError};
use scribe_common::{validate, Operation, Position};
use scribe_editor::{Document, NATIVE_EXTENSION};
use scribe_parser::CommandParser;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Characters of document text returned with edit responses
pub const PREVIEW_CHARS: usize = 500;

pub const NO_VALID_OPERATIONS: &str = "cannot parse instruction or no valid operations.";

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Turns requests into edited, saved documents
pub struct Orchestrator {
    workspace: PathBuf,
    parser: CommandParser,
    cache: DocumentCache,
}

impl Orchestrator {
    /// Creates `workspace` if it does not exist
    pub fn new(workspace: impl Into<PathBuf>, parser: CommandParser) -> Result<Self, WorkspaceError> {
        let workspace = workspace.into();
        std::fs::create_dir_all(&workspace)?;

        Ok(Self {
            workspace,
            parser,
            cache: DocumentCache::new(),
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, WorkspaceError> {
        Self::new(config.workspace.clone(), config.build_parser())
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Cached or loaded document for `path`; a fresh uncached one otherwise
    fn resolve(&self, path: Option<&Path>) -> Result<SharedDocument, WorkspaceError> {
        match path {
            Some(path) => self.cache.get_or_load(path),
            None => Ok(share(Document::new())),
        }
    }

    /// Save under a fresh `<base>_<timestamp>[_n].sdoc` name and cache the
    /// document there. The caller holds the document lock.
    fn save_new(
        &self,
        shared: &SharedDocument,
        document: &mut Document,
        base: &str,
    ) -> Result<PathBuf, WorkspaceError> {
        let stamp = paths::timestamp();
        let path = self
            .cache
            .insert_unused(candidates(&self.workspace, base, &stamp), shared.clone())
            .ok_or_else(|| WorkspaceError::InvalidFileName(base.to_string()))?;

        if let Err(e) = document.save(&path) {
            self.cache.remove(&path);
            return Err(WorkspaceError::Save(e));
        }
        Ok(path)
    }

    /// Apply a natural-language instruction (or explicit operations) and
    /// save the result as a new file.
    #[instrument(skip_all, fields(document = ?request.document_path))]
    pub async fn process_instruction(&self, request: ProcessRequest) -> ProcessResponse {
        info!(instruction = %request.instruction, "Processing instruction");

        match self.run_instruction(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Instruction failed");
                ProcessResponse::failure(e.to_string())
            }
        }
    }

    async fn run_instruction(&self, request: ProcessRequest) -> Result<ProcessResponse, WorkspaceError> {
        let shared = self.resolve(request.document_path.as_deref())?;
        let mut document = shared.lock().await;

        let operations = match request.operations {
            Some(operations) if !operations.is_empty() => operations,
            _ => {
                self.parser
                    .parse_instruction(&request.instruction, &document.text())
                    .await
            }
        };

        let operations = validate(operations);
        if operations.is_empty() {
            warn!("No valid operations");
            return Ok(ProcessResponse::failure(NO_VALID_OPERATIONS));
        }

        let results = document.execute_operations(&operations);
        let performed: Vec<Operation> = operations
            .into_iter()
            .zip(results)
            .filter_map(|(operation, ok)| ok.then_some(operation))
            .collect();

        let base = base_name(request.document_path.as_deref());
        let output = self.save_new(&shared, &mut document, &base)?;

        info!(path = %output.display(), performed = performed.len(), "Instruction applied");

        Ok(ProcessResponse::success(format!("executed {} operation(s)", performed.len()))
            .with_path(output)
            .with_preview(preview(&document.text()))
            .with_operations(performed))
    }

    /// New document: optional template, level-1 title heading, optional
    /// first paragraph.
    #[instrument(skip_all, fields(title = %request.title))]
    pub async fn create_document(&self, request: CreateDocumentRequest) -> ProcessResponse {
        match self.run_create(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Create failed");
                ProcessResponse::failure(e.to_string())
            }
        }
    }

    async fn run_create(&self, request: CreateDocumentRequest) -> Result<ProcessResponse, WorkspaceError> {
        let mut document = match &request.template_path {
            Some(template) if !template.exists() => {
                return Err(WorkspaceError::DocumentNotFound(template.clone()))
            }
            Some(template) => Document::load(template)?,
            None => Document::new(),
        };

        if !request.title.is_empty() {
            document.add_heading(&request.title, 1, None);
        }
        if let Some(content) = request.initial_content.as_deref().filter(|c| !c.is_empty()) {
            document.add_text(content, Position::End, None);
        }

        let shared = share(document);
        let mut document = shared.lock().await;
        let path = self.save_new(&shared, &mut document, &clean_title(&request.title))?;

        info!(path = %path.display(), "Created document");

        Ok(ProcessResponse::success("document created")
            .with_path(path)
            .with_preview(preview(&document.text())))
    }

    /// Copy a native document elsewhere. Only the native format is supported.
    #[instrument(skip_all, fields(document = %request.document_path.display(), format = %request.export_format))]
    pub async fn export_document(&self, request: ExportRequest) -> ProcessResponse {
        match self.run_export(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Export failed");
                ProcessResponse::failure(e.to_string())
            }
        }
    }

    async fn run_export(&self, request: ExportRequest) -> Result<ProcessResponse, WorkspaceError> {
        let source = &request.document_path;
        if !source.exists() {
            return Err(WorkspaceError::DocumentNotFound(source.clone()));
        }
        if request.export_format != DocumentFormat::Sdoc {
            return Err(WorkspaceError::UnsupportedFormat(request.export_format.to_string()));
        }

        let output = request
            .output_path
            .clone()
            .unwrap_or_else(|| export_path(&self.workspace, source, NATIVE_EXTENSION));

        // Don't copy while an edit on this document is in flight
        let cached = self.cache.get(source);
        let _guard = match &cached {
            Some(shared) => Some(shared.lock().await),
            None => None,
        };

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, &output)?;

        info!(output = %output.display(), "Exported document");
        Ok(ProcessResponse::success("export succeeded").with_path(output))
    }

    /// Full text of a document, loading it into the cache if needed
    pub async fn get_document_preview(&self, path: &Path) -> ProcessResponse {
        let shared = match self.cache.get_or_load(path) {
            Ok(shared) => shared,
            Err(e) => return ProcessResponse::failure(e.to_string()),
        };
        let document = shared.lock().await;

        ProcessResponse::success("preview ready")
            .with_path(path)
            .with_preview(document.text())
    }

    /// Native documents directly inside the workspace, sorted
    pub fn list_workspace_files(&self) -> Result<Vec<PathBuf>, WorkspaceError> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.workspace)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == NATIVE_EXTENSION) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Remove a file from the workspace and forget any cached copy
    pub fn delete_workspace_file(&self, file_name: &str) -> Result<PathBuf, WorkspaceError> {
        if !is_plain_file_name(file_name) {
            return Err(WorkspaceError::InvalidFileName(file_name.to_string()));
        }

        let path = self.workspace.join(file_name);
        if !path.is_file() {
            return Err(WorkspaceError::DocumentNotFound(path));
        }

        std::fs::remove_file(&path)?;
        self.cache.remove(&path);

        info!(path = %path.display(), "Deleted workspace file");
        Ok(path)
    }

    /// Forget all open documents. Files on disk are untouched.
    pub fn clear_cache(&self) {
        let count = self.cache.len();
        self.cache.clear();
        info!(count, "Cleared document cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_common::{OperationKind, TableSpec};

    fn orchestrator(dir: &Path) -> Orchestrator {
        Orchestrator::new(dir.join("workspace"), CommandParser::heuristic_only()).unwrap()
    }

    #[tokio::test]
    async fn test_workspace_created() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(dir.path());
        assert!(orchestrator.workspace().is_dir());
    }

    #[tokio::test]
    async fn test_explicit_operations_skip_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(dir.path());

        let request = ProcessRequest::new("ignored").with_operations(vec![
            Operation::add_heading("Report", 1),
            Operation::add_text("Intro"),
        ]);
        let response = orchestrator.process_instruction(request).await;

        assert!(response.success, "{}", response.message);
        assert_eq!(response.preview_text.as_deref(), Some("Report\nIntro"));
        assert_eq!(response.operations_performed.as_ref().map(Vec::len), Some(2));

        let path = response.document_path.unwrap();
        assert!(path.starts_with(orchestrator.workspace()));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("document_"));
        assert!(orchestrator.cache().contains(&path));
    }

    #[tokio::test]
    async fn test_only_invalid_operations_fail() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(dir.path());

        let request = ProcessRequest::new("x").with_operations(vec![
            Operation::new(OperationKind::AddText),
            Operation::new(OperationKind::AddTable),
        ]);
        let response = orchestrator.process_instruction(request).await;

        assert!(!response.success);
        assert_eq!(response.message, NO_VALID_OPERATIONS);
        assert!(orchestrator.list_workspace_files().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_operations_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(dir.path());

        let request = ProcessRequest::new("x").with_operations(vec![
            Operation::add_text("kept"),
            Operation::modify_text("absent", "new"),
            Operation::add_table(TableSpec::new(1, 1)),
        ]);
        let response = orchestrator.process_instruction(request).await;

        let kinds: Vec<_> = response
            .operations_performed
            .unwrap()
            .iter()
            .map(|op| op.kind)
            .collect();
        assert_eq!(kinds, vec![OperationKind::AddText, OperationKind::AddTable]);
    }

    #[tokio::test]
    async fn test_preview_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(dir.path());

        let long = "字".repeat(PREVIEW_CHARS + 20);
        let request = ProcessRequest::new("x").with_operations(vec![Operation::add_text(long.clone())]);
        let response = orchestrator.process_instruction(request).await;

        assert_eq!(response.preview_text.unwrap().chars().count(), PREVIEW_CHARS);

        let full = orchestrator
            .get_document_preview(&response.document_path.unwrap())
            .await;
        assert_eq!(full.preview_text, Some(long));
    }

    #[tokio::test]
    async fn test_create_document() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(dir.path());

        let response = orchestrator
            .create_document(CreateDocumentRequest {
                title: "Weekly Notes".to_string(),
                template_path: None,
                initial_content: Some("First entry".to_string()),
            })
            .await;

        assert!(response.success);
        assert_eq!(response.preview_text.as_deref(), Some("Weekly Notes\nFirst entry"));
        let path = response.document_path.unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("Weekly_Notes_"));
        assert!(orchestrator.cache().contains(&path));
    }

    #[tokio::test]
    async fn test_create_from_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(dir.path());

        let response = orchestrator
            .create_document(CreateDocumentRequest {
                title: "T".to_string(),
                template_path: Some(dir.path().join("missing.sdoc")),
                initial_content: None,
            })
            .await;

        assert!(!response.success);
        assert!(response.message.starts_with("document not found"));
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(dir.path());

        assert!(matches!(
            orchestrator.delete_workspace_file("../config.json"),
            Err(WorkspaceError::InvalidFileName(_))
        ));
        assert!(matches!(
            orchestrator.delete_workspace_file("nope.sdoc"),
            Err(WorkspaceError::DocumentNotFound(_))
        ));
    }
}

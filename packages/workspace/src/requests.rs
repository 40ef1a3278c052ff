//! Request and response shapes at the orchestrator boundary.

use scribe_common::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub instruction: String,

    /// Existing document to edit; a fresh document when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<PathBuf>,

    /// Explicit operations; skips instruction parsing when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<Operation>>,
}

impl ProcessRequest {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            ..Self::default()
        }
    }

    pub fn with_document(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = Some(path.into());
        self
    }

    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = Some(operations);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Sdoc,
    Pdf,
    Html,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Sdoc => "sdoc",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Html => "html",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown document format: {0}")]
pub struct UnknownFormat(String);

impl FromStr for DocumentFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sdoc" => Ok(DocumentFormat::Sdoc),
            "pdf" => Ok(DocumentFormat::Pdf),
            "html" => Ok(DocumentFormat::Html),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub document_path: PathBuf,

    #[serde(default)]
    pub export_format: DocumentFormat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

/// Outcome of every orchestrator request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations_performed: Option<Vec<Operation>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
}

impl ProcessResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            document_path: None,
            operations_performed: None,
            preview_text: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message)
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = Some(path.into());
        self
    }

    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations_performed = Some(operations);
        self
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview_text = Some(preview.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_omits_empty_fields() {
        let json = serde_json::to_value(ProcessResponse::failure("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "nope"}));
    }

    #[test]
    fn test_request_from_json() {
        let request: ProcessRequest = serde_json::from_str(
            r#"{"instruction": "添加：你好", "operations": [{"operation_type": "add_text", "content": "你好"}]}"#,
        )
        .unwrap();
        assert!(request.document_path.is_none());
        assert_eq!(request.operations.unwrap(), vec![Operation::add_text("你好")]);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PDF".parse::<DocumentFormat>().unwrap(), DocumentFormat::Pdf);
        assert!("docx".parse::<DocumentFormat>().is_err());

        let export: ExportRequest = serde_json::from_str(r#"{"document_path": "a.sdoc"}"#).unwrap();
        assert_eq!(export.export_format, DocumentFormat::Sdoc);
    }
}

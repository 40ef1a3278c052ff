use super::report;
use anyhow::{Context, Result};
use clap::Args;
use scribe_common::Operation;
use scribe_workspace::{Orchestrator, ProcessRequest};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Natural-language instruction, e.g. "添加标题“概述”"
    pub instruction: String,

    /// Document to edit (a new document when omitted)
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// JSON file with explicit operations; skips instruction parsing
    #[arg(long)]
    pub ops: Option<PathBuf>,
}

fn read_operations(path: &Path) -> Result<Vec<Operation>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read operations file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("invalid operations in {}", path.display()))
}

pub async fn process(args: ProcessArgs, orchestrator: &Orchestrator) -> Result<()> {
    let mut request = ProcessRequest::new(args.instruction);
    request.document_path = args.document;
    if let Some(path) = &args.ops {
        request.operations = Some(read_operations(path)?);
    }

    report(&orchestrator.process_instruction(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_operations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.json");
        std::fs::write(
            &path,
            r#"[{"operation_type": "add_heading", "content": "概述", "metadata": {"level": 1}}]"#,
        )
        .unwrap();

        assert_eq!(read_operations(&path).unwrap(), vec![Operation::add_heading("概述", 1)]);
        assert!(read_operations(&dir.path().join("missing.json")).is_err());
    }
}

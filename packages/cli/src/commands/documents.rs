use super::report;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use scribe_workspace::{Orchestrator, ProcessResponse};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Document to show
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// File name inside the workspace
    pub file_name: String,
}

pub async fn preview(args: PreviewArgs, orchestrator: &Orchestrator) -> Result<()> {
    report(&orchestrator.get_document_preview(&args.path).await)
}

pub fn list(orchestrator: &Orchestrator) -> Result<()> {
    let files = orchestrator.list_workspace_files()?;

    if files.is_empty() {
        eprintln!("{}", "No documents in workspace".yellow());
    }
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(())
}

pub fn delete(args: DeleteArgs, orchestrator: &Orchestrator) -> Result<()> {
    let path = orchestrator.delete_workspace_file(&args.file_name)?;
    report(&ProcessResponse::success("document deleted").with_path(path))
}

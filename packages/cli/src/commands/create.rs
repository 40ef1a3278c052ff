use super::report;
use anyhow::Result;
use clap::Args;
use scribe_workspace::{CreateDocumentRequest, Orchestrator};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Document title, also used for the file name
    pub title: String,

    /// Existing document to start from
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// First paragraph
    #[arg(short, long)]
    pub content: Option<String>,
}

pub async fn create(args: CreateArgs, orchestrator: &Orchestrator) -> Result<()> {
    let request = CreateDocumentRequest {
        title: args.title,
        template_path: args.template,
        initial_content: args.content,
    };

    report(&orchestrator.create_document(request).await)
}

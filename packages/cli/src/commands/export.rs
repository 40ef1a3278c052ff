use super::report;
use anyhow::Result;
use clap::Args;
use scribe_workspace::{DocumentFormat, ExportRequest, Orchestrator};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Document to export
    pub path: PathBuf,

    /// Target format (sdoc, pdf, html)
    #[arg(short, long, default_value = "sdoc")]
    pub format: DocumentFormat,

    /// Output file (defaults to <workspace>/<name>_export.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn export(args: ExportArgs, orchestrator: &Orchestrator) -> Result<()> {
    let request = ExportRequest {
        document_path: args.path,
        export_format: args.format,
        output_path: args.output,
    };

    report(&orchestrator.export_document(request).await)
}

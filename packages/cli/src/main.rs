mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    create, delete, export, list, preview, process, CreateArgs, DeleteArgs, ExportArgs,
    PreviewArgs, ProcessArgs,
};
use scribe_workspace::Orchestrator;
use std::path::PathBuf;
use tracing::debug;

/// Scribe - edit documents with natural-language instructions
#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./scribe.config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workspace directory (overrides config)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply an instruction to a document
    Process(ProcessArgs),

    /// Create a new document
    Create(CreateArgs),

    /// Export a document
    Export(ExportArgs),

    /// Print the full text of a document
    Preview(PreviewArgs),

    /// List documents in the workspace
    List,

    /// Delete a document from the workspace
    Delete(DeleteArgs),
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot get current directory")?;
    let config = config::resolve(&cwd, cli.config.as_deref(), cli.workspace)?;
    debug!(workspace = %config.workspace.display(), model = %config.chat_model, "Resolved config");
    let orchestrator = Orchestrator::from_config(&config)?;

    match cli.command {
        Command::Process(args) => process(args, &orchestrator).await,
        Command::Create(args) => create(args, &orchestrator).await,
        Command::Export(args) => export(args, &orchestrator).await,
        Command::Preview(args) => preview(args, &orchestrator).await,
        Command::List => list(&orchestrator),
        Command::Delete(args) => delete(args, &orchestrator),
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the JSON response
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

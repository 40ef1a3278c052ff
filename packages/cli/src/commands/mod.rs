pub mod create;
pub mod documents;
pub mod export;
pub mod process;

pub use create::{create, CreateArgs};
pub use documents::{delete, list, preview, DeleteArgs, PreviewArgs};
pub use export::{export, ExportArgs};
pub use process::{process, ProcessArgs};

use anyhow::{bail, Result};
use scribe_workspace::ProcessResponse;

/// Print the response as JSON; a failed response becomes an error
pub fn report(response: &ProcessResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);

    if !response.success {
        bail!("{}", response.message);
    }
    Ok(())
}

use anyhow::Result;
use scribe_workspace::{AgentConfig, DEFAULT_CONFIG_NAME};
use std::path::{Path, PathBuf};

/// Config for this invocation: file (explicit or `scribe.config.json` in
/// `cwd`), then environment, then the `--workspace` flag.
pub fn resolve(cwd: &Path, config_path: Option<&Path>, workspace: Option<PathBuf>) -> Result<AgentConfig> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_NAME));

    let mut config = AgentConfig::load(&path)?.with_env();

    if let Some(workspace) = workspace {
        config.workspace = workspace;
    }
    if config.workspace.is_relative() {
        config.workspace = cwd.join(&config.workspace);
    }

    Ok(config)
}

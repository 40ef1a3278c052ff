use crate::WorkspaceError;
use scribe_parser::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use scribe_parser::{CommandParser, OpenAiProvider, ParserOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_NAME: &str = "scribe.config.json";

/// Agent configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Directory where documents are written
    pub workspace: PathBuf,

    pub chat_model: String,

    /// Empty disables the model tier
    pub api_key: String,

    pub api_base: String,

    pub temperature: f32,

    pub completion_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("data/workspace"),
            chat_model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            api_base: DEFAULT_BASE_URL.to_string(),
            temperature: 0.3,
            completion_timeout_secs: 30,
        }
    }
}

impl AgentConfig {
    /// Load config from a file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| WorkspaceError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `scribe.config.json` from a directory
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        Self::load(dir.as_ref().join(DEFAULT_CONFIG_NAME))
    }

    /// Apply `SCRIBE_*` environment overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. `SCRIBE_API_KEY` wins over
    /// `OPENAI_API_KEY`; empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get("SCRIBE_API_KEY").or_else(|| get("OPENAI_API_KEY")) {
            self.api_key = key;
        }
        if let Some(base) = get("SCRIBE_API_BASE") {
            self.api_base = base;
        }
        if let Some(model) = get("SCRIBE_MODEL") {
            self.chat_model = model;
        }
        if let Some(workspace) = get("SCRIBE_WORKSPACE") {
            self.workspace = PathBuf::from(workspace);
        }
        self
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            model: self.chat_model.clone(),
            temperature: self.temperature,
            timeout: Duration::from_secs(self.completion_timeout_secs),
            ..ParserOptions::default()
        }
    }

    /// Model-backed parser when an API key is configured, keyword-only otherwise
    pub fn build_parser(&self) -> CommandParser {
        if self.api_key.is_empty() {
            info!("No API key configured, instructions use keyword parsing only");
            return CommandParser::heuristic_only();
        }

        let provider = OpenAiProvider::with_base_url(self.api_key.clone(), self.api_base.clone());
        CommandParser::new(Arc::new(provider), self.parser_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "workspace": "docs/out",
            "chat_model": "gpt-4o-mini",
            "completion_timeout_secs": 10
        }"#;

        let config: AgentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.workspace, PathBuf::from("docs/out"));
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.completion_timeout_secs, 10);
        assert_eq!(config.api_base, DEFAULT_BASE_URL);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AgentConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();

        assert!(matches!(
            AgentConfig::load_from_dir(dir.path()),
            Err(WorkspaceError::Config { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-openai"),
            ("SCRIBE_API_KEY", "sk-scribe"),
            ("SCRIBE_MODEL", "local-model"),
            ("SCRIBE_API_BASE", "  "),
        ]
        .into_iter()
        .collect();

        let config = AgentConfig::default()
            .with_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.api_key, "sk-scribe");
        assert_eq!(config.chat_model, "local-model");
        assert_eq!(config.api_base, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parser_options_follow_config() {
        let config = AgentConfig {
            temperature: 0.1,
            completion_timeout_secs: 7,
            ..AgentConfig::default()
        };
        let options = config.parser_options();
        assert_eq!(options.timeout, Duration::from_secs(7));
        assert_eq!(options.temperature, 0.1);
        assert_eq!(options.model, DEFAULT_MODEL);

        let parser = AgentConfig {
            api_key: "sk-scribe".to_string(),
            ..config
        }
        .build_parser();
        assert_eq!(parser.options().timeout, Duration::from_secs(7));
    }
}

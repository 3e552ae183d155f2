//! Formatter configuration: source validation, model selection, and backend
//! settings, loadable from TOML.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract::{CleanupPreset, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_CONTENT_LENGTH};
use crate::format::{CitationScope, DEFAULT_MAX_CHUNK_CHARS};
use crate::infer::HeadingRule;

/// Default language model name.
pub const DEFAULT_MODEL: &str = "en_core_rules";

/// Which formatting backend produces the block structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local heuristics only
    #[default]
    Local,
    /// Rewrite through a chat-completions endpoint, then classify locally
    Remote,
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "remote" => Ok(BackendKind::Remote),
            other => Err(Error::Config(format!("unknown backend '{}'", other))),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BackendKind::Local => "local",
            BackendKind::Remote => "remote",
        })
    }
}

/// Settings for the remote formatting backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Chat-completions URL
    pub endpoint: String,
    /// Model requested from the endpoint
    pub model: String,
    /// Environment variable holding the API key (none = no auth header)
    pub api_key_env: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum characters per chunk sent to the endpoint
    pub max_chunk_chars: usize,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            timeout_secs: 60,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

/// Top-level formatter configuration.
///
/// Every field has a default, so an empty TOML document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Accepted source extensions (lowercase, no dot)
    pub allowed_extensions: Vec<String>,
    /// Maximum source size in bytes
    pub max_content_length: u64,
    /// Language model name passed to [`crate::nlp::load_model`]
    pub model: String,
    /// Formatting backend
    pub backend: BackendKind,
    /// Which paragraphs receive citation rewriting
    pub citation_scope: CitationScope,
    /// Basic-mode heading rule
    pub heading_rule: HeadingRule,
    /// Cleanup applied to extracted text
    pub cleanup: CleanupPreset,
    /// Remote backend settings
    pub remote: RemoteSettings,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            model: DEFAULT_MODEL.to_string(),
            backend: BackendKind::Local,
            citation_scope: CitationScope::AllParagraphs,
            heading_rule: HeadingRule::LengthOnly,
            cleanup: CleanupPreset::Standard,
            remote: RemoteSettings::default(),
        }
    }
}

impl FormatterConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.allowed_extensions.is_empty() {
            return Err(Error::Config("allowed_extensions must not be empty".into()));
        }
        if self.max_content_length == 0 {
            return Err(Error::Config("max_content_length must be positive".into()));
        }
        if self.model.trim().is_empty() {
            return Err(Error::Config("model must not be empty".into()));
        }
        if self.remote.max_chunk_chars == 0 {
            return Err(Error::Config("remote.max_chunk_chars must be positive".into()));
        }
        if self.remote.timeout_secs == 0 {
            return Err(Error::Config("remote.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

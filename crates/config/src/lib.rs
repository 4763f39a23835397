//! Configuration loading, validation, and management for ClawRecall.
//!
//! Loads configuration from `~/.clawrecall/config.toml` with environment
//! variable overrides. Validates all settings at startup: an invalid file
//! stops the recall hook from initializing rather than failing per turn.

use clawrecall_core::decay::{DecayTable, DecayTier};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound for `max_results`.
pub const MAX_RESULTS_LIMIT: usize = 20;

/// The root configuration structure.
///
/// Maps directly to `~/.clawrecall/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecallConfig {
    /// Master switch for session recall
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of excerpts injected per turn (1–20)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Minimum decayed score an excerpt needs to be injected (0.0–1.0)
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Prompts shorter than this (in characters) never trigger recall
    #[serde(default = "default_min_prompt_length")]
    pub min_prompt_length: usize,

    /// Agent whose sessions are searched
    #[serde(default = "default_agent_id")]
    pub agent_id: String,

    /// Directory that relative hit paths are resolved against when dating
    /// transcripts. Defaults to `~/.openclaw/agents/<agent_id>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_dir: Option<PathBuf>,

    /// Search backend settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Custom decay tiers (empty = built-in table)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decay: Vec<DecayTierConfig>,
}

fn default_true() -> bool {
    true
}
fn default_max_results() -> usize {
    3
}
fn default_min_score() -> f64 {
    0.3
}
fn default_min_prompt_length() -> usize {
    10
}
fn default_agent_id() -> String {
    "main".into()
}

/// How the external search command is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Executable providing `memory search --json`
    #[serde(default = "default_search_command")]
    pub command: String,

    /// Arguments placed before `memory search` (for wrappers such as `npx`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Hard deadline for one search call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Larger stdout than this is treated as a failed search
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,

    /// The prompt is cut to this many characters before being used as a query
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
}

fn default_search_command() -> String {
    "openclaw".into()
}
fn default_timeout_ms() -> u64 {
    8_000
}
fn default_max_output_bytes() -> usize {
    1024 * 1024
}
fn default_max_query_chars() -> usize {
    500
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            command: default_search_command(),
            args: vec![],
            timeout_ms: default_timeout_ms(),
            max_output_bytes: default_max_output_bytes(),
            max_query_chars: default_max_query_chars(),
        }
    }
}

/// One `[[decay]]` entry. Omit `max_age_days` on the last tier to make it
/// cover all remaining ages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecayTierConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_days: Option<f64>,

    pub factor: f64,
}

impl From<&DecayTierConfig> for DecayTier {
    fn from(tier: &DecayTierConfig) -> Self {
        DecayTier {
            max_age_days: tier.max_age_days.unwrap_or(f64::INFINITY),
            factor: tier.factor,
        }
    }
}

impl RecallConfig {
    /// Load configuration from the default path (~/.clawrecall/config.toml).
    ///
    /// Environment variables override the file:
    /// - `CLAWRECALL_ENABLED`
    /// - `CLAWRECALL_AGENT_ID`
    /// - `CLAWRECALL_SEARCH_COMMAND`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_path())
    }

    /// Load from `path`, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(enabled) = lookup("CLAWRECALL_ENABLED") {
            self.enabled = parse_bool(&enabled).ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "CLAWRECALL_ENABLED must be true/false, got '{enabled}'"
                ))
            })?;
        }

        if let Some(agent_id) = lookup("CLAWRECALL_AGENT_ID") {
            self.agent_id = agent_id;
        }

        if let Some(command) = lookup("CLAWRECALL_SEARCH_COMMAND") {
            self.search.command = command;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".clawrecall")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Directory that relative hit paths are resolved against.
    pub fn resolved_sessions_dir(&self) -> PathBuf {
        match &self.sessions_dir {
            Some(dir) => dir.clone(),
            None => dirs_home()
                .join(".openclaw")
                .join("agents")
                .join(&self.agent_id),
        }
    }

    /// The decay table, built-in unless `[[decay]]` tiers are configured.
    pub fn decay_table(&self) -> Result<DecayTable, ConfigError> {
        if self.decay.is_empty() {
            return Ok(DecayTable::default());
        }
        DecayTable::new(self.decay.iter().map(DecayTier::from).collect())
            .map_err(|e| ConfigError::ValidationError(format!("decay: {e}")))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_results must be between 1 and {MAX_RESULTS_LIMIT}"
            )));
        }

        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(ConfigError::ValidationError(
                "min_score must be between 0.0 and 1.0".into(),
            ));
        }

        if self.agent_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "agent_id must not be empty".into(),
            ));
        }

        if self.search.command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "search.command must not be empty".into(),
            ));
        }

        if self.search.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "search.timeout_ms must be > 0".into(),
            ));
        }

        if self.search.max_output_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "search.max_output_bytes must be > 0".into(),
            ));
        }

        if self.search.max_query_chars == 0 {
            return Err(ConfigError::ValidationError(
                "search.max_query_chars must be > 0".into(),
            ));
        }

        self.decay_table()?;
        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: default_max_results(),
            min_score: default_min_score(),
            min_prompt_length: default_min_prompt_length(),
            agent_id: default_agent_id(),
            sessions_dir: None,
            search: SearchConfig::default(),
            decay: vec![],
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for clawrecall_core::Error {
    fn from(err: ConfigError) -> Self {
        clawrecall_core::Error::Config {
            message: err.to_string(),
        }
    }
}

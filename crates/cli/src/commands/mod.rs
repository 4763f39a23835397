//! Subcommand implementations.

pub mod config_cmd;
pub mod doctor;
pub mod hook;
pub mod search;

use clawrecall_config::{ConfigError, RecallConfig};
use std::path::{Path, PathBuf};

/// Load the configuration from `--config` or the default location,
/// with environment overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<RecallConfig, ConfigError> {
    RecallConfig::load_with_env(&config_path(path))
}

/// The config file in effect.
pub fn config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(RecallConfig::config_path)
}

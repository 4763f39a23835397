//! `clawrecall config` — Configuration management commands.

use clawrecall_config::RecallConfig;
use clawrecall_core::{Error, Result};
use std::path::Path;

pub async fn validate(config_path: Option<&Path>) -> Result<()> {
    println!("🔍 Validating configuration...");

    match super::load_config(config_path) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if !config.enabled {
                warnings.push("Session recall is disabled (enabled = false)");
            }

            if config.min_score == 0.0 {
                warnings.push("min_score = 0 injects every session hit, however weak");
            }

            if config.min_prompt_length == 0 {
                warnings.push("min_prompt_length = 0 searches even for empty prompts");
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Agent:       {}", config.agent_id);
            println!("   Results:     up to {} (min score {:.2})", config.max_results, config.min_score);
            println!("   Min prompt:  {} chars", config.min_prompt_length);
            println!("   Search:      {} (timeout {}ms)", config.search.command, config.search.timeout_ms);
            println!("   Sessions:    {}", config.resolved_sessions_dir().display());
            println!(
                "   Decay:       {}",
                if config.decay.is_empty() { "built-in" } else { "custom" }
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config).map_err(|e| Error::Config {
        message: e.to_string(),
    })?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", super::config_path(config_path).display());
    Ok(())
}

pub async fn init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = super::config_path(config_path);
    if path.exists() && !force {
        println!("⚠️  {} already exists. Run with --force to overwrite.", path.display());
        return Ok(());
    }

    write_default(&path)?;
    println!("✅ Wrote default configuration to {}", path.display());
    Ok(())
}

fn write_default(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, RecallConfig::default_toml())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_valid() {
        let path = RecallConfig::config_path();
        assert!(path.to_str().unwrap().contains("config.toml"));
    }

    #[test]
    fn written_default_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        write_default(&path).unwrap();

        let config = RecallConfig::load_from(&path).unwrap();
        assert_eq!(config, RecallConfig::default());
    }
}

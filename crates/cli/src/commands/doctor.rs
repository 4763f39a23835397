//! `clawrecall doctor` — Diagnose system health.

use clawrecall_core::Result;
use std::path::{Path, PathBuf};

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    println!("🩺 ClawRecall Doctor — System Diagnostics");
    println!("========================================\n");

    let issues = diagnose(config_path);

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

/// Print one line per check and return the number of issues found.
fn diagnose(config_path: Option<&Path>) -> usize {
    let mut issues = 0;

    let path = super::config_path(config_path);
    if !path.exists() {
        println!("  ⚠️  No config file at {} — using defaults", path.display());
    }

    let config = match super::load_config(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("     Fix the configuration before running other checks.");
            return issues + 1;
        }
    };

    if !config.enabled {
        println!("  ⚠️  Session recall is disabled");
        issues += 1;
    }

    match find_executable(&config.search.command) {
        Some(found) => println!("  ✅ Search command found: {}", found.display()),
        None => {
            println!("  ❌ Search command '{}' not found on PATH", config.search.command);
            issues += 1;
        }
    }

    let sessions_dir = config.resolved_sessions_dir();
    if sessions_dir.is_dir() {
        println!("  ✅ Sessions directory exists: {}", sessions_dir.display());
    } else {
        println!(
            "  ⚠️  Sessions directory missing: {} — hits will be treated as recent",
            sessions_dir.display()
        );
        issues += 1;
    }

    issues
}

/// Resolve `command` the way a shell would: paths as-is, bare names via `PATH`.
fn find_executable(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| {
        let full = dir.join(command);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{command}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

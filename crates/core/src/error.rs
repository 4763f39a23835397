//! Error types for the ClawRecall domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for ClawRecall commands.
///
/// Search failures are not part of it: the recall pipeline recovers from
/// them and the host never sees an error.
#[derive(Debug, Error)]
pub enum Error {
    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- I/O ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the external search call.
///
/// None of these reach the host: the recall pipeline logs them and
/// continues the turn without augmentation.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Failed to start search command '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("Search timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Search output exceeded {limit_bytes} bytes")]
    OutputTooLarge { limit_bytes: usize },

    #[error("Search command failed (exit code: {code}): {stderr}")]
    Failed { code: i32, stderr: String },

    #[error("Search I/O error: {0}")]
    Io(String),
}

/// Violations of the decay table invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecayTableError {
    #[error("decay table must contain at least one tier")]
    Empty,

    #[error("tier {index}: factor {factor} must be in (0, 1]")]
    FactorOutOfRange { index: usize, factor: f64 },

    #[error("tier {index}: max_age_days {max_age_days} must be greater than the previous tier's bound")]
    NotAscending { index: usize, max_age_days: f64 },

    #[error("tier {index}: factor {factor} is larger than the previous tier's factor")]
    FactorIncreases { index: usize, factor: f64 },

    #[error("the last tier must be unbounded")]
    LastTierBounded,
}

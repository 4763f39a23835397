//! Gating policy — decides per turn whether recall runs at all.
//!
//! Synthetic wake-ups (heartbeats, system notices) and trivially short
//! prompts are filtered out here, before the search backend is touched.

use clawrecall_config::RecallConfig;

/// Why a prompt was not sent to the search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Recall is switched off in configuration
    Disabled,
    /// The event carried no prompt
    MissingPrompt,
    /// The prompt is shorter than `min_prompt_length`
    TooShort,
    /// The prompt mentions a heartbeat
    Heartbeat,
    /// The prompt is a `[system ...]` message
    SystemMessage,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::Disabled => "disabled",
            Self::MissingPrompt => "missing prompt",
            Self::TooShort => "prompt too short",
            Self::Heartbeat => "heartbeat prompt",
            Self::SystemMessage => "system message",
        };
        f.write_str(reason)
    }
}

/// Outcome of [`should_recall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Skip(SkipReason),
}

impl GateDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Decide whether `prompt` should trigger a session search.
pub fn should_recall(prompt: Option<&str>, config: &RecallConfig) -> GateDecision {
    if !config.enabled {
        return GateDecision::Skip(SkipReason::Disabled);
    }

    let Some(prompt) = prompt else {
        return GateDecision::Skip(SkipReason::MissingPrompt);
    };

    if prompt.chars().count() < config.min_prompt_length {
        return GateDecision::Skip(SkipReason::TooShort);
    }

    let lower = prompt.to_lowercase();
    if lower.contains("heartbeat") {
        return GateDecision::Skip(SkipReason::Heartbeat);
    }
    if lower.starts_with("[system") {
        return GateDecision::Skip(SkipReason::SystemMessage);
    }

    GateDecision::Proceed
}

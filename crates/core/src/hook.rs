//! Host boundary — the "before agent start" event and its reply.
//!
//! The host fires the event once per turn with the upcoming prompt and
//! prepends whatever `prependContext` comes back. Field names follow the
//! host's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Fired by the host just before the agent starts a turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeforeAgentStartEvent {
    /// The user-facing prompt of the upcoming turn.
    #[serde(default)]
    pub prompt: Option<String>,

    /// Host session identifier, only used for log correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_key: Option<String>,
}

impl BeforeAgentStartEvent {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            session_key: None,
        }
    }
}

/// The reply to [`BeforeAgentStartEvent`]: a context block or nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend_context: Option<String>,
}

impl HookResponse {
    /// No augmentation for this turn.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn prepend(context: impl Into<String>) -> Self {
        Self {
            prepend_context: Some(context.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prepend_context.is_none()
    }
}

impl From<Option<String>> for HookResponse {
    fn from(context: Option<String>) -> Self {
        Self {
            prepend_context: context,
        }
    }
}

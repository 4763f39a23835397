//! Session recall for ClawRecall.
//!
//! Turns raw search hits over past session transcripts into one context
//! block for the agent's next turn:
//!
//! 1. **Gate** — cheap prompt checks before any external call ([`gate`])
//! 2. **Search** — over-fetch candidates from the backend ([`cli_backend`], [`response`])
//! 3. **Decay** — discount each hit by the age of its transcript ([`decay`], [`age`])
//! 4. **Select** — threshold, order and cap the scored hits ([`select`])
//! 5. **Format** — render the survivors into the injected block ([`format`])
//!
//! [`SessionRecall`] wires the stages together. Every failure along the way
//! degrades to "no context"; the host never sees an error.

pub mod age;
pub mod cli_backend;
pub mod decay;
pub mod format;
pub mod gate;
pub mod pipeline;
pub mod response;
pub mod select;

pub use age::FsAgeSource;
pub use cli_backend::CliSearchBackend;
pub use decay::decay_factor;
pub use format::{age_label, format_context, truncate_snippet};
pub use gate::{GateDecision, SkipReason, should_recall};
pub use pipeline::SessionRecall;
pub use response::{extract_json_object, parse_hits};
pub use select::{SelectionPolicy, rank};

#[cfg(test)]
pub(crate) mod test_helpers;

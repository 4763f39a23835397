//! # ClawRecall Core
//!
//! Domain types, traits, and error definitions for ClawRecall, the session
//! recall engine that prepends relevant excerpts from an agent's past
//! sessions to its next turn.
//!
//! This crate does no I/O. It defines the value types that
//! flow through the recall pipeline and the two seams to the outside world:
//!
//! - [`SearchBackend`] — the full-text search service that returns raw hits
//! - [`AgeSource`] — the clock/filesystem lookup that dates each hit
//!
//! Implementations live in `clawrecall-recall`.

pub mod age;
pub mod decay;
pub mod error;
pub mod hit;
pub mod hook;
pub mod search;

// Re-export key types at crate root for ergonomics
pub use age::AgeSource;
pub use decay::{DEFAULT_DECAY_TIERS, DecayTable, DecayTier};
pub use error::{DecayTableError, Error, Result, SearchError};
pub use hit::{RawHit, SESSIONS_SOURCE, ScoredResult};
pub use hook::{BeforeAgentStartEvent, HookResponse};
pub use search::{SearchBackend, SearchRequest};

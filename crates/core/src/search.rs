//! Search backend trait — the external full-text/semantic index over sessions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::hit::RawHit;

/// How many candidates to request per result that will be shown.
pub const OVERFETCH_MULTIPLIER: usize = 3;

/// One query against the search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query (the upcoming prompt).
    pub query: String,

    /// Agent whose sessions are searched.
    pub agent_id: String,

    /// Number of candidates wanted.
    pub max_results: usize,

    /// Backend-side score threshold.
    pub min_score: f64,
}

impl SearchRequest {
    /// Build the over-fetching request for a recall that will show at most
    /// `max_results` hits scoring at least `min_score` after decay.
    ///
    /// Decay only ever lowers scores, so the backend is asked for three
    /// times the candidates at half the threshold. Filtering with the final
    /// threshold happens after decay.
    pub fn overfetch(
        query: impl Into<String>,
        agent_id: impl Into<String>,
        max_results: usize,
        min_score: f64,
    ) -> Self {
        Self {
            query: query.into(),
            agent_id: agent_id.into(),
            max_results: max_results * OVERFETCH_MULTIPLIER,
            min_score: min_score / 2.0,
        }
    }
}

/// The external search service.
///
/// Implementations: the `openclaw memory search` CLI, scripted backends in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// The backend name (e.g., "cli").
    fn name(&self) -> &str;

    /// Run a query. Hits come back in backend rank order.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawHit>, SearchError>;
}

//! The recall pipeline: gate → search → decay → select → format.
//!
//! [`SessionRecall`] is built once from a validated [`RecallConfig`] and is
//! then read-only. Each turn is handled independently, so one instance can
//! serve concurrent conversations.

use clawrecall_config::{ConfigError, RecallConfig};
use clawrecall_core::age::AgeSource;
use clawrecall_core::decay::DecayTable;
use clawrecall_core::hit::ScoredResult;
use clawrecall_core::hook::{BeforeAgentStartEvent, HookResponse};
use clawrecall_core::search::{SearchBackend, SearchRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::age::FsAgeSource;
use crate::cli_backend::CliSearchBackend;
use crate::format::format_context;
use crate::gate::{GateDecision, should_recall};
use crate::select::{SelectionPolicy, rank};

/// Recalls excerpts from past sessions for the agent's next turn.
pub struct SessionRecall {
    config: RecallConfig,
    decay: DecayTable,
    backend: Arc<dyn SearchBackend>,
    ages: Arc<dyn AgeSource>,
}

impl SessionRecall {
    /// Build a recall pipeline. Fails if the configuration is invalid.
    pub fn new(
        config: RecallConfig,
        backend: Arc<dyn SearchBackend>,
        ages: Arc<dyn AgeSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let decay = config.decay_table()?;
        Ok(Self {
            config,
            decay,
            backend,
            ages,
        })
    }

    /// Production wiring: the `memory search` CLI and filesystem ages.
    pub fn from_config(config: RecallConfig) -> Result<Self, ConfigError> {
        let backend = Arc::new(CliSearchBackend::from_config(&config.search));
        let ages = Arc::new(FsAgeSource::new(config.resolved_sessions_dir()));
        Self::new(config, backend, ages)
    }

    pub fn config(&self) -> &RecallConfig {
        &self.config
    }

    /// Host hook: answer a "before agent start" event.
    pub async fn before_agent_start(&self, event: &BeforeAgentStartEvent) -> HookResponse {
        let context = self.recall(event.prompt.as_deref()).await;
        if let (Some(context), Some(session)) = (&context, &event.session_key) {
            debug!(session = %session, bytes = context.len(), "Prepending session recall");
        }
        context.into()
    }

    /// The context block for `prompt`, or `None` when nothing should be injected.
    pub async fn recall(&self, prompt: Option<&str>) -> Option<String> {
        if let GateDecision::Skip(reason) = should_recall(prompt, &self.config) {
            debug!(%reason, "Session recall skipped");
            return None;
        }
        let prompt = prompt?;

        let results = self.search(prompt).await;
        if results.is_empty() {
            debug!("No session excerpts passed selection");
            return None;
        }

        info!(count = results.len(), "Injecting session excerpts");
        Some(format_context(&results))
    }

    /// Search and rank without gating.
    ///
    /// Backend failures are logged and yield no results.
    pub async fn search(&self, prompt: &str) -> Vec<ScoredResult> {
        let query: String = prompt
            .trim()
            .chars()
            .take(self.config.search.max_query_chars)
            .collect();
        if query.is_empty() {
            return Vec::new();
        }

        let request = SearchRequest::overfetch(
            query,
            self.config.agent_id.clone(),
            self.config.max_results,
            self.config.min_score,
        );

        let hits = match self.backend.search(&request).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "Session search failed");
                return Vec::new();
            }
        };

        let candidates = hits.len();
        // Age lookups stat files, so ranking runs on the blocking pool
        let ages = Arc::clone(&self.ages);
        let decay = self.decay.clone();
        let policy = SelectionPolicy::from(&self.config);
        let ranked = match tokio::task::spawn_blocking(move || {
            rank(hits, ages.as_ref(), &decay, policy)
        })
        .await
        {
            Ok(ranked) => ranked,
            Err(e) => {
                warn!(error = %e, "Ranking task failed");
                return Vec::new();
            }
        };
        debug!(candidates, selected = ranked.len(), "Ranked session hits");
        ranked
    }
}

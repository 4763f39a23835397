//! Shared test helpers for recall tests.

use async_trait::async_trait;
use clawrecall_core::age::AgeSource;
use clawrecall_core::error::SearchError;
use clawrecall_core::hit::{RawHit, SESSIONS_SOURCE};
use clawrecall_core::search::{SearchBackend, SearchRequest};
use std::collections::HashMap;
use std::sync::Mutex;

/// Build a hit tagged as coming from a session transcript.
pub fn session_hit(path: &str, score: f64, snippet: &str) -> RawHit {
    RawHit {
        path: path.into(),
        start_line: 1,
        end_line: 10,
        score,
        snippet: snippet.into(),
        source: SESSIONS_SOURCE.into(),
    }
}

/// Ages looked up from a fixed table; unknown paths have no age.
#[derive(Default)]
pub struct FixedAges {
    ages: HashMap<String, f64>,
}

impl FixedAges {
    pub fn new<'a>(ages: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            ages: ages
                .into_iter()
                .map(|(path, age)| (path.to_string(), age))
                .collect(),
        }
    }
}

impl AgeSource for FixedAges {
    fn age_days(&self, path: &str) -> Option<f64> {
        self.ages.get(path).copied()
    }
}

/// A backend that returns one scripted outcome and records every request.
pub struct ScriptedBackend {
    outcome: Result<Vec<RawHit>, SearchError>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedBackend {
    pub fn returning(hits: Vec<RawHit>) -> Self {
        Self {
            outcome: Ok(hits),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: SearchError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawHit>, SearchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

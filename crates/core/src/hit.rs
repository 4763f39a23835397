//! Search hits before and after recency scoring.

use serde::{Deserialize, Serialize};

/// The `source` tag the search backend puts on hits from session transcripts.
///
/// Only these hits are ever recalled; memory files and other corpora are
/// dropped before scoring.
pub const SESSIONS_SOURCE: &str = "sessions";

/// An unscored, unmodified search result from the external backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHit {
    /// Locator of the transcript the hit came from
    pub path: String,

    /// First line of the matched excerpt (passed through, not used for ranking)
    #[serde(default)]
    pub start_line: u32,

    /// Last line of the matched excerpt
    #[serde(default)]
    pub end_line: u32,

    /// Backend relevance score in [0, 1]
    pub score: f64,

    /// The matched text
    #[serde(default)]
    pub snippet: String,

    /// Origin category ("sessions", "memory", ...)
    #[serde(default)]
    pub source: String,
}

impl RawHit {
    /// Whether this hit came from a session transcript.
    pub fn is_session(&self) -> bool {
        self.source == SESSIONS_SOURCE
    }
}

/// A [`RawHit`] with its recency discount applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    /// The hit as the backend returned it.
    pub hit: RawHit,

    /// Age of the source transcript in days (0 when unknown).
    pub age_in_days: f64,

    /// Multiplier taken from the decay table for `age_in_days`.
    pub decay_factor: f64,

    /// Copy of `hit.score`.
    pub raw_score: f64,

    /// `raw_score * decay_factor`, the value used for filtering and ordering.
    pub score: f64,
}

impl ScoredResult {
    pub fn new(hit: RawHit, age_in_days: f64, decay_factor: f64) -> Self {
        let raw_score = hit.score;
        Self {
            hit,
            age_in_days,
            decay_factor,
            raw_score,
            score: raw_score * decay_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_hit_parses_backend_field_names() {
        let json = r#"{
            "path": "sessions/abc.jsonl",
            "startLine": 12,
            "endLine": 18,
            "score": 0.72,
            "snippet": "we decided to pin tokio",
            "source": "sessions"
        }"#;
        let hit: RawHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.start_line, 12);
        assert_eq!(hit.end_line, 18);
        assert!(hit.is_session());
    }

    #[test]
    fn raw_hit_tolerates_missing_optional_fields() {
        let hit: RawHit = serde_json::from_str(r#"{"path": "MEMORY.md", "score": 0.4}"#).unwrap();
        assert_eq!(hit.start_line, 0);
        assert!(hit.snippet.is_empty());
        assert!(!hit.is_session());
    }

    #[test]
    fn scored_result_multiplies_score() {
        let hit = RawHit {
            path: "sessions/a.jsonl".into(),
            start_line: 1,
            end_line: 2,
            score: 0.9,
            snippet: "x".into(),
            source: SESSIONS_SOURCE.into(),
        };
        let scored = ScoredResult::new(hit, 100.0, 0.2);
        assert_eq!(scored.raw_score, 0.9);
        assert!((scored.score - 0.18).abs() < 1e-9);

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["hit"]["score"], 0.9);
        assert_eq!(json["decayFactor"], 0.2);
        assert_eq!(json["ageInDays"], 100.0);
    }
}

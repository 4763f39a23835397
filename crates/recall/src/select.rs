//! Selector — scores, thresholds, orders and caps session hits.

use clawrecall_config::RecallConfig;
use clawrecall_core::age::AgeSource;
use clawrecall_core::decay::DecayTable;
use clawrecall_core::hit::{RawHit, ScoredResult};

use crate::decay::{decay_factor, normalize_age};

/// The two knobs of selection, lifted from [`RecallConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    /// Cap on the number of results
    pub max_results: usize,
    /// Minimum decayed score
    pub min_score: f64,
}

impl From<&RecallConfig> for SelectionPolicy {
    fn from(config: &RecallConfig) -> Self {
        Self {
            max_results: config.max_results,
            min_score: config.min_score,
        }
    }
}

/// Rank backend hits for injection.
///
/// Non-session hits are dropped, every remaining hit is decayed by the age
/// of its transcript, and the threshold is applied to the *decayed* score:
/// an old hit can fall out even when its raw score would have passed.
/// Results are ordered by decayed score, highest first. Equal scores keep
/// the backend's order.
pub fn rank(
    hits: Vec<RawHit>,
    ages: &dyn AgeSource,
    table: &DecayTable,
    policy: SelectionPolicy,
) -> Vec<ScoredResult> {
    let mut scored: Vec<ScoredResult> = hits
        .into_iter()
        .filter(RawHit::is_session)
        .map(|hit| {
            let age = normalize_age(ages.age_days(&hit.path));
            let factor = decay_factor(age, table);
            ScoredResult::new(hit, age, factor)
        })
        .filter(|result| result.score >= policy.min_score)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(policy.max_results);
    scored
}

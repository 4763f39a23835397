//! Recency decay engine — age in days to score multiplier.

use clawrecall_core::decay::DecayTable;

/// Collapse an age lookup into a usable age.
///
/// Unknown, negative (clock skew) and NaN ages all mean "assume recent".
pub fn normalize_age(age_days: Option<f64>) -> f64 {
    match age_days {
        Some(age) if age > 0.0 => age,
        _ => 0.0,
    }
}

/// The factor of the first tier whose bound is at or above `age_days`.
pub fn decay_factor(age_days: f64, table: &DecayTable) -> f64 {
    let age = normalize_age(Some(age_days));
    let tiers = table.tiers();
    tiers
        .iter()
        .find(|tier| age <= tier.max_age_days)
        .or(tiers.last())
        .map_or(1.0, |tier| tier.factor)
}

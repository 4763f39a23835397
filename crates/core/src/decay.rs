//! Decay tiers — the step function from artifact age to score multiplier.

use crate::error::DecayTableError;
use serde::{Deserialize, Serialize};

/// One bucket of the age axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayTier {
    /// Inclusive upper bound in days. The last tier uses `f64::INFINITY`.
    pub max_age_days: f64,

    /// Multiplier in (0, 1] for ages inside this bucket.
    pub factor: f64,
}

/// Default tiering: a week at full trust, then 0.8 / 0.5 / 0.2.
pub const DEFAULT_DECAY_TIERS: &[DecayTier] = &[
    DecayTier { max_age_days: 7.0, factor: 1.0 },
    DecayTier { max_age_days: 30.0, factor: 0.8 },
    DecayTier { max_age_days: 90.0, factor: 0.5 },
    DecayTier { max_age_days: f64::INFINITY, factor: 0.2 },
];

/// A validated, ordered list of [`DecayTier`]s.
///
/// Invariants: at least one tier, strictly ascending bounds, an unbounded
/// last tier, and factors in (0, 1] that never increase with age.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayTable {
    tiers: Vec<DecayTier>,
}

impl DecayTable {
    pub fn new(tiers: Vec<DecayTier>) -> Result<Self, DecayTableError> {
        if tiers.is_empty() {
            return Err(DecayTableError::Empty);
        }

        for (index, tier) in tiers.iter().enumerate() {
            if !(tier.factor > 0.0 && tier.factor <= 1.0) {
                return Err(DecayTableError::FactorOutOfRange {
                    index,
                    factor: tier.factor,
                });
            }
            if index > 0 {
                let prev = &tiers[index - 1];
                // NaN bounds fail this comparison too
                if !(tier.max_age_days > prev.max_age_days) {
                    return Err(DecayTableError::NotAscending {
                        index,
                        max_age_days: tier.max_age_days,
                    });
                }
                if tier.factor > prev.factor {
                    return Err(DecayTableError::FactorIncreases {
                        index,
                        factor: tier.factor,
                    });
                }
            }
        }

        if tiers.last().is_some_and(|t| t.max_age_days != f64::INFINITY) {
            return Err(DecayTableError::LastTierBounded);
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[DecayTier] {
        &self.tiers
    }
}

impl Default for DecayTable {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_DECAY_TIERS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(max_age_days: f64, factor: f64) -> DecayTier {
        DecayTier { max_age_days, factor }
    }

    #[test]
    fn default_tiers_are_valid() {
        let table = DecayTable::new(DEFAULT_DECAY_TIERS.to_vec()).unwrap();
        assert_eq!(table, DecayTable::default());
        assert_eq!(table.tiers().len(), 4);
    }

    #[test]
    fn empty_table_rejected() {
        assert_eq!(DecayTable::new(vec![]), Err(DecayTableError::Empty));
    }

    #[test]
    fn bounded_last_tier_rejected() {
        let err = DecayTable::new(vec![tier(7.0, 1.0), tier(30.0, 0.5)]).unwrap_err();
        assert_eq!(err, DecayTableError::LastTierBounded);
    }

    #[test]
    fn descending_bounds_rejected() {
        let err = DecayTable::new(vec![tier(30.0, 1.0), tier(7.0, 0.5), tier(f64::INFINITY, 0.2)])
            .unwrap_err();
        assert!(matches!(err, DecayTableError::NotAscending { index: 1, .. }));
    }

    #[test]
    fn zero_factor_rejected() {
        let err = DecayTable::new(vec![tier(f64::INFINITY, 0.0)]).unwrap_err();
        assert!(matches!(err, DecayTableError::FactorOutOfRange { index: 0, .. }));
    }

    #[test]
    fn increasing_factor_rejected() {
        let err = DecayTable::new(vec![tier(7.0, 0.5), tier(f64::INFINITY, 0.9)]).unwrap_err();
        assert!(matches!(err, DecayTableError::FactorIncreases { index: 1, .. }));
    }

    #[test]
    fn single_unbounded_tier_is_valid() {
        let table = DecayTable::new(vec![tier(f64::INFINITY, 1.0)]).unwrap();
        assert_eq!(table.tiers()[0].factor, 1.0);
    }
}

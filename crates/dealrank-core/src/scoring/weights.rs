use serde::{Deserialize, Serialize};

use crate::error::DealError;

/// Tolerance when checking that weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Fractions applied to the six component scores. Expected to sum to 1.0.
///
/// Scoring itself does not enforce the sum: weights summing to more than
/// one inflate totals (until the clamp at 100), weights summing to less
/// deflate them. Callers that accept weights from users should run
/// [`ScoringWeights::validate`] first; [`crate::score_week`] does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub margin: f64,
    pub velocity: f64,
    pub funding: f64,
    pub theme: f64,
    pub timing: f64,
    pub competitive: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            margin: 0.30,
            velocity: 0.20,
            funding: 0.20,
            theme: 0.10,
            timing: 0.10,
            competitive: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn as_array(&self) -> [(&'static str, f64); 6] {
        [
            ("margin", self.margin),
            ("velocity", self.velocity),
            ("funding", self.funding),
            ("theme", self.theme),
            ("timing", self.timing),
            ("competitive", self.competitive),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().map(|(_, w)| w).sum()
    }

    /// Reject weights that are negative, non-finite, or do not sum to 1.0
    /// within [`WEIGHT_SUM_TOLERANCE`].
    pub fn validate(&self) -> Result<(), DealError> {
        for (name, w) in self.as_array() {
            if !w.is_finite() || w < 0.0 {
                return Err(DealError::ConfigInvalid(format!(
                    "weight '{name}' must be a non-negative number, got {w}"
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DealError::ConfigInvalid(format!(
                "weights must sum to 1.0, got {sum:.3}"
            )));
        }
        Ok(())
    }
}

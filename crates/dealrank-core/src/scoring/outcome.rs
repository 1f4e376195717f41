use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::DealRecord;
use crate::scoring::weights::ScoringWeights;

/// The six 0-100 sub-scores of one deal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub margin: f64,
    pub velocity: f64,
    pub funding: f64,
    pub theme: f64,
    pub timing: f64,
    pub competitive: f64,
}

impl ComponentScores {
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

    /// Per-component weighted contributions, in component order.
    pub fn weighted(&self, weights: &ScoringWeights) -> [(&'static str, f64); 6] {
        let mut out = self.as_array();
        for (slot, (_, w)) in out.iter_mut().zip(weights.as_array()) {
            slot.1 *= w;
        }
        out
    }

    pub fn weighted_sum(&self, weights: &ScoringWeights) -> f64 {
        self.weighted(weights).iter().map(|(_, v)| v).sum()
    }
}

/// Multiplicative adjustments applied to the weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub seasonal: f64,
    pub strategic: f64,
    pub historical: f64,
    pub new_item: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_label: Option<f64>,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            seasonal: 1.0,
            strategic: 1.0,
            historical: 1.0,
            new_item: 1.0,
            private_label: None,
        }
    }
}

impl Multipliers {
    pub fn product(&self) -> f64 {
        self.seasonal
            * self.strategic
            * self.historical
            * self.new_item
            * self.private_label.unwrap_or(1.0)
    }
}

/// Interpretation band of a total. The cut points are fixed; labels are
/// presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    MustInclude,
    StronglyRecommended,
    Recommended,
    Consider,
    Skip,
}

impl ScoreTier {
    pub fn from_total(total: f64) -> Self {
        if total >= 85.0 {
            ScoreTier::MustInclude
        } else if total >= 70.0 {
            ScoreTier::StronglyRecommended
        } else if total >= 55.0 {
            ScoreTier::Recommended
        } else if total >= 40.0 {
            ScoreTier::Consider
        } else {
            ScoreTier::Skip
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::MustInclude => "MUST INCLUDE",
            ScoreTier::StronglyRecommended => "STRONGLY RECOMMENDED",
            ScoreTier::Recommended => "RECOMMENDED",
            ScoreTier::Consider => "CONSIDER",
            ScoreTier::Skip => "SKIP",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score of one deal under one weight set. Recomputed in full on every
/// scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Clamped to 0..=100.
    pub total: f64,
    pub components: ComponentScores,
    pub multipliers: Multipliers,
    pub reasons: Vec<String>,
    pub tier: ScoreTier,
    /// `(ad_srp - net_unit_cost) / ad_srp`, when both prices are known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_pct: Option<f64>,
}

/// A deal with its score and 1-based position in the ranked batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDeal {
    pub rank: usize,
    pub deal: DealRecord,
    pub score: ScoreRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_cut_points() {
        assert_eq!(ScoreTier::from_total(100.0), ScoreTier::MustInclude);
        assert_eq!(ScoreTier::from_total(85.0), ScoreTier::MustInclude);
        assert_eq!(ScoreTier::from_total(84.99), ScoreTier::StronglyRecommended);
        assert_eq!(ScoreTier::from_total(70.0), ScoreTier::StronglyRecommended);
        assert_eq!(ScoreTier::from_total(55.0), ScoreTier::Recommended);
        assert_eq!(ScoreTier::from_total(40.0), ScoreTier::Consider);
        assert_eq!(ScoreTier::from_total(39.9), ScoreTier::Skip);
        assert_eq!(ScoreTier::from_total(0.0), ScoreTier::Skip);
    }

    #[test]
    fn test_multiplier_product_includes_private_label() {
        let mut m = Multipliers::default();
        assert_eq!(m.product(), 1.0);
        m.strategic = 1.15;
        m.private_label = Some(1.05);
        assert!((m.product() - 1.2075).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_sum() {
        let c = ComponentScores {
            margin: 100.0,
            velocity: 0.0,
            funding: 0.0,
            theme: 0.0,
            timing: 0.0,
            competitive: 0.0,
        };
        assert!((c.weighted_sum(&ScoringWeights::default()) - 30.0).abs() < 1e-9);
    }
}

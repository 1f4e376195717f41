pub mod components;
pub mod multipliers;
pub mod outcome;
mod reasons;
pub mod seasonal;
pub mod weights;

pub use outcome::{ComponentScores, Multipliers, ScoreRecord, ScoreTier, ScoredDeal};
pub use weights::ScoringWeights;

use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::error::DealError;
use crate::model::DealRecord;
use crate::quality::check_batch;
use components::{
    competitive_advantage, competitive_score, funding_score, margin_pct, margin_score,
    theme_score, timing_score, velocity_score,
};
use multipliers::compute_multipliers;
use reasons::{build_reasons, ReasonInputs};
use seasonal::margin_floor;

/// Everything besides the deal and weights that a score depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringContext {
    /// "Today" for timing, and the seasonal month for deals without a
    /// promotion start.
    pub as_of: NaiveDate,
    /// Description keywords that mark a private-label item.
    pub private_label_keywords: Vec<String>,
}

impl ScoringContext {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            private_label_keywords: Vec::new(),
        }
    }

    pub fn with_private_label_keywords(mut self, keywords: Vec<String>) -> Self {
        self.private_label_keywords = keywords;
        self
    }
}

/// Score one deal. Pure: the same deal, weights and context always give
/// the same record.
pub fn score_deal(deal: &DealRecord, weights: &ScoringWeights, ctx: &ScoringContext) -> ScoreRecord {
    let target = deal.promo_start.unwrap_or(ctx.as_of);
    let margin = margin_pct(deal);
    let floor = margin_floor(deal.dept.as_deref());
    let theme = theme_score(&deal.description, target);
    let advantage = competitive_advantage(deal);

    let components = ComponentScores {
        margin: margin_score(margin, floor),
        velocity: velocity_score(deal.mvmt),
        funding: funding_score(deal.vendor_funding_pct),
        theme: theme.score,
        timing: timing_score(deal.promo_start, ctx.as_of),
        competitive: competitive_score(advantage),
    };
    let multipliers = compute_multipliers(deal, margin, target, &ctx.private_label_keywords);

    let raw = components.weighted_sum(weights) * multipliers.product();
    let total = if raw.is_finite() { raw.clamp(0.0, 100.0) } else { 0.0 };
    let tier = ScoreTier::from_total(total);

    let reasons = build_reasons(&ReasonInputs {
        deal,
        margin,
        floor,
        theme: &theme,
        advantage,
        components: &components,
        multipliers: &multipliers,
        weights,
        total,
        tier,
    });

    tracing::trace!(item = %deal.item_code, total, ?tier, "scored deal");

    ScoreRecord {
        total,
        components,
        multipliers,
        reasons,
        tier,
        margin_pct: margin,
    }
}

/// Score every deal and rank by total, highest first. Ties go to the lower
/// item code, then to input order.
pub fn score_batch(
    deals: &[DealRecord],
    weights: &ScoringWeights,
    ctx: &ScoringContext,
) -> Vec<ScoredDeal> {
    let mut scored: Vec<(usize, ScoreRecord)> = deals
        .iter()
        .enumerate()
        .map(|(i, d)| (i, score_deal(d, weights, ctx)))
        .collect();

    scored.sort_by(|(ia, a), (ib, b)| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| deals[*ia].item_code.cmp(&deals[*ib].item_code))
            .then(ia.cmp(ib))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(pos, (i, score))| ScoredDeal {
            rank: pos + 1,
            deal: deals[i].clone(),
            score,
        })
        .collect()
}

/// Score a week's batch under a pipeline config: validate the weights, run
/// the quality gate, then rank.
pub fn score_week(
    deals: &[DealRecord],
    config: &PipelineConfig,
    as_of: NaiveDate,
) -> Result<Vec<ScoredDeal>, DealError> {
    config.weights.validate()?;
    let report = check_batch(deals, &config.quality).into_result()?;
    tracing::info!(deals = report.total, "quality gate passed");

    let ctx = ScoringContext::new(as_of)
        .with_private_label_keywords(config.private_label_keywords.clone());
    Ok(score_batch(deals, &config.weights, &ctx))
}

//! Batch-level data quality gate. Scoring is only permitted on a batch
//! that passes.

use serde::{Deserialize, Serialize};

use crate::error::DealError;
use crate::model::DealRecord;

/// Maximum tolerated fraction of records with each defect. A batch fails
/// when a fraction is strictly greater than its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    #[serde(default = "default_missing_cost")]
    pub max_missing_cost: f64,
    #[serde(default = "default_missing_ad_srp")]
    pub max_missing_ad_srp: f64,
    #[serde(default = "default_unresolved_description")]
    pub max_unresolved_description: f64,
}

fn default_missing_cost() -> f64 {
    0.05
}

fn default_missing_ad_srp() -> f64 {
    0.05
}

fn default_unresolved_description() -> f64 {
    0.01
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_missing_cost: default_missing_cost(),
            max_missing_ad_srp: default_missing_ad_srp(),
            max_unresolved_description: default_unresolved_description(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    EmptyBatch,
    MissingCost,
    MissingAdPrice,
    UnresolvedDescription,
}

/// One violated threshold, with enough detail to tell a buyer what to fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub kind: IssueKind,
    pub count: usize,
    pub total: usize,
    pub fraction: f64,
    pub threshold: f64,
    /// Item codes of the offending records, in batch order.
    pub item_codes: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub total: usize,
    pub missing_cost: usize,
    pub missing_ad_srp: usize,
    pub unresolved_descriptions: usize,
    pub issues: Vec<QualityIssue>,
}

impl QualityReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Convert into a hard precondition: `Err` carries every issue.
    pub fn into_result(self) -> Result<QualityReport, DealError> {
        if self.passed() {
            Ok(self)
        } else {
            Err(DealError::QualityGate(self.issues))
        }
    }
}

/// Evaluate a week's canonical batch against the thresholds.
///
/// Every check runs; all violations are reported together.
pub fn check_batch(deals: &[DealRecord], thresholds: &QualityThresholds) -> QualityReport {
    let total = deals.len();
    if total == 0 {
        return QualityReport {
            total,
            missing_cost: 0,
            missing_ad_srp: 0,
            unresolved_descriptions: 0,
            issues: vec![QualityIssue {
                kind: IssueKind::EmptyBatch,
                count: 0,
                total: 0,
                fraction: 1.0,
                threshold: 0.0,
                item_codes: vec![],
                message: "batch contains no deals; upload at least one vendor document with \
                          parseable rows before scoring"
                    .into(),
            }],
        };
    }

    let no_cost: Vec<&DealRecord> = deals
        .iter()
        .filter(|d| d.net_unit_cost.is_none() && d.cost.is_none())
        .collect();
    let no_ad: Vec<&DealRecord> = deals.iter().filter(|d| d.ad_srp.is_none()).collect();
    let unresolved: Vec<&DealRecord> = deals
        .iter()
        .filter(|d| !d.has_resolved_description())
        .collect();

    let mut issues = Vec::new();
    let checks = [
        (
            IssueKind::MissingCost,
            &no_cost,
            thresholds.max_missing_cost,
            "missing cost",
            "add unit or net cost columns to the vendor sheet",
        ),
        (
            IssueKind::MissingAdPrice,
            &no_ad,
            thresholds.max_missing_ad_srp,
            "missing ad price",
            "confirm the ad SRP column is filled for every item",
        ),
        (
            IssueKind::UnresolvedDescription,
            &unresolved,
            thresholds.max_unresolved_description,
            "with unresolved descriptions",
            "descriptions must be at least 5 characters",
        ),
    ];

    for (kind, offenders, threshold, label, remedy) in checks {
        let fraction = offenders.len() as f64 / total as f64;
        if fraction > threshold {
            issues.push(QualityIssue {
                kind,
                count: offenders.len(),
                total,
                fraction,
                threshold,
                item_codes: offenders.iter().map(|d| d.item_code.clone()).collect(),
                message: format!(
                    "{} of {} deals ({:.1}%) {}, above the {:.1}% limit; {}",
                    offenders.len(),
                    total,
                    fraction * 100.0,
                    label,
                    threshold * 100.0,
                    remedy
                ),
            });
        }
    }

    if !issues.is_empty() {
        tracing::warn!(total, issues = issues.len(), "quality gate failed");
    }

    QualityReport {
        total,
        missing_cost: no_cost.len(),
        missing_ad_srp: no_ad.len(),
        unresolved_descriptions: unresolved.len(),
        issues,
    }
}

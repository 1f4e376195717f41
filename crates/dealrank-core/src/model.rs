use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known vendor document layouts, plus the generic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    AdPlanner,
    MeatPlanner,
    GroceryPlanner,
    ProducePlanner,
    RollingStock,
    DeliBakeryPlanner,
    Unknown,
}

impl LayoutKind {
    pub const KNOWN: [LayoutKind; 6] = [
        LayoutKind::AdPlanner,
        LayoutKind::MeatPlanner,
        LayoutKind::GroceryPlanner,
        LayoutKind::ProducePlanner,
        LayoutKind::RollingStock,
        LayoutKind::DeliBakeryPlanner,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            LayoutKind::AdPlanner => "ad-planner",
            LayoutKind::MeatPlanner => "meat-planner",
            LayoutKind::GroceryPlanner => "grocery-planner",
            LayoutKind::ProducePlanner => "produce-planner",
            LayoutKind::RollingStock => "rolling-stock",
            LayoutKind::DeliBakeryPlanner => "deli-bakery-planner",
            LayoutKind::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LayoutKind::Unknown)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Where a deal came from. Display-only; never used by the algorithms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    /// 0-based row index within the grid (or record index for external records).
    pub row: usize,
}

/// One vendor deal row normalized to the canonical schema.
///
/// Every numeric field is optional: `None` means "no data" and is never
/// conflated with a legitimate zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub item_code: String,
    pub description: String,
    #[serde(default)]
    pub dept: Option<String>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    /// Net unit cost, falling back to `cost` when the vendor gives no net column.
    #[serde(default)]
    pub net_unit_cost: Option<Decimal>,
    #[serde(default)]
    pub srp: Option<Decimal>,
    #[serde(default)]
    pub ad_srp: Option<Decimal>,
    /// Fraction in 0..=1 (0.15 means 15%).
    #[serde(default)]
    pub vendor_funding_pct: Option<Decimal>,
    #[serde(default)]
    pub mvmt: Option<f64>,
    #[serde(default)]
    pub ad_scan: Option<Decimal>,
    #[serde(default)]
    pub tpr_scan: Option<Decimal>,
    #[serde(default)]
    pub edlc_scan: Option<Decimal>,
    #[serde(default)]
    pub competitor_price: Option<Decimal>,
    #[serde(default)]
    pub pack: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub promo_start: Option<NaiveDate>,
    #[serde(default)]
    pub promo_end: Option<NaiveDate>,
    #[serde(default)]
    pub source: SourceRef,
}

impl DealRecord {
    /// Sum of the scan figures that are present, or `None` if none are or
    /// the sum is out of range.
    pub fn total_scan(&self) -> Option<Decimal> {
        let scans = [self.ad_scan, self.tpr_scan, self.edlc_scan];
        if scans.iter().all(Option::is_none) {
            return None;
        }
        scans
            .iter()
            .flatten()
            .try_fold(Decimal::ZERO, |sum, scan| sum.checked_add(*scan))
    }

    /// A description is resolved once it carries at least five characters.
    pub fn has_resolved_description(&self) -> bool {
        self.description.trim().chars().count() >= 5
    }
}

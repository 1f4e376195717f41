use rust_decimal::prelude::ToPrimitive;

use crate::model::DealRecord;
use crate::scoring::components::{ThemeMatch, TARGET_MARGIN};
use crate::scoring::outcome::{ComponentScores, Multipliers, ScoreTier};
use crate::scoring::weights::ScoringWeights;

/// Inputs the reason templates interpolate.
pub(crate) struct ReasonInputs<'a> {
    pub deal: &'a DealRecord,
    pub margin: Option<f64>,
    pub floor: f64,
    pub theme: &'a ThemeMatch,
    pub advantage: Option<f64>,
    pub components: &'a ComponentScores,
    pub multipliers: &'a Multipliers,
    pub weights: &'a ScoringWeights,
    pub total: f64,
    pub tier: ScoreTier,
}

/// Reasons in fixed order: margin, velocity, funding, theme, competitive,
/// then the summary line. Only components past a high or low mark speak.
pub(crate) fn build_reasons(r: &ReasonInputs<'_>) -> Vec<String> {
    let mut out = Vec::new();
    let deal = r.deal;

    match r.margin {
        None => out.push("Margin unknown: net cost or ad price is missing".to_string()),
        Some(m) if m >= TARGET_MARGIN => {
            let ad = deal.ad_srp.unwrap_or_default();
            out.push(format!("Strong {:.1}% margin at ${:.2} ad price", m * 100.0, ad));
        }
        Some(m) if m < r.floor => out.push(format!(
            "Margin of {:.1}% is below the {:.0}% floor for {}",
            m * 100.0,
            r.floor * 100.0,
            deal.dept.as_deref().unwrap_or("this department")
        )),
        Some(_) => {}
    }

    match deal.mvmt {
        Some(v) if v >= 3.0 => out.push(format!("High expected movement ({v:.1}x)")),
        Some(v) if v < 1.5 => out.push(format!("Low expected movement ({v:.1}x)")),
        _ => {}
    }

    let funding = deal.vendor_funding_pct.and_then(|f| f.to_f64()).unwrap_or(0.0);
    if funding >= 0.15 {
        out.push(format!("Strong vendor funding of {:.0}%", funding * 100.0));
    } else if funding <= 0.0 {
        out.push("No vendor funding".to_string());
    } else if funding < 0.05 {
        out.push(format!("Thin vendor funding of {:.1}%", funding * 100.0));
    }

    if !r.theme.keywords.is_empty() && r.theme.score >= 60.0 {
        let keywords = r.theme.keywords.join(", ");
        if r.theme.holidays.is_empty() {
            out.push(format!("Seasonal fit: {keywords}"));
        } else {
            out.push(format!(
                "Seasonal fit for {}: {}",
                r.theme.holidays.join(", "),
                keywords
            ));
        }
    }

    if let (Some(adv), Some(comp)) = (r.advantage, deal.competitor_price) {
        if adv >= 0.10 {
            out.push(format!(
                "Priced {:.1}% below competitor at ${:.2}",
                adv * 100.0,
                comp
            ));
        } else if adv < 0.0 {
            out.push(format!(
                "Priced {:.1}% above competitor at ${:.2}",
                -adv * 100.0,
                comp
            ));
        }
    }

    out.push(summary_line(r));
    out
}

fn summary_line(r: &ReasonInputs<'_>) -> String {
    let mut driver = ("margin", f64::MIN);
    for (name, value) in r.components.weighted(r.weights) {
        if value > driver.1 {
            driver = (name, value);
        }
    }
    let product = r.multipliers.product();
    let mut line = format!(
        "{} at {:.1}; strongest driver is {}",
        r.tier.label(),
        r.total,
        driver.0
    );
    if (product - 1.0).abs() > 1e-9 {
        line.push_str(&format!(" (adjustments x{product:.2})"));
    }
    line
}

use chrono::{Datelike, NaiveDate};

use crate::model::DealRecord;
use crate::scoring::components::DEFAULT_MVMT;
use crate::scoring::outcome::Multipliers;
use crate::scoring::seasonal::{
    first_match, matches_term, seasonal_multiplier, DEFAULT_MARGIN_FLOOR, NEW_ITEM_KEYWORDS,
    PREMIUM_KEYWORDS, TRAFFIC_DRIVERS,
};

pub const TRAFFIC_DRIVER_MULTIPLIER: f64 = 1.15;
pub const PREMIUM_MULTIPLIER: f64 = 1.10;
pub const NEW_ITEM_MULTIPLIER: f64 = 1.10;
pub const PRIVATE_LABEL_MULTIPLIER: f64 = 1.05;

/// Compute every multiplier independently; they stack.
pub fn compute_multipliers(
    deal: &DealRecord,
    margin: Option<f64>,
    target: NaiveDate,
    private_label_keywords: &[String],
) -> Multipliers {
    let text = deal.description.as_str();
    Multipliers {
        seasonal: seasonal_multiplier(deal.dept.as_deref(), target.month()),
        strategic: strategic_multiplier(text),
        historical: historical_multiplier(deal.mvmt, margin),
        new_item: if first_match(text, NEW_ITEM_KEYWORDS).is_some() {
            NEW_ITEM_MULTIPLIER
        } else {
            1.0
        },
        private_label: private_label_keywords
            .iter()
            .any(|kw| matches_term(text, kw))
            .then_some(PRIVATE_LABEL_MULTIPLIER),
    }
}

/// Traffic drivers outrank premium positioning when both match.
pub fn strategic_multiplier(description: &str) -> f64 {
    if first_match(description, TRAFFIC_DRIVERS).is_some() {
        TRAFFIC_DRIVER_MULTIPLIER
    } else if first_match(description, PREMIUM_KEYWORDS).is_some() {
        PREMIUM_MULTIPLIER
    } else {
        1.0
    }
}

/// Expected performance from movement and margin together: fast sellers
/// with healthy margin get a lift, slow sellers under the default floor
/// get a penalty.
pub fn historical_multiplier(mvmt: Option<f64>, margin: Option<f64>) -> f64 {
    let mvmt = mvmt.unwrap_or(DEFAULT_MVMT);
    match margin {
        Some(m) if mvmt >= 3.0 && m >= 0.25 => 1.10,
        Some(m) if mvmt >= 2.0 && m >= 0.20 => 1.05,
        Some(m) if mvmt < 1.5 && m < DEFAULT_MARGIN_FLOOR => 0.90,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_strategic_traffic_beats_premium() {
        assert_eq!(strategic_multiplier("Premium Large Eggs"), TRAFFIC_DRIVER_MULTIPLIER);
        assert_eq!(strategic_multiplier("Angus Ribeye Steak"), PREMIUM_MULTIPLIER);
        assert_eq!(strategic_multiplier("Paper Towels"), 1.0);
    }

    #[test]
    fn test_historical_rule() {
        assert_eq!(historical_multiplier(Some(3.5), Some(0.30)), 1.10);
        assert_eq!(historical_multiplier(Some(2.0), Some(0.22)), 1.05);
        assert_eq!(historical_multiplier(Some(1.0), Some(0.10)), 0.90);
        assert_eq!(historical_multiplier(None, Some(0.10)), 0.90);
        assert_eq!(historical_multiplier(Some(5.0), None), 1.0);
    }

    #[test]
    fn test_multipliers_stack_independently() {
        let deal = DealRecord {
            description: "NEW Store Brand Ground Beef 80/20".into(),
            dept: Some("Meat".into()),
            ..Default::default()
        };
        let m = compute_multipliers(&deal, None, date(2025, 7, 1), &["store brand".to_string()]);
        assert_eq!(m.seasonal, 1.10);
        assert_eq!(m.strategic, TRAFFIC_DRIVER_MULTIPLIER);
        assert_eq!(m.new_item, NEW_ITEM_MULTIPLIER);
        assert_eq!(m.private_label, Some(PRIVATE_LABEL_MULTIPLIER));
        assert_eq!(m.historical, 1.0);
    }

    #[test]
    fn test_private_label_absent_without_keyword() {
        let deal = DealRecord {
            description: "Brand Name Cola".into(),
            ..Default::default()
        };
        let m = compute_multipliers(&deal, None, date(2025, 1, 1), &["store brand".to_string()]);
        assert_eq!(m.private_label, None);
    }
}

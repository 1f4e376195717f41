//! The six component rules. Each is a pure function of one deal field (or
//! a pair) and returns a score in 0..=100.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::model::DealRecord;
use crate::scoring::seasonal::{
    active_holidays, matches_term, HEALTH_KEYWORDS, HEALTH_KEYWORD_BONUS, HOLIDAY_KEYWORD_BONUS,
    MONTH_KEYWORDS, MONTH_KEYWORD_BONUS,
};

/// Margin at which the margin score saturates.
pub const TARGET_MARGIN: f64 = 0.30;
/// Movement assumed when a vendor gives none.
pub const DEFAULT_MVMT: f64 = 1.0;
pub const THEME_BASE: f64 = 50.0;
pub const TIMING_DEFAULT: f64 = 60.0;
pub const COMPETITIVE_DEFAULT: f64 = 50.0;

const VELOCITY_BUCKETS: &[(f64, f64)] = &[
    (4.0, 100.0),
    (3.0, 85.0),
    (2.5, 70.0),
    (2.0, 55.0),
    (1.5, 40.0),
];

const FUNDING_BUCKETS: &[(f64, f64)] = &[(0.20, 100.0), (0.15, 85.0), (0.10, 70.0), (0.05, 40.0)];

/// Upper bounds on days between today and the promotion start.
const TIMING_BUCKETS: &[(i64, f64)] = &[(3, 100.0), (7, 80.0), (14, 60.0)];

const COMPETITIVE_BUCKETS: &[(f64, f64)] = &[(0.15, 100.0), (0.10, 80.0), (0.05, 60.0)];

fn bucket(value: f64, table: &[(f64, f64)], otherwise: f64) -> f64 {
    table
        .iter()
        .find(|(min, _)| value >= *min)
        .map(|(_, score)| *score)
        .unwrap_or(otherwise)
}

/// `(ad_srp - cost) / ad_srp` using the net unit cost, falling back to the
/// list cost. `None` if either price is missing or the ad price is not
/// positive.
pub fn margin_pct(deal: &DealRecord) -> Option<f64> {
    let ad = deal.ad_srp?;
    let cost = deal.net_unit_cost.or(deal.cost)?;
    if ad <= Decimal::ZERO {
        return None;
    }
    relative_difference(ad, cost, ad)
}

/// 0 below the department floor, 50 at the floor rising linearly to 100 at
/// [`TARGET_MARGIN`]. Missing prices score 0.
pub fn margin_score(margin: Option<f64>, floor: f64) -> f64 {
    let Some(m) = margin else {
        return 0.0;
    };
    if m < floor {
        0.0
    } else if m >= TARGET_MARGIN {
        100.0
    } else {
        50.0 + (m - floor) / (TARGET_MARGIN - floor) * 50.0
    }
}

pub fn velocity_score(mvmt: Option<f64>) -> f64 {
    bucket(mvmt.unwrap_or(DEFAULT_MVMT), VELOCITY_BUCKETS, 20.0)
}

pub fn funding_score(funding: Option<Decimal>) -> f64 {
    let f = funding.and_then(|d| d.to_f64()).unwrap_or(0.0);
    let floor = if f > 0.0 { 20.0 } else { 0.0 };
    bucket(f, FUNDING_BUCKETS, floor)
}

/// Theme score and the keywords that earned bonuses, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeMatch {
    pub score: f64,
    pub keywords: Vec<&'static str>,
    pub holidays: Vec<&'static str>,
}

pub fn theme_score(description: &str, target: NaiveDate) -> ThemeMatch {
    let mut score = THEME_BASE;
    let mut keywords: Vec<&'static str> = Vec::new();
    let mut holidays: Vec<&'static str> = Vec::new();

    let month = target.month0() as usize;
    for &kw in MONTH_KEYWORDS[month] {
        if matches_term(description, kw) {
            score += MONTH_KEYWORD_BONUS;
            push_unique(&mut keywords, kw);
        }
    }

    for holiday in active_holidays(target) {
        let mut hit = false;
        for &kw in holiday.keywords {
            if matches_term(description, kw) {
                score += HOLIDAY_KEYWORD_BONUS;
                push_unique(&mut keywords, kw);
                hit = true;
            }
        }
        if hit {
            holidays.push(holiday.name);
        }
    }

    for &kw in HEALTH_KEYWORDS {
        if matches_term(description, kw) {
            score += HEALTH_KEYWORD_BONUS;
            push_unique(&mut keywords, kw);
        }
    }

    ThemeMatch {
        score: score.min(100.0),
        keywords,
        holidays,
    }
}

fn push_unique(list: &mut Vec<&'static str>, kw: &'static str) {
    if !list.contains(&kw) {
        list.push(kw);
    }
}

pub fn timing_score(promo_start: Option<NaiveDate>, as_of: NaiveDate) -> f64 {
    let Some(start) = promo_start else {
        return TIMING_DEFAULT;
    };
    let days = (start - as_of).num_days().abs();
    TIMING_BUCKETS
        .iter()
        .find(|(max, _)| days <= *max)
        .map(|(_, score)| *score)
        .unwrap_or(40.0)
}

/// Fraction by which the ad price undercuts the competitor. Negative when
/// the competitor is cheaper.
pub fn competitive_advantage(deal: &DealRecord) -> Option<f64> {
    let comp = deal.competitor_price?;
    let ad = deal.ad_srp?;
    if comp <= Decimal::ZERO {
        return None;
    }
    relative_difference(comp, ad, comp)
}

/// `(a - b) / base`, in `f64` when the exact result is out of decimal range.
fn relative_difference(a: Decimal, b: Decimal, base: Decimal) -> Option<f64> {
    match a.checked_sub(b).and_then(|diff| diff.checked_div(base)) {
        Some(ratio) => ratio.to_f64(),
        None => {
            let ratio = (a.to_f64()? - b.to_f64()?) / base.to_f64()?;
            ratio.is_finite().then_some(ratio)
        }
    }
}

pub fn competitive_score(advantage: Option<f64>) -> f64 {
    match advantage {
        Some(a) => bucket(a, COMPETITIVE_BUCKETS, 20.0),
        None => COMPETITIVE_DEFAULT,
    }
}

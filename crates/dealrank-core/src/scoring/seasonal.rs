//! Calendar and keyword tables behind the theme score and the seasonal,
//! strategic and new-item multipliers.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::parsing::normalize::contains_keyword;

/// Margin floor per canonical department; below it the margin score is 0.
pub const MARGIN_FLOORS: &[(&str, f64)] = &[
    ("Grocery", 0.22),
    ("Meat", 0.20),
    ("Seafood", 0.20),
    ("Produce", 0.28),
    ("Deli", 0.25),
    ("Bakery", 0.25),
    ("Dairy", 0.20),
    ("Frozen", 0.22),
    ("Health & Beauty", 0.25),
    ("Beer & Wine", 0.15),
    ("Floral", 0.28),
];

pub const DEFAULT_MARGIN_FLOOR: f64 = 0.15;

pub fn margin_floor(dept: Option<&str>) -> f64 {
    dept.and_then(|d| {
        MARGIN_FLOORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(d))
            .map(|(_, floor)| *floor)
    })
    .unwrap_or(DEFAULT_MARGIN_FLOOR)
}

/// Keywords that sell in each calendar month (index 0 = January).
pub const MONTH_KEYWORDS: [&[&str]; 12] = [
    &["soup", "chili", "citrus", "oatmeal", "protein"],
    &["chocolate", "strawberry", "wing", "chip", "salsa"],
    &["corned beef", "cabbage", "potato", "asparagus"],
    &["ham", "egg", "lamb", "asparagus", "candy"],
    &["burger", "hot dog", "charcoal", "watermelon", "steak"],
    &["burger", "rib", "watermelon", "berry", "ice cream", "lemonade"],
    &["hot dog", "burger", "watermelon", "ice cream", "corn"],
    &["bread", "peanut butter", "juice box", "snack", "cereal"],
    &["apple", "chili", "wing", "pumpkin"],
    &["pumpkin", "candy", "apple", "cider"],
    &["turkey", "stuffing", "cranberry", "pie", "gravy"],
    &["ham", "cookie", "eggnog", "roast", "chocolate"],
];

pub const MONTH_KEYWORD_BONUS: f64 = 10.0;
pub const HOLIDAY_KEYWORD_BONUS: f64 = 15.0;
pub const HEALTH_KEYWORD_BONUS: f64 = 5.0;

/// Days before an event during which its keywords get a boost.
pub const HOLIDAY_LEAD_DAYS: i64 = 21;
/// Days after an event the boost still applies.
pub const HOLIDAY_TRAIL_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayDate {
    Fixed { month: u32, day: u32 },
    /// The `n`th `weekday` of `month` (1-based).
    NthWeekday { month: u32, weekday: Weekday, n: u8 },
    /// The last `weekday` of `month`.
    LastWeekday { month: u32, weekday: Weekday },
}

impl HolidayDate {
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            HolidayDate::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            HolidayDate::NthWeekday { month, weekday, n } => {
                NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
            }
            HolidayDate::LastWeekday { month, weekday } => {
                let first_of_next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)?
                };
                let mut day = first_of_next - Duration::days(1);
                while day.weekday() != weekday {
                    day -= Duration::days(1);
                }
                Some(day)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Holiday {
    pub name: &'static str,
    pub date: HolidayDate,
    pub keywords: &'static [&'static str],
}

pub const HOLIDAYS: &[Holiday] = &[
    Holiday {
        name: "New Year",
        date: HolidayDate::Fixed { month: 1, day: 1 },
        keywords: &["sparkling", "champagne", "shrimp", "dip", "party"],
    },
    Holiday {
        name: "Valentine's Day",
        date: HolidayDate::Fixed { month: 2, day: 14 },
        keywords: &["chocolate", "rose", "strawberry", "wine", "candy"],
    },
    Holiday {
        name: "St. Patrick's Day",
        date: HolidayDate::Fixed { month: 3, day: 17 },
        keywords: &["corned beef", "cabbage", "potato", "soda bread"],
    },
    Holiday {
        name: "Cinco de Mayo",
        date: HolidayDate::Fixed { month: 5, day: 5 },
        keywords: &["avocado", "tortilla", "salsa", "lime"],
    },
    Holiday {
        name: "Memorial Day",
        date: HolidayDate::LastWeekday { month: 5, weekday: Weekday::Mon },
        keywords: &["burger", "hot dog", "bun", "charcoal"],
    },
    Holiday {
        name: "Independence Day",
        date: HolidayDate::Fixed { month: 7, day: 4 },
        keywords: &["burger", "hot dog", "watermelon", "bun", "soda"],
    },
    Holiday {
        name: "Labor Day",
        date: HolidayDate::NthWeekday { month: 9, weekday: Weekday::Mon, n: 1 },
        keywords: &["burger", "hot dog", "rib", "charcoal"],
    },
    Holiday {
        name: "Halloween",
        date: HolidayDate::Fixed { month: 10, day: 31 },
        keywords: &["candy", "pumpkin", "chocolate", "treat"],
    },
    Holiday {
        name: "Thanksgiving",
        date: HolidayDate::NthWeekday { month: 11, weekday: Weekday::Thu, n: 4 },
        keywords: &["turkey", "stuffing", "cranberry", "pie", "roll", "gravy"],
    },
    Holiday {
        name: "Christmas",
        date: HolidayDate::Fixed { month: 12, day: 25 },
        keywords: &["ham", "cookie", "eggnog", "roast", "candy cane"],
    },
];

/// Holidays whose window covers `target`. Events in the neighbouring years
/// are checked so late-December promotions see New Year.
pub fn active_holidays(target: NaiveDate) -> Vec<&'static Holiday> {
    HOLIDAYS
        .iter()
        .filter(|h| {
            (target.year() - 1..=target.year() + 1).any(|year| {
                h.date.in_year(year).is_some_and(|event| {
                    let lead = (event - target).num_days();
                    (-HOLIDAY_TRAIL_DAYS..=HOLIDAY_LEAD_DAYS).contains(&lead)
                })
            })
        })
        .collect()
}

pub const HEALTH_KEYWORDS: &[&str] = &[
    "organic",
    "natural",
    "gluten free",
    "non-gmo",
    "low fat",
    "sugar free",
    "keto",
    "plant based",
    "vegan",
    "whole grain",
    "high protein",
];

/// Seasonal multiplier by department and month.
pub const SEASONAL_MULTIPLIERS: &[(&str, &[(u32, f64)])] = &[
    ("Meat", &[(5, 1.10), (6, 1.10), (7, 1.10), (8, 1.10), (9, 1.10), (12, 1.05)]),
    ("Seafood", &[(2, 1.10), (3, 1.10), (12, 1.05)]),
    ("Produce", &[(6, 1.10), (7, 1.10), (8, 1.10), (11, 1.05)]),
    ("Bakery", &[(2, 1.05), (11, 1.10), (12, 1.10)]),
    ("Deli", &[(5, 1.05), (6, 1.05), (7, 1.05), (12, 1.05)]),
    ("Dairy", &[(11, 1.05), (12, 1.05)]),
    ("Frozen", &[(6, 1.08), (7, 1.08), (8, 1.08)]),
    ("Grocery", &[(10, 1.05), (11, 1.05), (12, 1.05)]),
    ("Beer & Wine", &[(6, 1.10), (7, 1.10), (12, 1.10)]),
    ("Floral", &[(2, 1.15), (5, 1.15)]),
    ("Health & Beauty", &[(1, 1.05)]),
];

pub fn seasonal_multiplier(dept: Option<&str>, month: u32) -> f64 {
    dept.and_then(|d| {
        SEASONAL_MULTIPLIERS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(d))
    })
    .and_then(|(_, months)| months.iter().find(|(m, _)| *m == month))
    .map(|(_, mult)| *mult)
    .unwrap_or(1.0)
}

/// Items that pull shoppers into the store.
pub const TRAFFIC_DRIVERS: &[&str] = &[
    "milk",
    "egg",
    "bread",
    "banana",
    "ground beef",
    "chicken breast",
    "soda",
    "water",
    "coffee",
    "cereal",
    "butter",
    "bacon",
];

pub const PREMIUM_KEYWORDS: &[&str] = &[
    "premium", "artisan", "gourmet", "angus", "wagyu", "imported", "craft", "reserve",
];

pub const NEW_ITEM_KEYWORDS: &[&str] = &["new", "launch", "limited", "exclusive"];

/// Word-boundary keyword match that also accepts simple plurals, so "egg"
/// matches "Large Eggs" and "strawberry" matches "Strawberries".
pub fn matches_term(text: &str, term: &str) -> bool {
    if contains_keyword(text, term)
        || contains_keyword(text, &format!("{term}s"))
        || contains_keyword(text, &format!("{term}es"))
    {
        return true;
    }
    match term.strip_suffix('y') {
        Some(stem) => contains_keyword(text, &format!("{stem}ies")),
        None => false,
    }
}

pub fn first_match<'a>(text: &str, terms: &[&'a str]) -> Option<&'a str> {
    terms.iter().copied().find(|t| matches_term(text, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_margin_floor_lookup() {
        assert_eq!(margin_floor(Some("Grocery")), 0.22);
        assert_eq!(margin_floor(Some("produce")), 0.28);
        assert_eq!(margin_floor(Some("Pet")), DEFAULT_MARGIN_FLOOR);
        assert_eq!(margin_floor(None), DEFAULT_MARGIN_FLOOR);
    }

    #[test]
    fn test_floating_holidays() {
        let thanksgiving = HolidayDate::NthWeekday { month: 11, weekday: Weekday::Thu, n: 4 };
        assert_eq!(thanksgiving.in_year(2025), Some(date(2025, 11, 27)));
        assert_eq!(thanksgiving.in_year(2026), Some(date(2026, 11, 26)));

        let memorial = HolidayDate::LastWeekday { month: 5, weekday: Weekday::Mon };
        assert_eq!(memorial.in_year(2025), Some(date(2025, 5, 26)));
        assert_eq!(memorial.in_year(2026), Some(date(2026, 5, 25)));

        let labor = HolidayDate::NthWeekday { month: 9, weekday: Weekday::Mon, n: 1 };
        assert_eq!(labor.in_year(2025), Some(date(2025, 9, 1)));
    }

    #[test]
    fn test_holiday_window_bounds() {
        let names = |d| -> Vec<&str> { active_holidays(d).iter().map(|h| h.name).collect() };
        assert!(names(date(2025, 6, 13)).contains(&"Independence Day"));
        assert!(names(date(2025, 7, 7)).contains(&"Independence Day"));
        assert!(!names(date(2025, 7, 8)).contains(&"Independence Day"));
        assert!(!names(date(2025, 6, 12)).contains(&"Independence Day"));
    }

    #[test]
    fn test_new_year_window_crosses_year_end() {
        let names: Vec<&str> = active_holidays(date(2025, 12, 20))
            .iter()
            .map(|h| h.name)
            .collect();
        assert!(names.contains(&"New Year"));
        assert!(names.contains(&"Christmas"));
    }

    #[test]
    fn test_seasonal_multiplier_table() {
        assert_eq!(seasonal_multiplier(Some("Meat"), 7), 1.10);
        assert_eq!(seasonal_multiplier(Some("Meat"), 1), 1.0);
        assert_eq!(seasonal_multiplier(None, 7), 1.0);
    }

    #[test]
    fn test_matches_term_plurals_and_boundaries() {
        assert!(matches_term("Large Brown Eggs 12ct", "egg"));
        assert!(matches_term("Hot Dog Buns 8ct", "hot dog"));
        assert!(matches_term("Peaches 2lb", "peach"));
        assert!(matches_term("Fresh Strawberries 1lb", "strawberry"));
        assert!(!matches_term("Eggplant", "egg"));
        assert!(!matches_term("Renewal Blend", "new"));
    }
}

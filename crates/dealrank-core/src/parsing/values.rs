use crate::extraction::Cell;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a currency or plain numeric cell into a Decimal.
///
/// Handles formats like:
/// - "4.99" / 4.99 -> 4.99
/// - "$4.99" -> 4.99
/// - "$1,234.50" -> 1234.50
/// - "(1.25)" -> -1.25 (accounting negative)
/// - "", "-", "N/A", "abc" -> None
///
/// Unparseable input is "absent", never zero.
pub fn parse_decimal_cell(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(f) => f64_to_decimal(*f),
        Cell::Text(s) => parse_decimal_str(s),
        _ => None,
    }
}

/// Parse a number from text after stripping currency symbols and separators.
pub fn parse_decimal_str(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let (negative, s) = match s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, s),
    };

    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | '€' | '£') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() || cleaned == "-" || cleaned == "." {
        return None;
    }

    let value = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -value } else { value })
}

/// Parse a float cell (movement multipliers). Same stripping rules as money.
pub fn parse_f64_cell(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(f) if f.is_finite() => Some(*f),
        Cell::Text(s) => {
            let cleaned: String = s
                .trim()
                .trim_end_matches(['x', 'X'])
                .chars()
                .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
                .collect();
            cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Parse a percentage into a fraction.
///
/// A raw value greater than 1 is taken to be in percentage units
/// ("15" or "15%" means 0.15); a value at or below 1 is already a fraction.
pub fn parse_percent_cell(cell: &Cell) -> Option<Decimal> {
    let raw = parse_decimal_cell(cell)?;
    if raw > Decimal::ONE {
        Some(raw / Decimal::ONE_HUNDRED)
    } else {
        Some(raw)
    }
}

/// Strip everything but digits and accept 10 to 14 digit codes.
pub fn clean_upc(cell: &Cell) -> Option<String> {
    let text = match cell {
        Cell::Number(f) if f.fract() == 0.0 && *f >= 0.0 => format!("{f:.0}"),
        other => other.as_text()?,
    };
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if (10..=14).contains(&digits.len()) {
        Some(digits)
    } else {
        None
    }
}

/// Read a single date from a cell: spreadsheet dates or text dates.
pub fn parse_date_cell(cell: &Cell, default_year: Option<i32>) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Text(s) => parse_date_part(s.trim(), default_year.or(year_in(s))),
        _ => None,
    }
}

/// Parse a combined promotion window such as "3/4 - 3/10/26" or
/// "2026-03-04 thru 2026-03-10".
///
/// A year found on either side is shared with the other side, otherwise
/// `default_year` is used. A lone date fills only the start.
pub fn parse_date_range(s: &str, default_year: Option<i32>) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let lower = s.trim().to_lowercase();
    if lower.is_empty() {
        return (None, None);
    }

    let (left, right) = split_range(&lower);
    let year = year_in(left)
        .or_else(|| right.and_then(year_in))
        .or(default_year);

    let start = parse_date_part(left.trim(), year);
    let end = right.and_then(|r| parse_date_part(r.trim(), year));

    let left_year = year_in(left).is_some();
    let right_year = right.and_then(year_in).is_some();
    match (start, end) {
        // A window that wraps into the next year: "12/28 - 1/3".
        (Some(s), Some(e)) if e < s && !right_year => (Some(s), e.with_year(e.year() + 1)),
        // Same wrap with the year written on the end only: "12/28 - 1/3/27".
        (Some(s), Some(e)) if e < s && !left_year => (s.with_year(s.year() - 1), Some(e)),
        other => other,
    }
}

fn split_range(s: &str) -> (&str, Option<&str>) {
    for sep in [" through ", " thru ", " to ", "–", " - "] {
        if let Some((l, r)) = s.split_once(sep) {
            return (l, Some(r));
        }
    }
    // ISO dates contain hyphens themselves, so only split a bare '-' when
    // the left side is a slash date.
    if s.contains('/') {
        if let Some((l, r)) = s.split_once('-') {
            return (l, Some(r));
        }
    }
    (s, None)
}

/// Year carried in a date fragment, if any (4-digit, or 2-digit after a
/// second slash).
fn year_in(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.year());
    }
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() == 3 {
        let y: i32 = parts[2].trim().parse().ok()?;
        return Some(if y < 100 { 2000 + y } else { y });
    }
    None
}

fn parse_date_part(s: &str, year: Option<i32>) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    let parts: Vec<&str> = s.split('/').map(str::trim).collect();
    match parts.as_slice() {
        [m, d] => NaiveDate::from_ymd_opt(year?, m.parse().ok()?, d.parse().ok()?),
        [m, d, _] => NaiveDate::from_ymd_opt(year_in(s)?, m.parse().ok()?, d.parse().ok()?),
        _ => None,
    }
}

/// Convert f64 to Decimal, preserving reasonable precision.
///
/// Uses a string round-trip to avoid floating-point artifacts
/// (e.g., 4.99_f64 becoming 4.9900000000000002131...).
pub fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    format!("{f}")
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn text(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_money_with_symbols() {
        assert_eq!(parse_decimal_cell(&text("$4.99")), Some(dec!(4.99)));
        assert_eq!(parse_decimal_cell(&text("$1,234.50")), Some(dec!(1234.50)));
        assert_eq!(parse_decimal_cell(&text(" 3.45 ")), Some(dec!(3.45)));
        assert_eq!(parse_decimal_cell(&text("(1.25)")), Some(dec!(-1.25)));
    }

    #[test]
    fn test_money_from_number_cell() {
        assert_eq!(parse_decimal_cell(&Cell::Number(4.99)), Some(dec!(4.99)));
    }

    #[test]
    fn test_unparseable_is_absent_not_zero() {
        assert_eq!(parse_decimal_cell(&text("N/A")), None);
        assert_eq!(parse_decimal_cell(&text("-")), None);
        assert_eq!(parse_decimal_cell(&text("call")), None);
        assert_eq!(parse_decimal_cell(&Cell::Empty), None);
        assert_eq!(parse_decimal_cell(&text("0")), Some(Decimal::ZERO));
    }

    #[test]
    fn test_percent_heuristic() {
        assert_eq!(parse_percent_cell(&Cell::Number(15.0)), Some(dec!(0.15)));
        assert_eq!(parse_percent_cell(&Cell::Number(0.15)), Some(dec!(0.15)));
        assert_eq!(parse_percent_cell(&text("15%")), Some(dec!(0.15)));
        assert_eq!(parse_percent_cell(&text("1")), Some(dec!(1)));
    }

    #[test]
    fn test_upc_cleaning() {
        assert_eq!(
            clean_upc(&text("123-456-7890123")).as_deref(),
            Some("1234567890123")
        );
        assert_eq!(clean_upc(&text("12")), None);
        assert_eq!(clean_upc(&text("123456789012345")), None);
        assert_eq!(
            clean_upc(&Cell::Number(41303001234.0)).as_deref(),
            Some("41303001234")
        );
    }

    #[test]
    fn test_mvmt_parsing() {
        assert_eq!(parse_f64_cell(&text("2.5x")), Some(2.5));
        assert_eq!(parse_f64_cell(&Cell::Number(3.0)), Some(3.0));
        assert_eq!(parse_f64_cell(&text("fast")), None);
    }

    #[test]
    fn test_date_range_shared_year() {
        assert_eq!(
            parse_date_range("3/4 - 3/10/26", None),
            (Some(date(2026, 3, 4)), Some(date(2026, 3, 10)))
        );
        assert_eq!(
            parse_date_range("03/04/2026-03/10/2026", None),
            (Some(date(2026, 3, 4)), Some(date(2026, 3, 10)))
        );
    }

    #[test]
    fn test_date_range_iso_and_words() {
        assert_eq!(
            parse_date_range("2026-03-04 thru 2026-03-10", None),
            (Some(date(2026, 3, 4)), Some(date(2026, 3, 10)))
        );
        assert_eq!(
            parse_date_range("3/4 to 3/10", Some(2026)),
            (Some(date(2026, 3, 4)), Some(date(2026, 3, 10)))
        );
    }

    #[test]
    fn test_date_range_without_year_is_absent() {
        assert_eq!(parse_date_range("3/4 - 3/10", None), (None, None));
    }

    #[test]
    fn test_date_range_wraps_year_end() {
        assert_eq!(
            parse_date_range("12/28 - 1/3", Some(2026)),
            (Some(date(2026, 12, 28)), Some(date(2027, 1, 3)))
        );
    }

    #[test]
    fn test_date_range_wraps_with_year_on_end_only() {
        assert_eq!(
            parse_date_range("12/28 - 1/3/27", None),
            (Some(date(2026, 12, 28)), Some(date(2027, 1, 3)))
        );
        assert_eq!(
            parse_date_range("12/28 - 1/3/2027", Some(2020)),
            (Some(date(2026, 12, 28)), Some(date(2027, 1, 3)))
        );
    }

    #[test]
    fn test_single_date_fills_start() {
        assert_eq!(
            parse_date_range("3/4/2026", None),
            (Some(date(2026, 3, 4)), None)
        );
    }

    #[test]
    fn test_f64_to_decimal_preserves_precision() {
        assert_eq!(f64_to_decimal(4.99), Some(dec!(4.99)));
        assert_eq!(f64_to_decimal(68.0), Some(dec!(68)));
        assert_eq!(f64_to_decimal(f64::NAN), None);
    }
}

// Utility helpers for parsing, normalizing and rounding.
//
// This module centralizes the "dirty" CSV/number/date handling so the
// aggregation code can assume clean, typed values.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects free text: any letter other than an exponent `e`/`E`.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a date and truncate it to the calendar day.
///
/// `YYYY-MM-DD` is the expected form, but spreadsheet exports often carry a
/// time part or slashes, so a few common variants are accepted. Offsets in
/// RFC 3339 values are ignored: the day is the one written in the value.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local().date())
}

/// Canonical form for categorical comparisons: trimmed and lower-cased.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // keep -0.0 out of the output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Percentage `part / whole * 100` rounded to one decimal, or 0 when `whole`
/// is zero.
pub fn rate_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(100.0 * part as f64 / whole as f64, 1)
}

pub fn average(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // beyond i64 there is nothing to group; keep the plain digits
    let mut res = match int_part.parse::<i64>() {
        Ok(v) => v.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("5"), Some(5.0))]
    #[case(Some(" 2.5 "), Some(2.5))]
    #[case(Some("1,200"), Some(1200.0))]
    #[case(Some("-3"), Some(-3.0))]
    #[case(Some("1e1"), Some(10.0))]
    #[case(Some("2.5E0"), Some(2.5))]
    #[case(Some("five"), None)]
    #[case(Some("e"), None)]
    #[case(Some("inf"), None)]
    #[case(Some("5 days"), None)]
    #[case(Some("NaN"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn parses_numbers_forgivingly(#[case] input: Option<&str>, #[case] expected: Option<f64>) {
        assert_eq!(parse_f64_safe(input), expected);
    }

    #[rstest]
    #[case("2024-03-05")]
    #[case("2024/03/05")]
    #[case("03/05/2024")]
    #[case("2024-03-05T23:59:00")]
    #[case("2024-03-05 08:15:00")]
    #[case("2024-03-05 08:15")]
    #[case("2024-03-05T23:30:00+09:00")]
    fn truncates_dates_to_the_day(#[case] input: &str) {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date_safe(Some(input)), expected);
    }

    #[rstest]
    #[case(Some("soon"))]
    #[case(Some("2024-13-40"))]
    #[case(Some("   "))]
    #[case(None)]
    fn rejects_unparsable_dates(#[case] input: Option<&str>) {
        assert_eq!(parse_date_safe(input), None);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  In-Transit \t"), "in-transit");
        assert_eq!(normalize(""), "");
    }

    #[rstest]
    #[case(33.333_333, 1, 33.3)]
    #[case(66.666_666, 1, 66.7)]
    #[case(0.25, 1, 0.3)]
    #[case(-0.25, 1, -0.3)]
    #[case(2.5, 2, 2.5)]
    #[case(-0.01, 1, 0.0)]
    fn rounds_half_away_from_zero(#[case] value: f64, #[case] decimals: u32, #[case] expected: f64) {
        assert_eq!(round_to(value, decimals), expected);
    }

    #[test]
    fn rate_of_empty_whole_is_zero() {
        assert_eq!(rate_percent(0, 0), 0.0);
        assert_eq!(rate_percent(1, 3), 33.3);
        assert_eq!(rate_percent(2, 2), 100.0);
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[0.0, 5.0]), 2.5);
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-42.0, 1), "-42.0");
        assert_eq!(format_number(7.0, 0), "7");
        assert_eq!(format_int(9855usize), "9,855");
        assert_eq!(format_number(1e20, 0), "100000000000000000000");
    }
}

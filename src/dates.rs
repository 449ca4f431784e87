//! Display formatting for content dates.
//!
//! Content dates are written as ISO `YYYY-MM-DD` (optionally followed by a
//! time, which is ignored). Anything that does not parse is shown verbatim
//! rather than rejected.

use chrono::NaiveDate;

fn parse_date(date: &str) -> Option<NaiveDate> {
    let (parsed, rest) = NaiveDate::parse_and_remainder(date, "%Y-%m-%d").ok()?;
    (rest.is_empty() || rest.starts_with(['T', ' '])).then_some(parsed)
}

/// `"2024-01-05"` → `"Jan 5, 2024"`.
pub fn format_date_short(date: &str) -> String {
    match parse_date(date.trim()) {
        Some(parsed) => parsed.format("%b %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the page
use chrono::{Datelike, NaiveDateTime, Timelike};

use super::locale::PageLocale;

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a server timestamp. Offsets in RFC 3339 input are kept as the
/// wall-clock time they describe.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Format a timestamp as "day month year at HH:MM"
/// Example: "2019-03-10T03:20:41" -> "10 March 2019 at 03:20"
///          (ru: "10 марта 2019 г. в 03:20")
/// Unparseable input is returned as is.
pub fn format_date(raw: &str, locale: PageLocale) -> String {
    match parse_timestamp(raw) {
        Some(dt) => format!(
            "{} {} {}{} {} {:02}:{:02}",
            dt.day(),
            locale.month_name(dt.month()),
            dt.year(),
            locale.year_suffix(),
            locale.at(),
            dt.hour(),
            dt.minute()
        ),
        None => raw.to_string(),
    }
}

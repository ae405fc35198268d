//! Year-month formatting for section payloads.

use chrono::NaiveDate;

/// Turns a `"YYYY-MM"` string into a human label ("2022-01" → "Jan 2022").
///
/// Empty input renders as an empty label; anything unparseable echoes back
/// unchanged rather than failing.
pub fn format_year_month(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Renders `"<start> - <end-or-Present>"`. `current == true` forces the end
/// label to "Present" regardless of any stored end value.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start_label = format_year_month(start);
    let end_label = if current {
        "Present".to_string()
    } else {
        format_year_month(end)
    };
    format!("{start_label} - {end_label}")
}

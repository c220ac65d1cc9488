//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an RFC 3339 timestamp for display (`2026-03-14 09:30`).
///
/// Falls back to the raw value if it does not parse.
#[askama::filter_fn]
pub fn short_datetime(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_short_datetime(&value.to_string()))
}

fn format_short_datetime(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_datetime_formats() {
        assert_eq!(
            format_short_datetime("2026-03-14T09:30:00Z"),
            "2026-03-14 09:30"
        );
    }

    #[test]
    fn test_short_datetime_passes_through_garbage() {
        assert_eq!(format_short_datetime("not a date"), "not a date");
    }
}

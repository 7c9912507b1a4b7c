//! Time-of-day parsing and 12-hour formatting.

use anyhow::{Context, Result};
use chrono::NaiveTime;

/// Accepted time-of-day input formats, tried in order.
///
/// Covers the canonical `HH:MM` form written by the authoring surface,
/// the seconds-bearing variant, and a 12-hour form for hand-edited rows.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p"];

/// Parses a stored time-of-day text value.
///
/// # Errors
///
/// Returns an error if the string matches none of the accepted formats.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .with_context(|| format!("invalid time-of-day value: {s:?}"))
}

/// Formats a time as a 12-hour clock string with AM/PM (`19:00` → `7:00 PM`).
#[must_use]
pub fn format_12h(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

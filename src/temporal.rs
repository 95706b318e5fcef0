//! Time-window checks for activity timestamps.
//!
//! Dates on activity pages are either relative ("2h ago", "3 weeks ago") or
//! ISO-8601 attributes. Anything that cannot be understood is treated as
//! inside the window.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static FIRST_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern is valid"));

/// Unit markers, checked in this order. "month ago" ends in "h ago" and
/// "day ago" in "y ago", so months come before hours and years only match
/// the spelled-out or "yr"/"yrs" forms.
const UNITS: &[(&[&str], i64)] = &[
    (&["month", "mo ago", "mos ago"], 30 * 24 * 60),
    (&["year", "yr ago", "yrs ago"], 365 * 24 * 60),
    (&["minute", "min ago", "mins ago", "m ago"], 1),
    (&["hour", "hr ago", "hrs ago", "h ago"], 60),
    (&["day", "d ago"], 24 * 60),
    (&["week", "wk ago", "wks ago", "w ago"], 7 * 24 * 60),
];

const MAX_MAGNITUDE: i64 = 1_000_000;

/// Age described by a relative marker, `None` when no unit is recognised.
fn relative_age(lower: &str) -> Option<Duration> {
    let minutes_per_unit = UNITS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| lower.contains(m)))
        .map(|(_, minutes)| *minutes)?;
    let magnitude: i64 = FIRST_INT
        .find(lower)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
        .min(MAX_MAGNITUDE);
    Some(Duration::minutes(magnitude * minutes_per_unit))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whether an activity stamped `raw` happened at or after `cutoff`.
///
/// Missing, blank and unparsable values count as inside the window.
pub fn within_window(raw: Option<&str>, cutoff: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return true;
    };

    let lower = raw.to_lowercase();
    if lower.contains("ago") {
        return match relative_age(&lower) {
            // Ages past the calendar's range are unparsable like any other.
            Some(age) => now.checked_sub_signed(age).is_none_or(|at| at >= cutoff),
            None => true,
        };
    }

    match parse_timestamp(raw) {
        Some(at) => at >= cutoff,
        None => true,
    }
}

/// Cutoff for "the last `hours` hours".
pub fn hours_ago(hours: u32) -> DateTime<Utc> {
    Utc::now() - Duration::hours(i64::from(hours))
}

//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use crate::session::Change;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~10 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 10 * 365 * 24 * 60;

/// Local date-time layouts, including what an HTML `datetime-local` input produces.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a datetime string as ISO 8601, local wall-clock time, or relative time.
///
/// Supports:
/// - ISO 8601: "2026-01-15T10:30:00Z"
/// - Local: "2026-01-15T10:30" or "2026-01-15 10:30", in the zone of `now`
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime<Tz: TimeZone>(s: &str, now: &DateTime<Tz>) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();

    // Try ISO 8601 first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(naive) = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    {
        return match now.timezone().from_local_datetime(&naive) {
            // Ambiguous (DST fall-back): use the earlier time
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
            LocalResult::None => anyhow::bail!("{s} does not exist in the local time zone"),
        };
    }

    // Try relative time: "N hours/minutes/days/weeks ago"
    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use ISO 8601 (e.g., 2026-01-15T10:30:00Z), local time (e.g., 2026-01-15T10:30) or relative (e.g., '20 minutes ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    let duration = Duration::minutes(n * minutes_per_unit);
    Ok(now.with_timezone(&Utc) - duration)
}

/// Turns a failed push into a command error.
///
/// The CLI process exits right after the command, so a change that did not
/// reach the remote is lost and must be reported.
pub fn ensure_saved(change: Change) -> anyhow::Result<()> {
    if change == Change::SaveFailed {
        anyhow::bail!("failed to save changes to remote; see log for details");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-10T15:00:00+01:00").unwrap()
    }

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn parses_iso_8601() {
        let parsed = parse_datetime("2024-03-10T08:15:00.000Z", &now()).unwrap();
        assert_eq!(parsed, utc("2024-03-10T08:15:00Z"));
    }

    #[test]
    fn parses_local_datetime_input_in_viewer_zone() {
        let parsed = parse_datetime("2024-03-10T08:15", &now()).unwrap();
        assert_eq!(parsed, utc("2024-03-10T07:15:00Z"));

        let parsed = parse_datetime("2024-03-10 08:15:30", &now()).unwrap();
        assert_eq!(parsed, utc("2024-03-10T07:15:30Z"));
    }

    #[test]
    fn parses_relative_time() {
        let parsed = parse_datetime("20 minutes ago", &now()).unwrap();
        assert_eq!(parsed, utc("2024-03-10T13:40:00Z"));

        let parsed = parse_datetime("1 hour ago", &now()).unwrap();
        assert_eq!(parsed, utc("2024-03-10T13:00:00Z"));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_datetime("not-a-date", &now()).unwrap_err();
        assert!(err.to_string().contains("Invalid datetime"));
    }

    #[test]
    fn rejects_huge_relative_values() {
        assert!(parse_datetime("99999999 weeks ago", &now()).is_err());
    }

    #[test]
    fn ensure_saved_only_fails_on_save_failure() {
        assert!(ensure_saved(Change::Saved).is_ok());
        assert!(ensure_saved(Change::Unchanged).is_ok());
        assert!(ensure_saved(Change::SaveFailed).is_err());
    }
}

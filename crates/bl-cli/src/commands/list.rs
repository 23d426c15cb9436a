//! List command: the log grouped by day.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use bl_core::{Locale, render_text};
use bl_remote::EntryRemote;
use chrono::{DateTime, TimeZone};

use crate::session::Session;

/// Loads the remote collection and prints it, newest day first.
pub async fn run<W, R, Tz>(
    writer: &mut W,
    session: &mut Session<R>,
    now: &DateTime<Tz>,
    locale: Locale,
    json: bool,
) -> Result<()>
where
    W: Write + Send,
    R: EntryRemote,
    Tz: TimeZone,
    Tz::Offset: Display + Sync,
{
    session
        .load()
        .await
        .context("failed to load entries from remote")?;

    let groups = session.project(now, locale);
    if json {
        let rendered = serde_json::to_string_pretty(&groups)
            .context("failed to encode entries")?;
        writeln!(writer, "{rendered}")?;
    } else {
        write!(writer, "{}", render_text(&groups, locale))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use bl_core::{DiaperType, Entry, EntryId, FeedingType, parse_timestamp};
    use chrono::FixedOffset;
    use insta::assert_snapshot;

    use crate::testing::FakeRemote;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-02T09:00:00+00:00").unwrap()
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry::diaper(
                EntryId::new(3),
                parse_timestamp("2024-01-02T07:10:00Z").unwrap(),
                DiaperType::Poop,
            ),
            Entry::feeding(
                EntryId::new(2),
                parse_timestamp("2024-01-02T06:40:00Z").unwrap(),
                FeedingType::Bottle,
                None,
            ),
            Entry::nap(
                EntryId::new(1),
                parse_timestamp("2024-01-01T21:00:00Z").unwrap(),
            ),
        ]
    }

    #[tokio::test]
    async fn list_renders_text_groups() {
        let mut session = Session::new(FakeRemote::with_entries(entries()));
        let mut output = Vec::new();

        run(&mut output, &mut session, &now(), Locale::English, false)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Today
          07:10  Poop  [3]
          06:40  Formula (?)  [2]

        Yesterday
          21:00  Nap (9h 40min)  [1]
        ");
    }

    #[tokio::test]
    async fn list_json_is_parseable() {
        let mut session = Session::new(FakeRemote::with_entries(entries()));
        let mut output = Vec::new();

        run(&mut output, &mut session, &now(), Locale::Polish, true)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["label"], "Dzisiaj");
        assert_eq!(value[1]["entries"][0]["napMinutes"], 580);
    }

    #[tokio::test]
    async fn list_fails_when_remote_unavailable() {
        let remote = FakeRemote::default();
        remote.fail_fetch(true);
        let mut session = Session::new(remote);
        let mut output = Vec::new();

        let err = run(&mut output, &mut session, &now(), Locale::English, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to load entries"));
        assert!(output.is_empty());
    }
}

//! Day-grouped view of the entry log.
//!
//! [`project`] turns a store snapshot into display-ready day groups:
//! - groups are keyed by local calendar day, most recent day first
//! - entries within a group are ordered newest first
//! - each entry carries a localized label and its local `HH:MM` time
//! - naps carry a duration inferred from the next logged entry
//!
//! The viewer's time zone is the zone of the `now` argument, so callers pass
//! `Local::now()` in production and a fixed offset in tests.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::entry::{Entry, EntryKind};
use crate::locale::{Labels, Locale};
use crate::types::{DiaperType, FeedingType};

/// Entries logged on one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub date: NaiveDate,
    /// "Today", "Yesterday", or weekday plus `DD.MM.YYYY`.
    pub label: String,
    pub entries: Vec<AnnotatedEntry>,
}

/// An entry with its display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedEntry {
    #[serde(flatten)]
    pub entry: Entry,
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    pub label: String,
    #[serde(rename = "napMinutes", skip_serializing_if = "Option::is_none")]
    pub nap_duration: Option<NapDuration>,
}

/// Inferred length of a nap, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NapDuration(i64);

impl NapDuration {
    /// Elapsed time from `start` to `end`, rounded to the nearest minute
    /// (half a minute rounds up).
    #[must_use]
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let ms = (end - start).num_milliseconds();
        Self((ms + 30_000).div_euclid(60_000))
    }

    #[must_use]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes)
    }

    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NapDuration {
    /// `45min`, `2h`, or `1h 30min`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0;
        if minutes < 60 {
            return write!(f, "{minutes}min");
        }
        let hours = minutes / 60;
        let rest = minutes % 60;
        if rest == 0 {
            write!(f, "{hours}h")
        } else {
            write!(f, "{hours}h {rest}min")
        }
    }
}

/// Instants of every logged entry, oldest first.
///
/// Nap durations are read off this timeline: a nap ends at the first entry
/// of any type logged strictly after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline(Vec<DateTime<Utc>>);

impl Timeline {
    #[must_use]
    pub fn new(entries: &[Entry]) -> Self {
        let mut instants: Vec<DateTime<Utc>> =
            entries.iter().map(|entry| entry.timestamp).collect();
        instants.sort_unstable();
        Self(instants)
    }

    /// First instant strictly after `instant`.
    #[must_use]
    pub fn next_after(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let next = self.0.partition_point(|timestamp| *timestamp <= instant);
        self.0.get(next).copied()
    }

    /// Duration of `nap`, ended by the chronologically next entry.
    ///
    /// Returns `None` for non-nap entries and when nothing was logged after
    /// the nap.
    #[must_use]
    pub fn nap_duration(&self, nap: &Entry) -> Option<NapDuration> {
        if !nap.is_nap() {
            return None;
        }
        self.next_after(nap.timestamp)
            .map(|end| NapDuration::between(nap.timestamp, end))
    }
}

/// Groups and annotates `entries` for display.
pub fn project<Tz>(entries: &[Entry], now: &DateTime<Tz>, locale: Locale) -> Vec<DayGroup>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let tz = now.timezone();
    let today = now.date_naive();
    let labels = locale.labels();

    let timeline = Timeline::new(entries);

    let mut days: BTreeMap<NaiveDate, Vec<&Entry>> = BTreeMap::new();
    for entry in entries {
        let day = entry.timestamp.with_timezone(&tz).date_naive();
        days.entry(day).or_default().push(entry);
    }

    days.into_iter()
        .rev()
        .map(|(date, mut day)| {
            day.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
            DayGroup {
                date,
                label: day_label(date, today, locale),
                entries: day
                    .into_iter()
                    .map(|entry| annotate(entry, &tz, &timeline, labels))
                    .collect(),
            }
        })
        .collect()
}

/// Header for a day group relative to `today`.
pub fn day_label(date: NaiveDate, today: NaiveDate, locale: Locale) -> String {
    let labels = locale.labels();
    if date == today {
        return labels.today.to_string();
    }
    if today.pred_opt() == Some(date) {
        return labels.yesterday.to_string();
    }
    format!("{}, {}", locale.weekday_name(date), date.format("%d.%m.%Y"))
}

fn annotate<Tz>(entry: &Entry, tz: &Tz, timeline: &Timeline, labels: &Labels) -> AnnotatedEntry
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let nap_duration = timeline.nap_duration(entry);
    let local = entry.timestamp.with_timezone(tz);

    AnnotatedEntry {
        entry: entry.clone(),
        time: local.format("%H:%M").to_string(),
        label: describe(&entry.kind, nap_duration, labels),
        nap_duration,
    }
}

fn describe(kind: &EntryKind, nap_duration: Option<NapDuration>, labels: &Labels) -> String {
    match kind {
        EntryKind::Feeding {
            feeding_type,
            amount,
        } => {
            let name = match feeding_type {
                FeedingType::Breast => labels.breast,
                FeedingType::Bottle => labels.bottle,
            };
            amount.filter(|ml| *ml > 0).map_or_else(
                || format!("{name} ({})", labels.unknown_amount),
                |ml| format!("{name} ({ml} ml)"),
            )
        }
        EntryKind::Diaper { diaper_type } => match diaper_type {
            DiaperType::Poop => labels.poop.to_string(),
            DiaperType::Pee => labels.pee.to_string(),
        },
        EntryKind::Nap => nap_duration.map_or_else(
            || labels.nap.to_string(),
            |duration| format!("{} ({duration})", labels.nap),
        ),
    }
}

/// Renders day groups as plain text for the terminal.
pub fn render_text(groups: &[DayGroup], locale: Locale) -> String {
    let mut output = String::new();
    if groups.is_empty() {
        let _ = writeln!(output, "{}", locale.labels().no_entries);
        return output;
    }

    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(output);
        }
        let _ = writeln!(output, "{}", group.label);
        for annotated in &group.entries {
            let _ = writeln!(
                output,
                "  {}  {}  [{}]",
                annotated.time, annotated.label, annotated.entry.id
            );
        }
    }
    output
}

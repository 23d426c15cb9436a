//! Logging new feedings, diaper changes and naps.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use bl_core::{AMOUNT_PRESETS, Entry, EntryKind, Locale};
use bl_remote::EntryRemote;
use chrono::{DateTime, TimeZone, Utc};

use crate::commands::util::ensure_saved;
use crate::session::Session;

/// Checks a feeding amount against the presets.
///
/// `None` means the amount is unknown. `any_amount` accepts any positive value.
pub fn validate_amount(amount: Option<u32>, any_amount: bool) -> Result<Option<u32>> {
    match amount {
        None => Ok(None),
        Some(0) => anyhow::bail!("amount must be positive; omit --amount when it is unknown"),
        Some(ml) if any_amount || AMOUNT_PRESETS.contains(&Some(ml)) => Ok(Some(ml)),
        Some(ml) => anyhow::bail!(
            "{ml} ml is not one of the presets (10 to 300 in steps of 10); pass --any-amount to log it anyway"
        ),
    }
}

/// Logs a new entry of `kind` at `now` and pushes the snapshot.
pub async fn run<W, R, Tz>(
    writer: &mut W,
    session: &mut Session<R>,
    kind: EntryKind,
    now: &DateTime<Tz>,
    locale: Locale,
) -> Result<Entry>
where
    W: Write + Send,
    R: EntryRemote,
    Tz: TimeZone,
    Tz::Offset: Display + Sync,
{
    // A failed load leaves the store empty; pushing it would wipe the remote.
    session
        .load()
        .await
        .context("failed to load entries from remote, nothing was saved")?;

    let created_at = now.with_timezone(&Utc);
    let entry = Entry::new(session.next_id(created_at), created_at, kind);
    let change = session.add(entry.clone()).await?;
    ensure_saved(change)?;

    let annotated = session
        .project(now, locale)
        .into_iter()
        .flat_map(|group| group.entries)
        .find(|annotated| annotated.entry.id == entry.id);
    if let Some(annotated) = annotated {
        writeln!(
            writer,
            "Saved {}  {}  [{}]",
            annotated.time, annotated.label, entry.id
        )?;
    }
    Ok(entry)
}

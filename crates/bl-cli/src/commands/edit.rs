//! Edit command: change when an entry happened.

use std::io::Write;

use anyhow::{Context, Result};
use bl_core::EntryId;
use bl_remote::EntryRemote;
use chrono::{DateTime, TimeZone};

use crate::commands::util::{ensure_saved, parse_datetime};
use crate::session::{Change, Session};

/// Moves entry `id` to the time described by `when`.
///
/// Unparseable input and absent ids leave everything unchanged.
pub async fn run<W, R, Tz>(
    writer: &mut W,
    session: &mut Session<R>,
    id: EntryId,
    when: &str,
    now: &DateTime<Tz>,
) -> Result<Change>
where
    W: Write + Send,
    R: EntryRemote,
    Tz: TimeZone,
    Tz::Offset: Sync,
{
    session
        .load()
        .await
        .context("failed to load entries from remote, nothing was changed")?;

    let timestamp = match parse_datetime(when, now) {
        Ok(timestamp) => timestamp,
        Err(err) => {
            tracing::warn!(%id, when, error = %err, "ignoring edit with unparseable time");
            writeln!(writer, "Entry [{id}] unchanged: {err}")?;
            return Ok(Change::Unchanged);
        }
    };

    let change = session.set_timestamp(id, timestamp).await;
    ensure_saved(change)?;
    if change == Change::Unchanged {
        writeln!(writer, "No entry [{id}], nothing to edit.")?;
    } else {
        let local = timestamp.with_timezone(&now.timezone()).naive_local();
        let moved_to = local.format("%Y-%m-%d %H:%M");
        writeln!(writer, "Moved [{id}] to {moved_to}.")?;
    }
    Ok(change)
}

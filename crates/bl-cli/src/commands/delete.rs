//! Delete command.

use std::io::Write;

use anyhow::{Context, Result};
use bl_core::EntryId;
use bl_remote::EntryRemote;

use crate::commands::util::ensure_saved;
use crate::session::{Change, Session};

/// Deletes entry `id`. Deleting an absent id is not an error.
pub async fn run<W: Write + Send, R: EntryRemote>(
    writer: &mut W,
    session: &mut Session<R>,
    id: EntryId,
) -> Result<Change> {
    session
        .load()
        .await
        .context("failed to load entries from remote, nothing was deleted")?;

    let change = session.remove(id).await;
    ensure_saved(change)?;
    if change == Change::Unchanged {
        writeln!(writer, "No entry [{id}], nothing to delete.")?;
    } else {
        writeln!(writer, "Deleted [{id}].")?;
    }
    Ok(change)
}

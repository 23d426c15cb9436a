//! Session: an entry store paired with the remote it mirrors.
//!
//! Every mutation is applied to the store first and then pushed to the remote
//! as a full snapshot. Remote failures are logged and never retried; the
//! store keeps whatever state it had. Last writer wins: a refresh simply
//! replaces the store with the remote collection.

use bl_core::{DayGroup, Entry, EntryId, EntryStore, Locale, StoreError, project};
use bl_remote::{EntryRemote, RemoteError};
use chrono::{DateTime, TimeZone, Utc};

/// Result of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing matched; the store and remote were left alone.
    Unchanged,
    /// Store updated and snapshot pushed.
    Saved,
    /// Store updated but the push failed.
    SaveFailed,
}

/// Owns the entry store and its remote.
#[derive(Debug)]
pub struct Session<R> {
    store: EntryStore,
    remote: R,
}

impl<R: EntryRemote> Session<R> {
    pub const fn new(remote: R) -> Self {
        Self {
            store: EntryStore::new(),
            remote,
        }
    }

    pub const fn store(&self) -> &EntryStore {
        &self.store
    }

    #[cfg(test)]
    pub(crate) const fn remote(&self) -> &R {
        &self.remote
    }

    /// Replaces the store with the remote collection.
    ///
    /// On failure the store is left unchanged.
    pub async fn load(&mut self) -> Result<usize, RemoteError> {
        let entries = self.remote.fetch().await?;
        let count = entries.len();
        self.store.replace_all(entries);
        Ok(count)
    }

    /// Like [`Session::load`], but failures are logged instead of returned.
    pub async fn refresh(&mut self) -> bool {
        match self.load().await {
            Ok(count) => {
                tracing::debug!(count, "refreshed entries");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load entries");
                false
            }
        }
    }

    /// Pushes the full snapshot. Failures are logged.
    pub async fn persist(&self) -> bool {
        match self.remote.push(self.store.snapshot()).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "failed to save entries");
                false
            }
        }
    }

    /// Id for an entry created at `now`.
    pub fn next_id(&self, now: DateTime<Utc>) -> EntryId {
        self.store.next_id(now)
    }

    /// Adds an entry and persists.
    pub async fn add(&mut self, entry: Entry) -> Result<Change, StoreError> {
        self.store.add(entry)?;
        Ok(self.saved().await)
    }

    /// Deletes an entry and persists. Absent ids change nothing.
    pub async fn remove(&mut self, id: EntryId) -> Change {
        if !self.store.remove(id) {
            return Change::Unchanged;
        }
        self.saved().await
    }

    /// Moves an entry to `timestamp` and persists.
    pub async fn set_timestamp(&mut self, id: EntryId, timestamp: DateTime<Utc>) -> Change {
        if !self.store.set_timestamp(id, timestamp) {
            return Change::Unchanged;
        }
        self.saved().await
    }

    /// Day-grouped view of the current store.
    pub fn project<Tz>(&self, now: &DateTime<Tz>, locale: Locale) -> Vec<DayGroup>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        project(self.store.snapshot(), now, locale)
    }

    async fn saved(&self) -> Change {
        if self.persist().await {
            Change::Saved
        } else {
            Change::SaveFailed
        }
    }
}

//! In-memory entry collection.
//!
//! The store owns no persistence. Callers push a snapshot to the remote after
//! each mutation that reports a change.

use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

use crate::entry::{Entry, parse_timestamp};
use crate::types::EntryId;

/// Store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An entry with this id is already present.
    #[error("entry {0} already exists")]
    DuplicateId(EntryId),
}

/// Ordered collection of entries, most recently added first.
///
/// Internal order is not load-bearing; views sort at projection time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a store from a loaded collection. See [`EntryStore::replace_all`].
    #[must_use]
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut store = Self::new();
        store.replace_all(entries);
        store
    }

    /// Current entries in store order.
    #[must_use]
    pub fn snapshot(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Allocates an id for an entry created at `now`.
    ///
    /// Uses the creation instant in milliseconds, bumped past the largest
    /// existing id so two entries created within the same millisecond (or
    /// after a clock step backwards) never collide.
    #[must_use]
    pub fn next_id(&self, now: DateTime<Utc>) -> EntryId {
        let candidate = EntryId::from_instant(now);
        match self.entries.iter().map(|entry| entry.id).max() {
            Some(max) if max >= candidate => EntryId::new(max.value().saturating_add(1)),
            _ => candidate,
        }
    }

    /// Inserts an entry at the head of the collection.
    pub fn add(&mut self, entry: Entry) -> Result<(), StoreError> {
        if self.get(entry.id).is_some() {
            return Err(StoreError::DuplicateId(entry.id));
        }
        tracing::debug!(id = %entry.id, "entry added");
        self.entries.insert(0, entry);
        Ok(())
    }

    /// Deletes the entry with `id`. Absent ids are a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            tracing::debug!(%id, "entry removed");
        } else {
            tracing::debug!(%id, "remove ignored, no such entry");
        }
        removed
    }

    /// Replaces the timestamp of entry `id` with the RFC 3339 instant `raw`.
    ///
    /// No-op when the id is absent or `raw` does not parse. Returns whether
    /// the entry was updated.
    pub fn update_timestamp(&mut self, id: EntryId, raw: &str) -> bool {
        let Some(timestamp) = parse_timestamp(raw) else {
            tracing::debug!(%id, raw, "timestamp update ignored, unparseable input");
            return false;
        };
        self.set_timestamp(id, timestamp)
    }

    /// Replaces the timestamp of entry `id`. No other field is touched.
    pub fn set_timestamp(&mut self, id: EntryId, timestamp: DateTime<Utc>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            tracing::debug!(%id, "timestamp update ignored, no such entry");
            return false;
        };
        entry.timestamp = timestamp.trunc_subsecs(3);
        true
    }

    /// Replaces the whole collection, e.g. after loading from the remote.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn replace_all(&mut self, entries: Vec<Entry>) {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries {
            if seen.insert(entry.id) {
                kept.push(entry);
            } else {
                tracing::warn!(id = %entry.id, "dropping entry with duplicate id");
            }
        }
        self.entries = kept;
    }
}

//! In-memory remote for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use bl_core::Entry;
use bl_remote::{EntryRemote, RemoteError};

#[derive(Debug, Default)]
pub struct FakeRemote {
    entries: Mutex<Vec<Entry>>,
    fail_fetch: AtomicBool,
    fail_push: AtomicBool,
    fetches: AtomicUsize,
    pushes: AtomicUsize,
}

impl FakeRemote {
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_push(&self, fail: bool) {
        self.fail_push.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn replace(&self, entries: Vec<Entry>) {
        *self.entries.lock().unwrap() = entries;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn pushes(&self) -> usize {
        self.pushes.load(Ordering::SeqCst)
    }
}

fn unavailable() -> RemoteError {
    RemoteError::InvalidUrl {
        url: "fake://remote".to_string(),
        reason: "remote unavailable".to_string(),
    }
}

impl EntryRemote for FakeRemote {
    async fn fetch(&self) -> Result<Vec<Entry>, RemoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.stored())
    }

    async fn push(&self, entries: &[Entry]) -> Result<(), RemoteError> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.pushes.fetch_add(1, Ordering::SeqCst);
        self.replace(entries.to_vec());
        Ok(())
    }
}

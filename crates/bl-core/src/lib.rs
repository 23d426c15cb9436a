//! Core domain logic for the baby log.
//!
//! This crate contains the pure, I/O-free parts of the log:
//! - Entry model: feedings, diaper changes and naps with their wire format
//! - Entry store: the in-memory collection callers mutate and persist
//! - Projection: day-grouped, localized views with inferred nap durations

pub mod entry;
pub mod locale;
pub mod projection;
pub mod store;
pub mod types;

pub use entry::{AMOUNT_PRESETS, Entry, EntryKind, format_timestamp, parse_timestamp};
pub use locale::{Labels, Locale};
pub use projection::{
    AnnotatedEntry, DayGroup, NapDuration, Timeline, day_label, project, render_text,
};
pub use store::{EntryStore, StoreError};
pub use types::{DiaperType, EntryId, FeedingType, ValidationError};

//! Logged care events.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DiaperType, EntryId, FeedingType};

/// Amounts offered when logging a feeding, in milliliters.
///
/// `None` stands for "amount unknown".
pub const AMOUNT_PRESETS: [Option<u32>; 31] = {
    let mut presets = [None; 31];
    let mut step: u32 = 1;
    while step < 31 {
        presets[step as usize] = Some(step * 10);
        step += 1;
    }
    presets
};

/// One logged event.
///
/// Serializes to the flat wire shape shared with the remote store:
/// `{"id": 1, "timestamp": "...", "type": "feeding", "feedingType": "breast", "amount": 60}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, assigned at creation.
    pub id: EntryId,
    /// When the event happened.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    #[serde(flatten)]
    pub kind: EntryKind,
}

/// The type of event logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryKind {
    Feeding {
        #[serde(rename = "feedingType")]
        feeding_type: FeedingType,
        /// Milliliters, `None` when unknown.
        #[serde(default)]
        amount: Option<u32>,
    },
    Diaper {
        #[serde(rename = "diaperType")]
        diaper_type: DiaperType,
    },
    /// Duration is derived from the next entry, never stored.
    Nap,
}

impl Entry {
    /// Creates an entry. The timestamp is truncated to milliseconds, the
    /// precision of the wire format.
    #[must_use]
    pub fn new(id: EntryId, timestamp: DateTime<Utc>, kind: EntryKind) -> Self {
        Self {
            id,
            timestamp: timestamp.trunc_subsecs(3),
            kind,
        }
    }

    #[must_use]
    pub fn feeding(
        id: EntryId,
        timestamp: DateTime<Utc>,
        feeding_type: FeedingType,
        amount: Option<u32>,
    ) -> Self {
        Self::new(
            id,
            timestamp,
            EntryKind::Feeding {
                feeding_type,
                amount,
            },
        )
    }

    #[must_use]
    pub fn diaper(id: EntryId, timestamp: DateTime<Utc>, diaper_type: DiaperType) -> Self {
        Self::new(id, timestamp, EntryKind::Diaper { diaper_type })
    }

    #[must_use]
    pub fn nap(id: EntryId, timestamp: DateTime<Utc>) -> Self {
        Self::new(id, timestamp, EntryKind::Nap)
    }

    /// Returns true for nap entries.
    #[must_use]
    pub const fn is_nap(&self) -> bool {
        matches!(self.kind, EntryKind::Nap)
    }
}

/// Parses an RFC 3339 instant, the format timestamps travel in.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formats an instant the way it is stored: UTC, milliseconds, `Z` suffix.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unknown feeding type string.
    #[error("invalid feeding type: {value} (expected breast or bottle)")]
    InvalidFeedingType { value: String },

    /// Unknown diaper type string.
    #[error("invalid diaper type: {value} (expected poop or pee)")]
    InvalidDiaperType { value: String },

    /// Unknown locale identifier.
    #[error("unsupported locale: {value} (expected pl or en)")]
    InvalidLocale { value: String },

    /// Entry id was not an integer.
    #[error("invalid entry id: {value}")]
    InvalidEntryId { value: String },
}

/// Identifier of a logged entry.
///
/// Ids are assigned at creation time from the creation instant in Unix
/// milliseconds, so they double as a stable lookup and tie-break key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Id derived from a creation instant.
    #[must_use]
    pub const fn from_instant(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp_millis())
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse()
            .map(Self)
            .map_err(|_| ValidationError::InvalidEntryId {
                value: s.to_string(),
            })
    }
}

/// What the baby was fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedingType {
    /// Breastfeeding.
    Breast,
    /// Formula from a bottle.
    Bottle,
}

impl FeedingType {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breast => "breast",
            Self::Bottle => "bottle",
        }
    }
}

impl fmt::Display for FeedingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeedingType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breast" => Ok(Self::Breast),
            "bottle" | "formula" => Ok(Self::Bottle),
            _ => Err(ValidationError::InvalidFeedingType {
                value: s.to_string(),
            }),
        }
    }
}

/// Contents of a changed diaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaperType {
    Poop,
    Pee,
}

impl DiaperType {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Poop => "poop",
            Self::Pee => "pee",
        }
    }
}

impl fmt::Display for DiaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiaperType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "poop" => Ok(Self::Poop),
            "pee" => Ok(Self::Pee),
            _ => Err(ValidationError::InvalidDiaperType {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_parses_with_optional_hash() {
        assert_eq!(
            "1704103200000".parse::<EntryId>().unwrap().value(),
            1_704_103_200_000
        );
        assert_eq!("#42".parse::<EntryId>().unwrap(), EntryId::new(42));
        assert!("abc".parse::<EntryId>().is_err());
    }

    #[test]
    fn entry_id_from_instant_uses_millis() {
        let instant = DateTime::parse_from_rfc3339("2024-01-01T10:00:00.123Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(EntryId::from_instant(instant).value(), 1_704_103_200_123);
    }

    #[test]
    fn entry_id_serializes_as_number() {
        let json = serde_json::to_string(&EntryId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn feeding_type_roundtrip() {
        for variant in [FeedingType::Breast, FeedingType::Bottle] {
            let parsed: FeedingType = variant.to_string().parse().unwrap();
            assert_eq!(parsed, variant);
        }
        assert_eq!(
            "formula".parse::<FeedingType>().unwrap(),
            FeedingType::Bottle
        );
    }

    #[test]
    fn diaper_type_rejects_unknown() {
        let err = "both".parse::<DiaperType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid diaper type: both (expected poop or pee)"
        );
    }
}

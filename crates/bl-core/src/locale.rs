//! Display strings per locale.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Language used for day headers and entry labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Polish,
    English,
}

/// The label table for one locale.
#[derive(Debug)]
pub struct Labels {
    pub today: &'static str,
    pub yesterday: &'static str,
    /// Weekday names, Sunday first.
    pub weekdays: [&'static str; 7],
    pub breast: &'static str,
    pub bottle: &'static str,
    pub unknown_amount: &'static str,
    pub poop: &'static str,
    pub pee: &'static str,
    pub nap: &'static str,
    pub no_entries: &'static str,
}

const POLISH: Labels = Labels {
    today: "Dzisiaj",
    yesterday: "Wczoraj",
    weekdays: [
        "Niedziela",
        "Poniedziałek",
        "Wtorek",
        "Środa",
        "Czwartek",
        "Piątek",
        "Sobota",
    ],
    breast: "Pierś",
    bottle: "Mleko modyfikowane",
    unknown_amount: "?",
    poop: "Kupa 💩",
    pee: "Siku",
    nap: "Drzemka 😴",
    no_entries: "Brak wpisów.",
};

const ENGLISH: Labels = Labels {
    today: "Today",
    yesterday: "Yesterday",
    weekdays: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    breast: "Breast",
    bottle: "Formula",
    unknown_amount: "?",
    poop: "Poop",
    pee: "Pee",
    nap: "Nap",
    no_entries: "No entries.",
};

impl Locale {
    #[must_use]
    pub const fn labels(self) -> &'static Labels {
        match self {
            Self::Polish => &POLISH,
            Self::English => &ENGLISH,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Polish => "pl",
            Self::English => "en",
        }
    }

    /// Weekday name of `date` in this locale.
    #[must_use]
    pub fn weekday_name(self, date: NaiveDate) -> &'static str {
        let index = date.weekday().num_days_from_sunday() as usize;
        self.labels().weekdays[index]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        // Accept bare language codes and region-qualified tags (pl-PL, en_US).
        let language = lower.split(['-', '_']).next().unwrap_or_default();
        match language {
            "pl" | "polish" => Ok(Self::Polish),
            "en" | "english" => Ok(Self::English),
            _ => Err(ValidationError::InvalidLocale {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

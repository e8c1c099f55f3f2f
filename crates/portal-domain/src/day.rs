//! Calendar day as kept in the stored document.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A day stored as text.
///
/// Days written here are always `YYYY-MM-DD`, but older documents hold
/// whatever was typed into the form, blank included. The raw text is kept
/// so such a document still loads and saves back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(String);

impl Day {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Strict `YYYY-MM-DD` parse, used when a form is submitted.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), Self::FORMAT).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `None` when the stored text is not a valid day.
    pub fn date(&self) -> Option<NaiveDate> {
        Self::parse(&self.0)
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date.format(Self::FORMAT).to_string())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

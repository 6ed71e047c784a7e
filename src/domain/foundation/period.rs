//! PeriodKey value object: the calendar day a quota balance belongs to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A calendar day, serialized as `YYYY-MM-DD` with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodKey(NaiveDate);

impl PeriodKey {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Creates a period key for the given day.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the inner date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns true if both keys identify the same calendar day.
    pub fn is_same_day(&self, other: &PeriodKey) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for PeriodKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("periodKey", e.to_string()))
    }
}

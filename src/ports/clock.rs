//! Clock Port - source of "today" and "now".
//!
//! Period keys follow the user's local calendar date, so the day boundary is
//! local midnight. Timestamps for history entries are UTC.

use chrono::{DateTime, Local, Utc};

use crate::domain::foundation::PeriodKey;

/// Port for reading the current date and time
pub trait Clock: Send + Sync {
    /// The current local calendar day.
    fn today(&self) -> PeriodKey;

    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> PeriodKey {
        PeriodKey::from_date(Local::now().date_naive())
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

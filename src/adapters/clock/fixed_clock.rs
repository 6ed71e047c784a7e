//! Settable clock for tests and demos.

use std::sync::RwLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::foundation::PeriodKey;
use crate::ports::Clock;

/// Clock pinned to a day that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    /// Moves the clock to `day`.
    pub fn set(&self, day: NaiveDate) {
        if let Ok(mut today) = self.today.write() {
            *today = day;
        }
    }

    /// Moves the clock forward by `days`.
    pub fn advance_days(&self, days: i64) {
        if let Ok(mut today) = self.today.write() {
            *today += Duration::days(days);
        }
    }

    fn current(&self) -> NaiveDate {
        match self.today.read() {
            Ok(today) => *today,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> PeriodKey {
        PeriodKey::from_date(self.current())
    }

    /// Noon UTC on the current day.
    fn now(&self) -> DateTime<Utc> {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        Utc.from_utc_datetime(&self.current().and_time(noon))
    }
}

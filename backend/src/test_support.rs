//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;

/// Clock frozen at one instant, so article date components are predictable.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock(DateTime<Utc>);

impl FixtureClock {
    /// Noon UTC on the given calendar day.
    ///
    /// # Panics
    /// When the date does not exist.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let noon = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("fixture date exists");
        Self(noon.and_utc())
    }
}

impl Default for FixtureClock {
    /// 2 January 2026, giving the article prefix `260102`.
    fn default() -> Self {
        Self::on(2026, 1, 2)
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

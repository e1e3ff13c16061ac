//! Business-hours configuration for appointment scheduling.

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// The window in which appointments may start.
///
/// The shop is closed on weekends; on weekdays an appointment may start
/// from `open` up to and including `latest_start`. Timestamps are read on
/// the shop's own clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(default = "default_open")]
    pub open: NaiveTime,
    #[serde(default = "default_latest_start")]
    pub latest_start: NaiveTime,
}

fn default_open() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

fn default_latest_start() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 30, 0).unwrap()
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open: default_open(),
            latest_start: default_latest_start(),
        }
    }
}

impl BusinessHours {
    /// Whether an appointment may start at `start`.
    pub fn allows(&self, start: DateTime<Utc>) -> bool {
        if matches!(start.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        let t = start.time();
        t >= self.open && t <= self.latest_start
    }

    /// Human rendering for error messages, e.g. "Mon-Fri, 10:00-18:30".
    pub fn describe(&self) -> String {
        format!(
            "Mon-Fri, {}-{}",
            self.open.format("%H:%M"),
            self.latest_start.format("%H:%M")
        )
    }
}

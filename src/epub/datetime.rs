//! UTC date and time used for the `dcterms:modified` stamp
//! and archive entry timestamps.

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

/// The [date](Date) and [time](Time) components, always in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// The current system time.
    pub(crate) fn now() -> Self {
        let secs = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            // The system clock is set before 1970
            Err(error) => -(error.duration().as_secs() as i64),
        };
        Self::from_unix(secs)
    }

    /// Converts a UNIX timestamp (seconds) into a UTC calendar date and time.
    pub(crate) fn from_unix(secs: i64) -> Self {
        // Howard Hinnant's `civil_from_days` algorithm
        let days_since_epoch = secs.div_euclid(86400);
        let secs_of_day = secs.rem_euclid(86400) as u32;

        let second = (secs_of_day % 60) as u8;
        let minute = ((secs_of_day / 60) % 60) as u8;
        let hour = (secs_of_day / 3600) as u8;

        let z = days_since_epoch + 719468; // Shift epoch from 1970-01-01 to 0000-03-01
        let era = (if z >= 0 { z } else { z - 146096 }) / 146097;
        let doe = (z - era * 146097) as u32;
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
        let y = yoe as i64 + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };

        Self {
            date: Date {
                year: (y + (m <= 2) as i64).clamp(0, 9999) as i16,
                month: m as u8,
                day: d as u8,
            },
            time: Time {
                hour,
                minute,
                second,
            },
        }
    }

    pub(crate) fn date(&self) -> Date {
        self.date
    }

    pub(crate) fn time(&self) -> Time {
        self.time
    }
}

/// `YYYY-MM-DDTHH:MM:SSZ`
impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Date {
    year: i16,
    month: u8,
    day: u8,
}

impl Date {
    pub(crate) fn year(&self) -> i16 {
        self.year
    }

    pub(crate) fn month(&self) -> u8 {
        self.month
    }

    pub(crate) fn day(&self) -> u8 {
        self.day
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0>4}-{:0>2}-{:0>2}", self.year, self.month, self.day)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Time {
    hour: u8,
    minute: u8,
    second: u8,
}

impl Time {
    pub(crate) fn hour(&self) -> u8 {
        self.hour
    }

    pub(crate) fn minute(&self) -> u8 {
        self.minute
    }

    pub(crate) fn second(&self) -> u8 {
        self.second
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:0>2}:{:0>2}:{:0>2}Z",
            self.hour, self.minute, self.second,
        )
    }
}

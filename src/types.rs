use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_ERA, EPOCH_DAY_SHIFT, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_HOUR, MAX_MICROSECOND, MAX_MINUTE, MAX_MONTH, MAX_YEAR,
    MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND, MIN_DAY, MIN_YEAR,
    SECONDS_PER_DAY,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;

/// A fixed offset from UTC in seconds, magnitude strictly below one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// The zero offset.
    pub const UTC: Self = Self(0);

    /// Creates a new offset from seconds east of UTC.
    ///
    /// # Errors
    /// Returns `DateError::InvalidOffset` if the magnitude is a full day or more.
    pub fn from_seconds(seconds: i32) -> Result<Self, DateError> {
        if seconds.unsigned_abs() >= SECONDS_PER_DAY {
            return Err(DateError::InvalidOffset(seconds));
        }
        Ok(Self(seconds))
    }

    /// Returns the offset in seconds east of UTC
    #[inline]
    pub const fn seconds(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for UtcOffset {
    type Error = DateError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_seconds(value)
    }
}

impl From<UtcOffset> for i32 {
    fn from(offset: UtcOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let magnitude = self.0.abs();
        write!(f, "{sign}{:02}:{:02}", magnitude / 3600, magnitude % 3600 / 60)?;
        if magnitude % 60 != 0 {
            write!(f, ":{:02}", magnitude % 60)?;
        }
        Ok(())
    }
}

/// Wire/storage mirror of [`Instant`]; deserialization funnels through
/// `Instant::new` so invalid combinations are rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct RawInstant {
    year: i32,
    month: u8,
    day: u8,
    #[serde(default)]
    hour: u8,
    #[serde(default)]
    minute: u8,
    #[serde(default)]
    second: u8,
    #[serde(default)]
    microsecond: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offset_seconds: Option<i32>,
}

/// A civil timestamp: calendar date, time-of-day to microsecond precision,
/// and an optional UTC-offset tag. Every constructed value is a real
/// calendar date; years span 1..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(
    fmt = "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "microsecond"
)]
#[serde(try_from = "RawInstant", into = "RawInstant")]
pub struct Instant {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: u32,
    offset: Option<UtcOffset>,
}

impl Instant {
    /// Creates a new instant, validating every field.
    ///
    /// # Errors
    /// Returns the `DateError` variant naming the first offending field;
    /// day validity depends on year and month (no February 30).
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        microsecond: u32,
    ) -> Result<Self, DateError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateError::InvalidYear(i64::from(year)));
        }
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(DateError::InvalidMonth(month));
        }
        if !(MIN_DAY..=days_in_month(year, month)).contains(&day) {
            return Err(DateError::InvalidDay { month, day, year });
        }
        if hour > MAX_HOUR {
            return Err(DateError::InvalidTime {
                field: "hour",
                value: u32::from(hour),
                max: u32::from(MAX_HOUR),
            });
        }
        if minute > MAX_MINUTE {
            return Err(DateError::InvalidTime {
                field: "minute",
                value: u32::from(minute),
                max: u32::from(MAX_MINUTE),
            });
        }
        if second > MAX_MINUTE {
            return Err(DateError::InvalidTime {
                field: "second",
                value: u32::from(second),
                max: u32::from(MAX_MINUTE),
            });
        }
        if microsecond > MAX_MICROSECOND {
            return Err(DateError::InvalidTime {
                field: "microsecond",
                value: microsecond,
                max: MAX_MICROSECOND,
            });
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
            offset: None,
        })
    }

    /// Creates an instant at midnight on the given date.
    ///
    /// # Errors
    /// Returns `DateError` if the date is not calendar-valid.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// Tags the instant with a UTC offset
    pub const fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) const fn with_offset_opt(mut self, offset: Option<UtcOffset>) -> Self {
        self.offset = offset;
        self
    }

    /// Replaces the calendar date. Callers guarantee validity.
    pub(crate) fn with_date(mut self, year: i32, month: u8, day: u8) -> Self {
        debug_assert!((MIN_YEAR..=MAX_YEAR).contains(&year));
        debug_assert!((1..=MAX_MONTH).contains(&month));
        debug_assert!((MIN_DAY..=days_in_month(year, month)).contains(&day));
        self.year = year;
        self.month = month;
        self.day = day;
        self
    }

    /// Replaces the time-of-day. Callers guarantee validity.
    pub(crate) fn with_time(mut self, hour: u8, minute: u8, second: u8, microsecond: u32) -> Self {
        debug_assert!(hour <= MAX_HOUR && minute <= MAX_MINUTE && second <= MAX_MINUTE);
        debug_assert!(microsecond <= MAX_MICROSECOND);
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self.microsecond = microsecond;
        self
    }

    /// Returns the year (1..=9999)
    #[inline]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12)
    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Returns the day of the month (1..=31)
    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Returns the hour (0..=23)
    #[inline]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute (0..=59)
    #[inline]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Returns the second (0..=59)
    #[inline]
    pub const fn second(self) -> u8 {
        self.second
    }

    /// Returns the microsecond of the second (0..=999_999)
    #[inline]
    pub const fn microsecond(self) -> u32 {
        self.microsecond
    }

    /// Returns the UTC-offset tag, if any
    #[inline]
    pub const fn offset(self) -> Option<UtcOffset> {
        self.offset
    }

    /// Returns the ISO day of the week (Monday=1 .. Sunday=7)
    pub fn weekday(self) -> u8 {
        iso_weekday_from_days(days_from_civil(self.year, self.month, self.day))
    }

    /// Microseconds since the Unix epoch on the naive civil timeline,
    /// ignoring the offset tag.
    pub(crate) fn timeline_micros(self) -> i64 {
        let days = days_from_civil(self.year, self.month, self.day);
        days * MICROS_PER_DAY
            + i64::from(self.hour) * MICROS_PER_HOUR
            + i64::from(self.minute) * MICROS_PER_MINUTE
            + i64::from(self.second) * MICROS_PER_SECOND
            + i64::from(self.microsecond)
    }

    /// Microseconds since the Unix epoch, with the offset tag applied.
    /// Untagged instants are read as UTC.
    pub(crate) fn epoch_micros(self) -> i64 {
        let mut micros = self.timeline_micros();
        if let Some(offset) = self.offset {
            micros -= i64::from(offset.seconds()) * MICROS_PER_SECOND;
        }
        micros
    }

    /// Rebuilds an instant from a naive-timeline microsecond position,
    /// carrying the given offset tag.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the position falls outside the
    /// representable year range.
    pub(crate) fn from_timeline_micros(
        micros: i128,
        offset: Option<UtcOffset>,
    ) -> Result<Self, DateError> {
        let days = micros.div_euclid(i128::from(MICROS_PER_DAY));
        let min_days = i128::from(days_from_civil(MIN_YEAR, 1, 1));
        let max_days = i128::from(days_from_civil(MAX_YEAR, 12, 31));
        if !(min_days..=max_days).contains(&days) {
            let approx_year = (days.div_euclid(365) + 1970)
                .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
            return Err(DateError::InvalidYear(approx_year));
        }
        let (year, month, day) = civil_from_days(days as i64);
        let time = micros.rem_euclid(i128::from(MICROS_PER_DAY)) as i64;
        Ok(Self {
            year,
            month,
            day,
            hour: (time / MICROS_PER_HOUR) as u8,
            minute: (time % MICROS_PER_HOUR / MICROS_PER_MINUTE) as u8,
            second: (time % MICROS_PER_MINUTE / MICROS_PER_SECOND) as u8,
            microsecond: (time % MICROS_PER_SECOND) as u32,
            offset,
        })
    }

    /// Signed difference `self - other` in microseconds, both read on the
    /// Unix timeline (offset tags applied, untagged read as UTC).
    pub fn micros_since(self, other: Self) -> i64 {
        self.epoch_micros() - other.epoch_micros()
    }
}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare timeline position first…
        match self.epoch_micros().cmp(&other.epoch_micros()) {
            // …then break ties by offset tag so the order stays consistent
            // with field equality (untagged sorts before tagged).
            Ordering::Equal => self.offset.cmp(&other.offset),
            ord => ord,
        }
    }
}

impl Sub for Instant {
    type Output = i64;

    fn sub(self, rhs: Self) -> i64 {
        self.micros_since(rhs)
    }
}

impl TryFrom<RawInstant> for Instant {
    type Error = DateError;

    fn try_from(raw: RawInstant) -> Result<Self, Self::Error> {
        let instant = Self::new(
            raw.year,
            raw.month,
            raw.day,
            raw.hour,
            raw.minute,
            raw.second,
            raw.microsecond,
        )?;
        Ok(match raw.offset_seconds {
            Some(seconds) => instant.with_offset(UtcOffset::from_seconds(seconds)?),
            None => instant,
        })
    }
}

impl From<Instant> for RawInstant {
    fn from(instant: Instant) -> Self {
        Self {
            year: instant.year,
            month: instant.month,
            day: instant.day,
            hour: instant.hour,
            minute: instant.minute,
            second: instant.second,
            microsecond: instant.microsecond,
            offset_seconds: instant.offset.map(UtcOffset::seconds),
        }
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days since the Unix epoch for a civil date.
///
/// Howard Hinnant's `days_from_civil`, shifted to years starting in March
/// so leap days land at the end of the internal year.
pub(crate) fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year) - i64::from(month <= FEBRUARY);
    let m = i64::from(month);
    let era = y.div_euclid(i64::from(GREGORIAN_CYCLE));
    let yoe = y - era * i64::from(GREGORIAN_CYCLE);
    let doy = (153 * ((m + 9) % 12) + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - EPOCH_DAY_SHIFT
}

/// Inverse of [`days_from_civil`].
pub(crate) fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + EPOCH_DAY_SHIFT;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * i64::from(GREGORIAN_CYCLE) + i64::from(month <= FEBRUARY);
    (year as i32, month, day)
}

/// ISO weekday (Monday=1 .. Sunday=7) for a count of days since the Unix
/// epoch. Day zero, 1970-01-01, was a Thursday.
pub(crate) fn iso_weekday_from_days(days: i64) -> u8 {
    ((days + 3).rem_euclid(7) + 1) as u8
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DAYS_PER_WEEK, MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MILLI, MICROS_PER_MINUTE,
    MICROS_PER_SECOND, MONTHS_PER_QUARTER, MONTHS_PER_YEAR,
};
use crate::{DateError, prelude::*};

/// Error type for cursor operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// A unit token outside the vocabulary was supplied. Unknown units fail
    /// fast instead of silently doing nothing.
    #[error("Unsupported unit: {0:?}")]
    UnsupportedUnit(String),

    /// Error validating a civil date/time value.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// A named granularity parameterizing add/subtract and the period-boundary
/// snaps. Parse one from text with [`FromStr`]; singular and plural
/// spellings are synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "quarter")]
    Quarter,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "millisecond")]
    Millisecond,
    #[display(fmt = "microsecond")]
    Microsecond,
}

/// The magnitude of one unit: a month count for calendar units, a fixed
/// microsecond duration for everything else. The two kinds do not commute,
/// which is why multi-unit operations are order-dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Magnitude {
    Months(i64),
    Micros(i64),
}

impl Unit {
    /// Every unit, coarsest first.
    pub const ALL: [Self; 10] = [
        Self::Year,
        Self::Quarter,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
        Self::Microsecond,
    ];

    pub(crate) const fn magnitude(self) -> Magnitude {
        match self {
            Self::Year => Magnitude::Months(MONTHS_PER_YEAR),
            Self::Quarter => Magnitude::Months(MONTHS_PER_QUARTER),
            Self::Month => Magnitude::Months(1),
            Self::Week => Magnitude::Micros(DAYS_PER_WEEK * MICROS_PER_DAY),
            Self::Day => Magnitude::Micros(MICROS_PER_DAY),
            Self::Hour => Magnitude::Micros(MICROS_PER_HOUR),
            Self::Minute => Magnitude::Micros(MICROS_PER_MINUTE),
            Self::Second => Magnitude::Micros(MICROS_PER_SECOND),
            Self::Millisecond => Magnitude::Micros(MICROS_PER_MILLI),
            Self::Microsecond => Magnitude::Micros(1),
        }
    }
}

impl FromStr for Unit {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" | "years" => Ok(Self::Year),
            "quarter" | "quarters" => Ok(Self::Quarter),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            "second" | "seconds" => Ok(Self::Second),
            "millisecond" | "milliseconds" => Ok(Self::Millisecond),
            "microsecond" | "microseconds" => Ok(Self::Microsecond),
            _ => Err(CursorError::UnsupportedUnit(s.to_owned())),
        }
    }
}

/// A set of fields to overwrite in one `replace` call.
///
/// Scalar fields are substituted and validated together; `weekday` is
/// applied last, so the outcome never depends on the order the set was
/// built in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Replace {
    pub(crate) year: Option<i32>,
    pub(crate) month: Option<u8>,
    pub(crate) day: Option<u8>,
    pub(crate) hour: Option<u8>,
    pub(crate) minute: Option<u8>,
    pub(crate) second: Option<u8>,
    pub(crate) microsecond: Option<u32>,
    pub(crate) weekday: Option<i64>,
}

impl Replace {
    /// Creates an empty field set (replaces nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the year
    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Overwrites the month
    pub const fn month(mut self, month: u8) -> Self {
        self.month = Some(month);
        self
    }

    /// Overwrites the day of the month
    pub const fn day(mut self, day: u8) -> Self {
        self.day = Some(day);
        self
    }

    /// Overwrites the hour
    pub const fn hour(mut self, hour: u8) -> Self {
        self.hour = Some(hour);
        self
    }

    /// Overwrites the minute
    pub const fn minute(mut self, minute: u8) -> Self {
        self.minute = Some(minute);
        self
    }

    /// Overwrites the second
    pub const fn second(mut self, second: u8) -> Self {
        self.second = Some(second);
        self
    }

    /// Overwrites the microsecond of the second
    pub const fn microsecond(mut self, microsecond: u32) -> Self {
        self.microsecond = Some(microsecond);
        self
    }

    /// Moves to the given day-of-week after the scalar fields are applied.
    ///
    /// Any integer is a valid target: with `w` the current ISO weekday
    /// (Monday=1 .. Sunday=7) the instant shifts backward by `w - target`
    /// days. Target 0 lands on the most recent Sunday, targets past 6 walk
    /// into following weeks, and negative targets move strictly backward,
    /// further than a 0..=6 wrap would.
    pub const fn weekday(mut self, target: i64) -> Self {
        self.weekday = Some(target);
        self
    }

    /// Returns true when no field is set
    pub const fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.hour.is_none()
            && self.minute.is_none()
            && self.second.is_none()
            && self.microsecond.is_none()
            && self.weekday.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_singular_and_plural() {
        let tokens = [
            ("year", "years", Unit::Year),
            ("quarter", "quarters", Unit::Quarter),
            ("month", "months", Unit::Month),
            ("week", "weeks", Unit::Week),
            ("day", "days", Unit::Day),
            ("hour", "hours", Unit::Hour),
            ("minute", "minutes", Unit::Minute),
            ("second", "seconds", Unit::Second),
            ("millisecond", "milliseconds", Unit::Millisecond),
            ("microsecond", "microseconds", Unit::Microsecond),
        ];
        for (singular, plural, unit) in tokens {
            assert_eq!(singular.parse::<Unit>().unwrap(), unit);
            assert_eq!(plural.parse::<Unit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_parse_unknown_unit_fails() {
        let result = "fortnight".parse::<Unit>();
        assert_eq!(
            result,
            Err(CursorError::UnsupportedUnit("fortnight".to_owned()))
        );

        // Tokens are lowercase; anything else is outside the vocabulary
        assert!("Years".parse::<Unit>().is_err());
        assert!("".parse::<Unit>().is_err());
    }

    #[test]
    fn test_magnitudes() {
        assert_eq!(Unit::Year.magnitude(), Magnitude::Months(12));
        assert_eq!(Unit::Quarter.magnitude(), Magnitude::Months(3));
        assert_eq!(Unit::Month.magnitude(), Magnitude::Months(1));
        assert_eq!(
            Unit::Week.magnitude(),
            Magnitude::Micros(7 * 24 * 3_600_000_000)
        );
        assert_eq!(Unit::Millisecond.magnitude(), Magnitude::Micros(1_000));
        assert_eq!(Unit::Microsecond.magnitude(), Magnitude::Micros(1));
    }

    #[test]
    fn test_serde_tokens() {
        assert_eq!(serde_json::to_string(&Unit::Quarter).unwrap(), r#""quarter""#);
        let parsed: Unit = serde_json::from_str(r#""microsecond""#).unwrap();
        assert_eq!(parsed, Unit::Microsecond);
    }

    #[test]
    fn test_replace_builder() {
        let fields = Replace::new().month(2).day(30).hour(1);
        assert_eq!(fields.month, Some(2));
        assert_eq!(fields.day, Some(30));
        assert_eq!(fields.hour, Some(1));
        assert_eq!(fields.year, None);
        assert_eq!(fields.weekday, None);
        assert!(!fields.is_empty());
        assert!(Replace::new().is_empty());
    }
}

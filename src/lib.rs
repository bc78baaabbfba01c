mod consts;
mod prelude;
mod types;
mod unit;

pub use consts::*;
pub use types::{Instant, UtcOffset, days_in_month, is_leap_year};
pub use unit::{CursorError, Replace, Unit};

use crate::prelude::*;
use std::ops::Sub;
use unit::Magnitude;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i64),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: i32 },
    #[display(fmt = "Invalid {field}: {value} (must be 0-{max})")]
    InvalidTime {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[display(fmt = "Invalid UTC offset: {} seconds", "_0")]
    InvalidOffset(i32),
}

impl std::error::Error for DateError {}

/// A mutable calendar cursor around one [`Instant`].
///
/// Every mutating operation either replaces the owned instant with a new
/// calendar-valid one and returns `&mut Self` (so calls chain with `?`), or
/// fails and leaves the instant untouched. The cursor holds no other state
/// and is never shared: wrap an instant, mutate in place, drop it. Callers
/// sharing one cursor across threads must lock externally; the engine takes
/// no locks of its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor {
    instant: Instant,
}

impl Cursor {
    /// Wraps a caller-supplied instant
    pub const fn new(instant: Instant) -> Self {
        Self { instant }
    }

    /// Returns the owned instant
    #[inline]
    pub const fn instant(&self) -> &Instant {
        &self.instant
    }

    /// Unwraps the cursor into its instant
    pub fn into_instant(self) -> Instant {
        self.instant
    }

    /// Returns the year (1..=9999)
    pub const fn year(&self) -> i32 {
        self.instant.year()
    }

    /// Returns the month (1..=12)
    pub const fn month(&self) -> u8 {
        self.instant.month()
    }

    /// Returns the day of the month (1..=31)
    pub const fn day(&self) -> u8 {
        self.instant.day()
    }

    /// Returns the hour (0..=23)
    pub const fn hour(&self) -> u8 {
        self.instant.hour()
    }

    /// Returns the minute (0..=59)
    pub const fn minute(&self) -> u8 {
        self.instant.minute()
    }

    /// Returns the second (0..=59)
    pub const fn second(&self) -> u8 {
        self.instant.second()
    }

    /// Returns the microsecond of the second (0..=999_999)
    pub const fn microsecond(&self) -> u32 {
        self.instant.microsecond()
    }

    /// Returns the ISO day of the week (Monday=1 .. Sunday=7)
    pub fn weekday(&self) -> u8 {
        self.instant.weekday()
    }

    /// Returns the UTC-offset tag, if any
    pub const fn offset(&self) -> Option<UtcOffset> {
        self.instant.offset()
    }

    /// Adds `amount` of `unit` to the instant.
    ///
    /// Year, quarter and month amounts are applied as month arithmetic:
    /// the day of the month is clamped to the target month's length (Jan
    /// 31 + 1 month lands on Feb 28/29) and the time-of-day is untouched.
    /// Every other unit is a fixed duration on the civil timeline.
    ///
    /// # Errors
    /// Fails with `DateError::InvalidYear` if the result leaves the
    /// representable year range; the instant is untouched on failure.
    pub fn add(&mut self, unit: Unit, amount: i64) -> Result<&mut Self, CursorError> {
        self.apply(unit, i128::from(amount))?;
        Ok(self)
    }

    /// Subtracts `amount` of `unit`; the exact mirror of [`Cursor::add`].
    ///
    /// # Errors
    /// Same conditions as [`Cursor::add`].
    pub fn subtract(&mut self, unit: Unit, amount: i64) -> Result<&mut Self, CursorError> {
        self.apply(unit, -i128::from(amount))?;
        Ok(self)
    }

    fn apply(&mut self, unit: Unit, amount: i128) -> Result<(), CursorError> {
        self.instant = applied(self.instant, unit, amount)?;
        Ok(())
    }

    /// Adds each `(unit, amount)` pair in sequence order.
    ///
    /// Month-based and fixed-duration units do not commute, so the result
    /// is order-dependent by contract: `[(month, 1), (day, 31)]` and
    /// `[(day, 31), (month, 1)]` differ across a month boundary. Pairs are
    /// never reordered.
    ///
    /// # Errors
    /// On failure the cursor is restored to its pre-call instant.
    pub fn add_all<I>(&mut self, deltas: I) -> Result<&mut Self, CursorError>
    where
        I: IntoIterator<Item = (Unit, i64)>,
    {
        let snapshot = self.instant;
        for (unit, amount) in deltas {
            if let Err(error) = self.apply(unit, i128::from(amount)) {
                self.instant = snapshot;
                return Err(error);
            }
        }
        Ok(self)
    }

    /// Subtracts each `(unit, amount)` pair in sequence order; the mirror
    /// of [`Cursor::add_all`] with the same order-dependence contract.
    ///
    /// # Errors
    /// On failure the cursor is restored to its pre-call instant.
    pub fn subtract_all<I>(&mut self, deltas: I) -> Result<&mut Self, CursorError>
    where
        I: IntoIterator<Item = (Unit, i64)>,
    {
        let snapshot = self.instant;
        for (unit, amount) in deltas {
            if let Err(error) = self.apply(unit, -i128::from(amount)) {
                self.instant = snapshot;
                return Err(error);
            }
        }
        Ok(self)
    }

    /// Snaps the instant down to the beginning of the enclosing period.
    ///
    /// Selecting a coarser unit also resets every finer field: each arm
    /// below spells out the full cascade from its granularity down to the
    /// microsecond. `start_of(week)` lands on the most recent Sunday at
    /// midnight (weekday target 0).
    ///
    /// # Errors
    /// Only `week` can fail, and only when the snap walks past year 1.
    pub fn start_of(&mut self, unit: Unit) -> Result<&mut Self, CursorError> {
        let i = self.instant;
        self.instant = match unit {
            Unit::Year => i.with_date(i.year(), JANUARY, MIN_DAY).with_time(0, 0, 0, 0),
            Unit::Quarter => {
                // Quarters anchor at January, April, July, October
                let snapped = (i.month() - 1) / 3 * 3 + JANUARY;
                i.with_date(i.year(), snapped, MIN_DAY).with_time(0, 0, 0, 0)
            }
            Unit::Month => i.with_date(i.year(), i.month(), MIN_DAY).with_time(0, 0, 0, 0),
            Unit::Week => shift_to_weekday(i.with_time(0, 0, 0, 0), 0)?,
            Unit::Day => i.with_time(0, 0, 0, 0),
            Unit::Hour => i.with_time(i.hour(), 0, 0, 0),
            Unit::Minute => i.with_time(i.hour(), i.minute(), 0, 0),
            Unit::Second => i.with_time(i.hour(), i.minute(), i.second(), 0),
            Unit::Millisecond => i.with_time(
                i.hour(),
                i.minute(),
                i.second(),
                i.microsecond() / 1_000 * 1_000,
            ),
            Unit::Microsecond => i,
        };
        Ok(self)
    }

    /// Snaps the instant up to the last representable moment of the
    /// enclosing period: `start_of(unit)`, plus one `unit`, minus one
    /// microsecond. For `microsecond` this is the identity.
    ///
    /// # Errors
    /// Fails if advancing by one unit leaves the representable year range
    /// (e.g. `end_of(year)` in 9999); the instant is untouched on failure.
    pub fn end_of(&mut self, unit: Unit) -> Result<&mut Self, CursorError> {
        let mut scratch = Self::new(self.instant);
        scratch
            .start_of(unit)?
            .add(unit, 1)?
            .subtract(Unit::Microsecond, 1)?;
        self.instant = scratch.instant;
        Ok(self)
    }

    /// Overwrites the fields named in `fields`.
    ///
    /// Scalar fields are substituted first and validated as a whole; the
    /// `weekday` target is applied last. This is the one mutation path
    /// that never clamps: a substitution yielding February 30 fails.
    ///
    /// # Errors
    /// Fails with the `DateError` naming the offending field; the instant
    /// is untouched on failure.
    pub fn replace(&mut self, fields: Replace) -> Result<&mut Self, CursorError> {
        let i = self.instant;
        let next = Instant::new(
            fields.year.unwrap_or(i.year()),
            fields.month.unwrap_or(i.month()),
            fields.day.unwrap_or(i.day()),
            fields.hour.unwrap_or(i.hour()),
            fields.minute.unwrap_or(i.minute()),
            fields.second.unwrap_or(i.second()),
            fields.microsecond.unwrap_or(i.microsecond()),
        )?
        .with_offset_opt(i.offset());
        self.instant = match fields.weekday {
            Some(target) => shift_to_weekday(next, target)?,
            None => next,
        };
        Ok(self)
    }

    /// Truncates the time-of-day to midnight, keeping the calendar date.
    /// Idempotent.
    pub fn zero(&mut self) -> &mut Self {
        self.instant = self.instant.with_time(0, 0, 0, 0);
        self
    }

    /// Seconds since the Unix epoch, rounded to the nearest whole second.
    /// Untagged instants are read as UTC.
    pub fn epoch(&self) -> f64 {
        self.epoch_with(true, false)
    }

    /// Seconds since the Unix epoch as a float, with explicit knobs.
    ///
    /// Rounding happens in seconds-space before any scaling:
    /// `epoch_with(true, true)` is `round(seconds) * 1000`, not
    /// `round(seconds * 1000)`.
    pub fn epoch_with(&self, round_to_second: bool, as_milliseconds: bool) -> f64 {
        let mut seconds = self.instant.epoch_micros() as f64 / MICROS_PER_SECOND as f64;
        if round_to_second {
            seconds = seconds.round();
        }
        if as_milliseconds {
            seconds *= MICROS_PER_MILLI as f64;
        }
        seconds
    }
}

impl From<Instant> for Cursor {
    fn from(instant: Instant) -> Self {
        Self::new(instant)
    }
}

impl PartialEq<Instant> for Cursor {
    fn eq(&self, other: &Instant) -> bool {
        self.instant == *other
    }
}

impl PartialEq<Cursor> for Instant {
    fn eq(&self, other: &Cursor) -> bool {
        *self == other.instant
    }
}

impl PartialOrd<Instant> for Cursor {
    fn partial_cmp(&self, other: &Instant) -> Option<std::cmp::Ordering> {
        Some(self.instant.cmp(other))
    }
}

impl PartialOrd<Cursor> for Instant {
    fn partial_cmp(&self, other: &Cursor) -> Option<std::cmp::Ordering> {
        Some(self.cmp(&other.instant))
    }
}

impl Sub for &Cursor {
    type Output = i64;

    /// Signed difference in microseconds.
    fn sub(self, rhs: &Cursor) -> i64 {
        self.instant - rhs.instant
    }
}

impl Sub<Instant> for &Cursor {
    type Output = i64;

    fn sub(self, rhs: Instant) -> i64 {
        self.instant - rhs
    }
}

impl Sub<&Cursor> for Instant {
    type Output = i64;

    fn sub(self, rhs: &Cursor) -> i64 {
        self - rhs.instant
    }
}

/// One unit application: month arithmetic for calendar units, a fixed
/// timeline offset for the rest. Works in i128 so caller-supplied amounts
/// cannot overflow before the year-range check.
fn applied(instant: Instant, unit: Unit, amount: i128) -> Result<Instant, CursorError> {
    match unit.magnitude() {
        Magnitude::Months(per_unit) => {
            Ok(shifted_months(instant, amount * i128::from(per_unit))?)
        }
        Magnitude::Micros(per_unit) => {
            let micros = i128::from(instant.timeline_micros()) + amount * i128::from(per_unit);
            Ok(Instant::from_timeline_micros(micros, instant.offset())?)
        }
    }
}

/// Month arithmetic with floor division, clamping the day of the month to
/// the target month's length. Time-of-day and offset tag carry over.
fn shifted_months(instant: Instant, delta_months: i128) -> Result<Instant, DateError> {
    let total = i128::from(instant.month()) - 1 + delta_months;
    let year_wide = i128::from(instant.year()) + total.div_euclid(i128::from(MONTHS_PER_YEAR));
    let month = (total.rem_euclid(i128::from(MONTHS_PER_YEAR)) + 1) as u8;
    let year = i32::try_from(year_wide).map_err(|_| {
        DateError::InvalidYear(
            year_wide.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
        )
    })?;
    let day = instant.day().min(days_in_month(year, month));
    let next = Instant::new(
        year,
        month,
        day,
        instant.hour(),
        instant.minute(),
        instant.second(),
        instant.microsecond(),
    )?;
    Ok(next.with_offset_opt(instant.offset()))
}

/// Moves the instant to the given day-of-week target.
///
/// With `w` the current ISO weekday, the instant shifts backward by
/// `w - target` days. Negative targets are therefore always strictly in
/// the past (further than a 0..=6 wrap would go), and targets past 6 walk
/// forward into following weeks.
fn shift_to_weekday(instant: Instant, target: i64) -> Result<Instant, DateError> {
    let offset_days = i128::from(instant.weekday()) - i128::from(target);
    let micros = i128::from(instant.timeline_micros())
        - offset_days * i128::from(MICROS_PER_DAY);
    Instant::from_timeline_micros(micros, instant.offset())
}

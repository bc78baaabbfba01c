/// Minimum valid year (inclusive)
pub const MIN_YEAR: i32 = 1;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used when snapping to month/quarter/year starts
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Months in a year, the base of the month-arithmetic number system
pub const MONTHS_PER_YEAR: i64 = 12;
/// Months in a quarter
pub const MONTHS_PER_QUARTER: i64 = 3;
/// Days in a week
pub const DAYS_PER_WEEK: i64 = 7;

/// Maximum valid hour (inclusive)
pub const MAX_HOUR: u8 = 23;
/// Maximum valid minute/second (inclusive)
pub const MAX_MINUTE: u8 = 59;
/// Maximum valid microsecond-of-second (inclusive)
pub const MAX_MICROSECOND: u32 = 999_999;

/// Microseconds per millisecond
pub const MICROS_PER_MILLI: i64 = 1_000;
/// Microseconds per second
pub const MICROS_PER_SECOND: i64 = 1_000_000;
/// Microseconds per minute
pub const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
/// Microseconds per hour
pub const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
/// Microseconds per civil day
pub const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

/// Seconds per day, the exclusive bound on UTC-offset magnitude
pub(crate) const SECONDS_PER_DAY: u32 = 86_400;

/// Days per 400-year Gregorian era (epoch-day conversions)
pub(crate) const DAYS_PER_ERA: i64 = 146_097;
/// Shift from 0000-03-01 to the Unix epoch in days (epoch-day conversions)
pub(crate) const EPOCH_DAY_SHIFT: i64 = 719_468;

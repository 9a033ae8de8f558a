//! Proleptic Gregorian calendar values and conversions.
//!
//! The server models dates and times on the proleptic Gregorian calendar
//! with JSR-310 semantics: days are counted from the 1970-01-01 epoch,
//! times as nanoseconds from midnight. The conversions here mirror the
//! reference algorithms exactly, including behavior for negative years.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bigint::BigInt;
use super::format::{date_to_iso_string, duration_to_iso_string, time_to_iso_string};

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
/// Nanoseconds in one minute.
pub const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
/// Nanoseconds in one hour.
pub const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;
/// Seconds in one hour.
pub const SECONDS_PER_HOUR: i64 = 3_600;
/// Days from 0000-01-01 to the 1970-01-01 epoch.
pub const DAYS_0000_TO_1970: i64 = 719_528;
/// Days in a full 400-year Gregorian cycle.
pub const DAYS_PER_400_YEAR_CYCLE: i64 = 146_097;

/// A calendar date without time or timezone.
///
/// Years follow astronomical numbering: year 0 exists and negative years
/// are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Date {
    /// Year, possibly negative.
    pub year: i64,
    /// Month of year, 1-12.
    pub month: i64,
    /// Day of month, 1-31.
    pub day: i64,
}

impl Date {
    /// Create a date from components. Components are not range-checked;
    /// callers hold the civil-calendar invariants.
    pub const fn new(year: i64, month: i64, day: i64) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", date_to_iso_string(self.year, self.month, self.day))
    }
}

/// A time of day without date or timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalTime {
    /// Hour of day, 0-23.
    pub hour: i64,
    /// Minute of hour, 0-59.
    pub minute: i64,
    /// Second of minute, 0-59.
    pub second: i64,
    /// Nanosecond of second, 0-999_999_999.
    pub nanosecond: i64,
}

impl LocalTime {
    /// Create a local time from components.
    pub const fn new(hour: i64, minute: i64, second: i64, nanosecond: i64) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            time_to_iso_string(self.hour, self.minute, self.second, self.nanosecond)
        )
    }
}

/// A date and time of day without timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalDateTime {
    /// The date part.
    pub date: Date,
    /// The time part.
    pub time: LocalTime,
}

impl LocalDateTime {
    /// Combine a date and a local time.
    pub const fn new(date: Date, time: LocalTime) -> Self {
        Self { date, time }
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// An elapsed amount of time in months, days, seconds and nanoseconds.
///
/// Components are independent; months and days have no fixed length, so
/// the value is not normalized across component boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Duration {
    /// Calendar months.
    pub months: i64,
    /// Calendar days.
    pub days: i64,
    /// Seconds.
    pub seconds: i64,
    /// Nanoseconds.
    pub nanoseconds: i64,
}

impl Duration {
    /// Create a duration from components.
    pub const fn new(months: i64, days: i64, seconds: i64, nanoseconds: i64) -> Self {
        Self {
            months,
            days,
            seconds,
            nanoseconds,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            duration_to_iso_string(self.months, self.days, self.seconds, self.nanoseconds)
        )
    }
}

/// True for leap years of the proleptic Gregorian calendar.
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Nanoseconds elapsed since midnight for the given local time.
pub fn local_time_to_nano_of_day(time: &LocalTime) -> i64 {
    time.hour * NANOS_PER_HOUR
        + time.minute * NANOS_PER_MINUTE
        + time.second * NANOS_PER_SECOND
        + time.nanosecond
}

/// Local time at the given nanosecond of day.
pub fn nano_of_day_to_local_time(nano_of_day: i64) -> LocalTime {
    let hour = nano_of_day / NANOS_PER_HOUR;
    let mut rest = nano_of_day - hour * NANOS_PER_HOUR;
    let minute = rest / NANOS_PER_MINUTE;
    rest -= minute * NANOS_PER_MINUTE;
    let second = rest / NANOS_PER_SECOND;
    let nanosecond = rest - second * NANOS_PER_SECOND;
    LocalTime::new(hour, minute, second, nanosecond)
}

/// Days between the 1970-01-01 epoch and the given civil date.
pub fn date_to_epoch_day(year: i64, month: i64, day: i64) -> i64 {
    let mut total = 365 * year;
    if year >= 0 {
        total += (year + 3) / 4 - (year + 99) / 100 + (year + 399) / 400;
    } else {
        total -= year / -4 - year / -100 + year / -400;
    }
    total += (367 * month - 362) / 12;
    total += day - 1;
    if month > 2 {
        total -= 1;
        if !is_leap_year(year) {
            total -= 1;
        }
    }
    total - DAYS_0000_TO_1970
}

/// Civil date at the given epoch day. Inverse of [`date_to_epoch_day`].
pub fn epoch_day_to_date(epoch_day: i64) -> Date {
    let mut zero_day = epoch_day + DAYS_0000_TO_1970;
    // Shift the day count to a cycle that starts 0000-03-01, so the leap
    // day falls at the end of each four-year run.
    zero_day -= 60;
    let mut year_adjust = 0;
    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_400_YEAR_CYCLE - 1;
        year_adjust = adjust_cycles * 400;
        zero_day += -adjust_cycles * DAYS_PER_400_YEAR_CYCLE;
    }
    // zero_day * 400 can exceed 64 bits for extreme inputs; widen.
    let mut year_est =
        ((400i128 * zero_day as i128 + 591) / DAYS_PER_400_YEAR_CYCLE as i128) as i64;
    let mut day_of_year_est =
        zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    if day_of_year_est < 0 {
        year_est -= 1;
        day_of_year_est =
            zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    }
    year_est += year_adjust;

    // March-based month numbering: 0 is March, 11 is February.
    let march_month = (day_of_year_est * 5 + 2) / 153;
    let month = (march_month + 2) % 12 + 1;
    let day = day_of_year_est - (march_month * 306 + 5) / 10 + 1;
    let year = year_est + march_month / 10;
    Date::new(year, month, day)
}

/// Seconds between the epoch and the given local date-time, ignoring
/// timezone.
pub fn local_date_time_to_epoch_second(date_time: &LocalDateTime) -> i64 {
    let epoch_day = BigInt::new(date_to_epoch_day(
        date_time.date.year,
        date_time.date.month,
        date_time.date.day,
    ));
    let seconds_of_day = BigInt::new(
        date_time.time.hour * SECONDS_PER_HOUR
            + date_time.time.minute * 60
            + date_time.time.second,
    );
    (epoch_day * BigInt::new(SECONDS_PER_DAY) + seconds_of_day).value()
}

/// Local date-time at the given epoch second, with a separate nanosecond
/// adjustment. Inverse of [`local_date_time_to_epoch_second`].
pub fn epoch_second_and_nano_to_local_date_time(epoch_second: i64, nano: i64) -> LocalDateTime {
    let seconds_per_day = BigInt::new(SECONDS_PER_DAY);
    let epoch_day = BigInt::new(epoch_second).floor_div(seconds_per_day);
    let seconds_of_day = BigInt::new(epoch_second).floor_mod(seconds_per_day);
    let nano_of_day = seconds_of_day.value() * NANOS_PER_SECOND + nano;
    LocalDateTime::new(
        epoch_day_to_date(epoch_day.value()),
        nano_of_day_to_local_time(nano_of_day),
    )
}

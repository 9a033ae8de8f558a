//! Temporal value types and calendar arithmetic.
//!
//! The graph database models temporal values on the proleptic Gregorian
//! calendar with JSR-310 semantics. This module carries the conversions
//! the driver needs between civil components and the wire encodings
//! (epoch day, nano of day, epoch second plus nanosecond adjustment),
//! together with ISO-8601 rendering and the [`BigInt`] integer type that
//! backs both the codec and the calendar math.

pub mod bigint;
pub mod calendar;
pub mod format;

pub use bigint::{BigInt, MAX_SAFE_INTEGER, MIN_SAFE_INTEGER};
pub use calendar::{
    date_to_epoch_day, epoch_day_to_date, epoch_second_and_nano_to_local_date_time, is_leap_year,
    local_date_time_to_epoch_second, local_time_to_nano_of_day, nano_of_day_to_local_time, Date,
    Duration, LocalDateTime, LocalTime,
};
pub use format::{
    date_to_iso_string, duration_to_iso_string, time_to_iso_string,
    time_zone_offset_to_iso_string,
};

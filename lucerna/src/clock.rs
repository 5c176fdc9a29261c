//! Time-of-day parsing and elapsed-minute arithmetic.
//!
//! Sessions are logged with wall-clock `HH:MM` strings. An end time that is
//! not strictly after the start time is taken to cross midnight, so a
//! session is always between 1 and 1440 minutes long.

use chrono::NaiveTime;
use thiserror::Error;

use crate::MINUTES_PER_DAY;

/// A time string that does not parse as 24-hour `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time format {input:?} (expected HH:MM)")]
pub struct TimeFormatError {
    /// The offending input, as given by the caller.
    pub input: String,
}

/// Parses a 24-hour `HH:MM` time-of-day string.
///
/// Surrounding whitespace is ignored. Hours outside `0..=23` or minutes
/// outside `0..=59` fail.
pub fn parse_hhmm(input: &str) -> Result<NaiveTime, TimeFormatError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| TimeFormatError {
        input: input.to_string(),
    })
}

/// Whole minutes elapsed between two `HH:MM` times of day.
///
/// If `end` is not strictly after `start`, the interval is interpreted as
/// crossing midnight and a day is added before differencing.
pub fn elapsed_minutes(start: &str, end: &str) -> Result<u32, TimeFormatError> {
    let start = parse_hhmm(start)?;
    let end = parse_hhmm(end)?;

    let mut minutes = (end - start).num_minutes();
    if minutes <= 0 {
        minutes += MINUTES_PER_DAY;
    }

    Ok(minutes as u32)
}

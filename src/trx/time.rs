//! Timestamp normalization
//!
//! TRX timestamps are ISO-8601 zoned date-times such as
//! `2024-01-16T10:00:00.1234567+01:00`. They are reduced to whole seconds
//! since the epoch; anything finer is dropped.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use tracing::error;

/// Parse an optional timestamp into epoch seconds.
///
/// An absent timestamp yields `None`. A malformed one is logged and also
/// yields `None`, so a bad `startTime` never costs us the rest of the result.
pub fn parse_time(time: Option<&str>) -> Option<i64> {
    let time = time?;
    match parse_zoned(time) {
        Ok(instant) => Some(instant.timestamp()),
        Err(e) => {
            error!("Could not parse time {}: {}", time, e);
            None
        }
    }
}

fn parse_zoned(time: &str) -> Result<DateTime<FixedOffset>> {
    // Zoned date-times may carry a trailing region id: `...+01:00[Europe/Paris]`
    let time = match time.find('[') {
        Some(bracket) if time.ends_with(']') => &time[..bracket],
        _ => time,
    };
    // `T` and `Z` are matched case-insensitively
    let time = time.to_ascii_uppercase();
    if time.as_bytes().get(10) != Some(&b'T') {
        return Err(Error::Parse("date and time must be separated by 'T'".to_string()));
    }

    // Seconds are optional
    DateTime::parse_from_rfc3339(&time)
        .or_else(|_| DateTime::parse_from_str(&time, "%Y-%m-%dT%H:%M%:z"))
        .or_else(|err| match time.strip_suffix('Z') {
            Some(local) => NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M")
                .map(|local| local.and_utc().fixed_offset()),
            None => Err(err),
        })
        .map_err(|e| Error::Parse(e.to_string()))
}

//! State file timestamp encoding
//!
//! The state file holds a single line in the layout of the Unix `date`
//! command, e.g. `Mon Jan  2 15:04:05 UTC 2006`, so it can be read (and
//! fixed) by hand. Timestamps are always written in UTC. Files carrying any
//! other zone abbreviation are read as local time, which is how older
//! releases wrote them.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Layout used when writing
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

// Used when reading. The zone field is validated and applied separately.
const PARSE_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid time zone {0:?}")]
    Zone(String),

    #[error("{0}")]
    Layout(#[from] chrono::ParseError),

    #[error("time does not exist in the local time zone")]
    NonexistentLocalTime,
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp written by [`format_timestamp`] or by `date`.
///
/// Surrounding whitespace is ignored. The weekday must match the date.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, TimestampError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(TimestampError::FieldCount(fields.len()));
    }

    let zone = fields[4];
    if !(2..=5).contains(&zone.len()) || !zone.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(TimestampError::Zone(zone.to_string()));
    }

    let without_zone = format!(
        "{} {} {} {} {}",
        fields[0], fields[1], fields[2], fields[3], fields[5]
    );
    let naive = NaiveDateTime::parse_from_str(&without_zone, PARSE_FORMAT)?;

    match zone {
        "UTC" | "GMT" => Ok(Utc.from_utc_datetime(&naive)),
        _ => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or(TimestampError::NonexistentLocalTime),
    }
}

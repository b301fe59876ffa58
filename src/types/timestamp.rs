//! Timestamp text format.
//!
//! Timestamps are stored as Unix-epoch seconds and rendered in UTC.

use chrono::{DateTime, NaiveDateTime};

use crate::error::{EvalError, Result};
use crate::types::ScalarType;

/// Text format used for timestamp <-> string casts.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats epoch seconds as [`TIMESTAMP_FORMAT`].
///
/// # Errors
///
/// Returns [`EvalError::TimestampOutOfRange`] when the value has no
/// calendar representation.
pub fn format_timestamp(secs: i64) -> Result<String> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .ok_or(EvalError::TimestampOutOfRange(secs))
}

/// Parses [`TIMESTAMP_FORMAT`] text into epoch seconds.
///
/// # Errors
///
/// Returns [`EvalError::CastParse`] when the text does not match.
pub fn parse_timestamp(text: &str) -> Result<i64> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| EvalError::CastParse {
            value: text.to_string(),
            target: ScalarType::Timestamp,
        })
}

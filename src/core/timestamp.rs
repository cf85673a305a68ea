//! Timestamp formatting utilities
//!
//! Provides the formats used for the logger-owned `time` field.
//! Supports ISO 8601, RFC 3339, Unix timestamps, and custom strftime formats.

use super::error::{LoggerError, Result};
use super::log_message::FieldValue;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

const ISO8601_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
const ISO8601_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use rust_stream_logger::TimestampFormat;
///
/// let format: TimestampFormat = "unix-millis".parse().unwrap();
/// assert!(format.is_numeric());
///
/// let custom: TimestampFormat = "%d/%b/%Y:%H:%M:%S".parse().unwrap();
/// assert!(!custom.is_numeric());
///
/// assert!("%Q".parse::<TimestampFormat>().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    ///
    /// This is the default format, widely supported by log aggregation systems.
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format, validated on construction through
    /// [`TimestampFormat::custom`] or `FromStr`.
    Custom(String),
}

impl TimestampFormat {
    /// Build a custom format, rejecting strftime strings chrono cannot render.
    pub fn custom(format_str: impl Into<String>) -> Result<Self> {
        let format_str = format_str.into();
        if StrftimeItems::new(&format_str).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("invalid strftime format '{}'", format_str),
            ));
        }
        Ok(TimestampFormat::Custom(format_str))
    }

    /// Format a `DateTime<Utc>` according to this format
    ///
    /// An unrenderable custom pattern falls back to the default ISO 8601
    /// layout instead of panicking.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format(ISO8601_MILLIS).to_string(),
            TimestampFormat::Iso8601Micros => datetime.format(ISO8601_MICROS).to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                if write!(out, "{}", datetime.format(format_str)).is_err() {
                    return datetime.format(ISO8601_MILLIS).to_string();
                }
                out
            }
        }
    }

    /// Value stored under the `time` field: integers for Unix formats,
    /// strings otherwise.
    #[must_use]
    pub fn field_value(&self, datetime: &DateTime<Utc>) -> FieldValue {
        match self {
            TimestampFormat::Unix => FieldValue::Int(datetime.timestamp()),
            TimestampFormat::UnixMillis => FieldValue::Int(datetime.timestamp_millis()),
            TimestampFormat::UnixMicros => FieldValue::Int(datetime.timestamp_micros()),
            _ => FieldValue::String(self.format(datetime)),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}

impl FromStr for TimestampFormat {
    type Err = LoggerError;

    /// Accepts a preset name (`iso8601`, `iso8601-micros`, `rfc3339`, `unix`,
    /// `unix-millis`, `unix-micros`) or a strftime pattern. Empty input
    /// selects the default.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "iso8601" => Ok(TimestampFormat::Iso8601),
            "iso8601-micros" => Ok(TimestampFormat::Iso8601Micros),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix" => Ok(TimestampFormat::Unix),
            "unix-millis" => Ok(TimestampFormat::UnixMillis),
            "unix-micros" => Ok(TimestampFormat::UnixMicros),
            _ => TimestampFormat::custom(trimmed),
        }
    }
}

//! Log level definitions

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Severity of a log call, most severe first.
///
/// `Custom` is an unranked sentinel that sorts ahead of `Fatal`, so a
/// custom-severity message passes every minimum-level threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
#[derive(Default)]
pub enum LogLevel {
    Custom = 0,
    Fatal = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl LogLevel {
    /// Every ranked level, most severe first.
    pub const RANKED: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
            LogLevel::Custom => "custom",
        }
    }

    /// Numeric rank, `0` for `Fatal` through `5` for `Trace`.
    pub fn rank(&self) -> Option<u8> {
        match self {
            LogLevel::Custom => None,
            other => Some(*other as u8 - 1),
        }
    }

    /// Parse a level leniently. Unknown input yields `Info`.
    ///
    /// Matching is case-insensitive and accepts the long name, the usual
    /// abbreviations and the numeric rank; any number above the `Trace`
    /// rank clamps to `Trace`.
    ///
    /// ```
    /// use rust_stream_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("WARN"), LogLevel::Warning);
    /// assert_eq!(LogLevel::parse("w"), LogLevel::Warning);
    /// assert_eq!(LogLevel::parse("2"), LogLevel::Warning);
    /// assert_eq!(LogLevel::parse("bogus"), LogLevel::Info);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let token = raw.trim().to_lowercase();

        if let Ok(n) = token.parse::<i64>() {
            if n > 5 {
                return LogLevel::Trace;
            }
        }

        match token.as_str() {
            "f" | "0" | "fatal" => LogLevel::Fatal,
            "e" | "1" | "err" | "error" => LogLevel::Error,
            "w" | "2" | "warn" | "warning" => LogLevel::Warning,
            "i" | "3" | "info" => LogLevel::Info,
            "d" | "4" | "dbg" | "debug" => LogLevel::Debug,
            "t" | "5" | "trace" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    /// Parse a level from raw bytes, e.g. an environment value or a header.
    pub fn parse_bytes(raw: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(raw))
    }

    /// Whether lines at this level go to the error stream.
    pub fn is_error_stream(&self) -> bool {
        matches!(self, LogLevel::Fatal | LogLevel::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogLevel::parse(s))
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl From<String> for LogLevel {
    fn from(raw: String) -> Self {
        LogLevel::parse(&raw)
    }
}

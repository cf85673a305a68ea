//! Logger configuration loaded from serde sources or the environment

use super::error::Result;
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Environment variable naming the minimum level
pub const ENV_LEVEL: &str = "LOG_LEVEL";
/// Environment variable selecting `text` or `json` output
pub const ENV_FORMAT: &str = "LOG_FORMAT";
/// Environment variable holding a timestamp preset or strftime pattern
pub const ENV_TIME_FORMAT: &str = "LOG_TIME_FORMAT";

/// Serializable logger settings.
///
/// Sinks and hooks are not part of the configuration; attach them on the
/// [`LoggerBuilder`](super::LoggerBuilder) returned by `from_config`.
///
/// # Example
///
/// ```
/// use rust_stream_logger::{LogLevel, LoggerConfig, OutputFormat};
///
/// let config: LoggerConfig =
///     serde_json::from_str(r#"{"level": "WARN", "format": "json"}"#).unwrap();
///
/// assert_eq!(config.level, LogLevel::Warning);
/// assert_eq!(config.format, OutputFormat::Json);
/// assert_eq!(config.time_format, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level; unrecognized text falls back to `info`
    pub level: LogLevel,

    /// Timestamp preset or strftime pattern; `None` means ISO 8601 with milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,

    pub format: OutputFormat,
}

impl LoggerConfig {
    /// Read `LOG_LEVEL`, `LOG_FORMAT` and `LOG_TIME_FORMAT` from the process
    /// environment. Other variables are never read; non-UTF-8 values are
    /// decoded lossily.
    pub fn from_env() -> Result<Self> {
        Self::from_vars([ENV_LEVEL, ENV_FORMAT, ENV_TIME_FORMAT].into_iter().filter_map(|name| {
            std::env::var_os(name).map(|value| (name, value.to_string_lossy().into_owned()))
        }))
    }

    /// Build a configuration from `(name, value)` pairs.
    ///
    /// Unknown names are ignored. An unknown output format or an invalid
    /// strftime pattern is an error; a bad level is not.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = LoggerConfig::default();

        for (name, value) in vars {
            let value = value.as_ref();
            match name.as_ref() {
                ENV_LEVEL => config.level = LogLevel::parse(value),
                ENV_FORMAT => config.format = value.parse()?,
                ENV_TIME_FORMAT => {
                    value.parse::<TimestampFormat>()?;
                    config.time_format = Some(value.to_string());
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Resolve the configured timestamp format
    pub fn timestamp_format(&self) -> Result<TimestampFormat> {
        match &self.time_format {
            Some(raw) => raw.parse(),
            None => Ok(TimestampFormat::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.timestamp_format().unwrap(), TimestampFormat::Iso8601);
    }

    #[test]
    fn test_from_vars() {
        let config = LoggerConfig::from_vars([
            ("LOG_LEVEL", "dbg"),
            ("LOG_FORMAT", "json"),
            ("LOG_TIME_FORMAT", "unix-millis"),
            ("PATH", "/usr/bin"),
        ])
        .unwrap();

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.timestamp_format().unwrap(), TimestampFormat::UnixMillis);
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = LoggerConfig::from_vars([("LOG_LEVEL", "loud")]).unwrap();
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_bad_time_format_rejected() {
        let err = LoggerConfig::from_vars([("LOG_TIME_FORMAT", "%Y-%Q")]).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(LoggerConfig::from_vars([("LOG_FORMAT", "xml")]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_from_env_ignores_non_utf8_variables() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = "RUST_STREAM_LOGGER_TEST_NON_UTF8";
        std::env::set_var(name, OsStr::from_bytes(&[0xff, 0xfe]));
        let result = std::panic::catch_unwind(LoggerConfig::from_env);
        std::env::remove_var(name);

        assert!(result.is_ok(), "from_env panicked");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"time_format": "%H:%M:%S"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(
            config.timestamp_format().unwrap(),
            TimestampFormat::Custom("%H:%M:%S".to_string())
        );
    }
}

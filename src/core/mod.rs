//! Core logger types and traits

pub mod call_site;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_message;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod sink;
pub mod timestamp;

pub use call_site::CallSite;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use log_level::LogLevel;
pub use log_message::{
    FieldValue, LogMessage, FIXED_KEYS, KEY_ERROR, KEY_LEVEL, KEY_MESSAGE, KEY_TIME,
};
pub use logger::{FatalHook, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use sink::Sink;
pub use timestamp::TimestampFormat;

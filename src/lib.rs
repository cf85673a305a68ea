//! # Rust Stream Logger
//!
//! A leveled, structured logger writing one line per call to a pair of
//! output streams.
//!
//! ## Features
//!
//! - **Levels**: fatal, error, warning, info, debug, trace and a `custom`
//!   level that is never filtered
//! - **Structured messages**: every line is built from named fields
//! - **Text or JSON**: `key="value"` lines or one JSON object per line
//! - **Stream routing**: fatal and error lines go to stderr, the rest to stdout
//! - **Access logging**: HTTP request fields with a generated session id
//!   (`access` feature)
//!
//! ## Example
//!
//! ```
//! use rust_stream_logger::prelude::*;
//!
//! let out = MemorySink::new();
//! let logger = Logger::builder()
//!     .output_format(OutputFormat::Json)
//!     .timestamp_format(TimestampFormat::Unix)
//!     .stdout(out.clone())
//!     .build();
//!
//! logger.info(LogMessage::new().with_message("ready").with_field("port", 8080));
//!
//! let line: serde_json::Value = serde_json::from_str(&out.lines()[0]).unwrap();
//! assert_eq!(line["level"], "info");
//! assert_eq!(line["port"], 8080);
//! ```

#[cfg(feature = "access")]
pub mod access;
pub mod core;
pub mod formatters;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "access")]
    pub use crate::access::{AccessRequest, RequestInfo};
    pub use crate::core::{
        CallSite, FieldValue, Formatter, LogLevel, LogMessage, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result, Sink, TimestampFormat,
    };
    pub use crate::formatters::{JsonFormatter, TextFormatter};
    pub use crate::sinks::{MemorySink, StderrSink, StdoutSink, WriterSink};
}

#[cfg(feature = "access")]
pub use crate::access::{access_fields, generate_session_id, AccessRequest, RequestInfo};
pub use crate::core::{
    CallSite, FatalHook, FieldValue, Formatter, LogLevel, LogMessage, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result, Sink, TimestampFormat,
    FATAL_EXIT_CODE, FIXED_KEYS, KEY_ERROR, KEY_LEVEL, KEY_MESSAGE, KEY_TIME,
};
pub use crate::formatters::{JsonFormatter, TextFormatter};
pub use crate::sinks::{MemorySink, StderrSink, StdoutSink, WriterSink};

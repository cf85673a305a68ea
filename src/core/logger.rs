//! Main logger implementation

use super::{
    call_site::CallSite,
    config::LoggerConfig,
    error::{LoggerError, Result},
    formatter::Formatter,
    log_level::LogLevel,
    log_message::{FieldValue, LogMessage, KEY_LEVEL, KEY_TIME},
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    sink::Sink,
    timestamp::TimestampFormat,
};
use crate::sinks::{StderrSink, StdoutSink};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Exit status used after a fatal-level line has been written
pub const FATAL_EXIT_CODE: i32 = 127;

/// Hook invoked with [`FATAL_EXIT_CODE`] after a fatal line is written.
/// Defaults to `std::process::exit`.
pub type FatalHook = Box<dyn Fn(i32) + Send + Sync>;

/// Leveled logger writing one formatted line per call.
///
/// Configuration is fixed at construction; share the logger by reference or
/// through an `Arc`. Fatal and error lines go to the error sink, everything
/// else to the normal sink. Each sink sits behind its own mutex so lines
/// from concurrent callers never interleave.
///
/// # Example
///
/// ```
/// use rust_stream_logger::prelude::*;
///
/// let out = MemorySink::new();
/// let err = MemorySink::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .stdout(out.clone())
///     .stderr(err.clone())
///     .build();
///
/// logger.info("started");
/// logger.debug("skipped");
///
/// let mut msg = LogMessage::new();
/// msg.put_message("boom").put("code", 500);
/// logger.error(msg);
///
/// assert_eq!(out.lines().len(), 1);
/// assert!(err.contents().contains("code=500"));
/// ```
pub struct Logger {
    min_level: LogLevel,
    timestamp_format: TimestampFormat,
    formatter: Box<dyn Formatter>,
    stdout: Mutex<Box<dyn Sink>>,
    stderr: Mutex<Box<dyn Sink>>,
    on_fatal: FatalHook,
    capture_trace_location: bool,
    /// Metrics for observability (emitted, suppressed, failures)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with default settings: `info`, text lines, process stdout/stderr
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Whether a call at `level` passes the minimum-level filter.
    /// `Custom` always passes.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn is_debug(&self) -> bool {
        self.is_enabled(LogLevel::Debug)
    }

    pub fn log(&self, level: LogLevel, msg: impl Into<LogMessage>) {
        self.emit(level, msg.into());
    }

    /// Log at fatal level, then terminate through the fatal hook.
    ///
    /// Both sinks are flushed before the hook runs.
    pub fn fatal(&self, msg: impl Into<LogMessage>) {
        self.emit(LogLevel::Fatal, msg.into());
        if let Err(e) = self.flush() {
            report_internal(format_args!("Failed to flush before exit: {}", e));
        }
        (self.on_fatal)(FATAL_EXIT_CODE);
    }

    #[inline]
    pub fn error(&self, msg: impl Into<LogMessage>) {
        self.emit(LogLevel::Error, msg.into());
    }

    #[inline]
    pub fn warning(&self, msg: impl Into<LogMessage>) {
        self.emit(LogLevel::Warning, msg.into());
    }

    #[inline]
    pub fn info(&self, msg: impl Into<LogMessage>) {
        self.emit(LogLevel::Info, msg.into());
    }

    #[inline]
    pub fn debug(&self, msg: impl Into<LogMessage>) {
        self.emit(LogLevel::Debug, msg.into());
    }

    /// Log at trace level with the caller's `file` location attached.
    ///
    /// A method call can only see the caller's file and line; the
    /// [`trace!`](crate::trace) macro also records `module` and `function`.
    #[track_caller]
    pub fn trace(&self, msg: impl Into<LogMessage>) {
        self.trace_at(CallSite::caller(), msg);
    }

    /// Log at trace level with an explicit call site
    pub fn trace_at(&self, site: CallSite, msg: impl Into<LogMessage>) {
        let mut msg = msg.into();
        if self.capture_trace_location && self.is_enabled(LogLevel::Trace) {
            msg.add_call_site(&site);
        }
        self.emit(LogLevel::Trace, msg);
    }

    /// Emit a pre-built message at the severity named by its own `level`
    /// field. A message without one, or with `level="custom"`, is treated as
    /// `Custom` and is never filtered.
    pub fn write(&self, msg: LogMessage) {
        let level = match msg.get(KEY_LEVEL) {
            Some(FieldValue::String(raw)) => level_from_field(raw),
            Some(other) => level_from_field(&other.to_string()),
            None => LogLevel::Custom,
        };
        self.emit(level, msg);
    }

    pub fn flush(&self) -> Result<()> {
        let out = self.stdout.lock().flush();
        let err = self.stderr.lock().flush();
        out.and(err)
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn emit(&self, level: LogLevel, mut msg: LogMessage) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }

        let now = Utc::now();
        msg.put(KEY_TIME, self.timestamp_format.field_value(&now));
        msg.put(KEY_LEVEL, level.as_str());

        let formatted = catch_unwind(AssertUnwindSafe(|| self.formatter.format(&msg)));
        let line = match formatted {
            Ok(Ok(line)) => line,
            Ok(Err(e)) => {
                self.report_format_failure(&now, &failure_reason(&e));
                return;
            }
            Err(panic_info) => {
                let reason = format!("formatter panicked: {}", panic_message(&*panic_info));
                self.report_format_failure(&now, &reason);
                return;
            }
        };

        let sink = if level.is_error_stream() {
            &self.stderr
        } else {
            &self.stdout
        };

        let mut bytes = line.into_bytes();
        bytes.push(b'\n');
        if self.write_to(sink, &bytes) {
            self.metrics.record_emitted();
        }
    }

    /// Write a diagnostic straight to the error sink, bypassing the formatter
    fn report_format_failure(&self, now: &DateTime<Utc>, reason: &str) {
        self.metrics.record_format_failure();
        let line = format!(
            "{} ERROR: {} formatter failed: {}\n",
            self.timestamp_format.format(now),
            self.formatter.name(),
            reason
        );
        self.write_to(&self.stderr, line.as_bytes());
    }

    /// Write one complete line under the sink lock, isolating sink panics
    fn write_to(&self, sink: &Mutex<Box<dyn Sink>>, bytes: &[u8]) -> bool {
        let mut guard = sink.lock();
        let result = catch_unwind(AssertUnwindSafe(|| guard.write_line(bytes)));

        match result {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                self.metrics.record_write_failure();
                report_internal(format_args!("Sink '{}' failed: {}", guard.name(), e));
                false
            }
            Err(panic_info) => {
                self.metrics.record_write_failure();
                report_internal(format_args!(
                    "Sink panicked: {}",
                    panic_message(&*panic_info)
                ));
                false
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("timestamp_format", &self.timestamp_format)
            .field("formatter", &self.formatter.name())
            .field("capture_trace_location", &self.capture_trace_location)
            .finish_non_exhaustive()
    }
}

fn level_from_field(raw: &str) -> LogLevel {
    if raw.trim().eq_ignore_ascii_case(LogLevel::Custom.as_str()) {
        LogLevel::Custom
    } else {
        LogLevel::parse(raw)
    }
}

/// Formatter errors already carry the formatter name, which the diagnostic
/// line prints itself.
fn failure_reason(error: &LoggerError) -> String {
    match error {
        LoggerError::FormatterError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Best-effort diagnostic on the process stderr; its own failure is ignored.
fn report_internal(args: fmt::Arguments<'_>) {
    let _ = writeln!(std::io::stderr(), "[LOGGER ERROR] {}", args);
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_stream_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level_str("dbg")
///     .output_format(OutputFormat::Json)
///     .timestamp_format(TimestampFormat::UnixMillis)
///     .build();
///
/// assert_eq!(logger.min_level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
    formatter: Option<Box<dyn Formatter>>,
    stdout: Option<Box<dyn Sink>>,
    stderr: Option<Box<dyn Sink>>,
    on_fatal: Option<FatalHook>,
    capture_trace_location: bool,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
            formatter: None,
            stdout: None,
            stderr: None,
            on_fatal: None,
            capture_trace_location: true,
        }
    }

    /// Start from a loaded configuration.
    ///
    /// Fails when the configured time format is not a valid strftime pattern.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        Ok(Self::new()
            .min_level(config.level)
            .output_format(config.format)
            .timestamp_format(config.timestamp_format()?))
    }

    /// Set minimum log level. `Custom` is normalized to `Info`.
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set minimum log level from text, falling back to `Info`
    #[must_use = "builder methods return a new value"]
    pub fn min_level_str(self, raw: &str) -> Self {
        self.min_level(LogLevel::parse(raw))
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Select a built-in formatter. Ignored when [`formatter`](Self::formatter) is set.
    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Use a custom formatter
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Sink for warning, info, debug, trace and custom lines
    #[must_use = "builder methods return a new value"]
    pub fn stdout<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stdout = Some(Box::new(sink));
        self
    }

    /// Sink for fatal and error lines and formatter diagnostics
    #[must_use = "builder methods return a new value"]
    pub fn stderr<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stderr = Some(Box::new(sink));
        self
    }

    /// Replace the process exit performed after a fatal line
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal<F>(mut self, hook: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.on_fatal = Some(Box::new(hook));
        self
    }

    /// Attach `module`/`file` fields to trace-level lines (default: on)
    #[must_use = "builder methods return a new value"]
    pub fn capture_trace_location(mut self, enabled: bool) -> Self {
        self.capture_trace_location = enabled;
        self
    }

    pub fn build(self) -> Logger {
        let min_level = match self.min_level {
            LogLevel::Custom => LogLevel::Info,
            level => level,
        };

        Logger {
            min_level,
            timestamp_format: self.timestamp_format,
            formatter: self
                .formatter
                .unwrap_or_else(|| self.output_format.formatter()),
            stdout: Mutex::new(self.stdout.unwrap_or_else(|| Box::new(StdoutSink::new()))),
            stderr: Mutex::new(self.stderr.unwrap_or_else(|| Box::new(StderrSink::new()))),
            on_fatal: self
                .on_fatal
                .unwrap_or_else(|| Box::new(|code| std::process::exit(code))),
            capture_trace_location: self.capture_trace_location,
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

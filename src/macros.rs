//! Logging macros with `format!`-style arguments.
//!
//! Every macro takes the logger as its first argument; there is no global
//! logger.
//!
//! # Examples
//!
//! ```
//! use rust_stream_logger::prelude::*;
//! use rust_stream_logger::{fields, info};
//!
//! let out = MemorySink::new();
//! let logger = Logger::builder().stdout(out.clone()).build();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//!
//! logger.info(fields! {
//!     "message" => "request served",
//!     "status" => 200,
//! });
//!
//! assert_eq!(out.lines().len(), 2);
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use rust_stream_logger::prelude::*;
/// # let logger = Logger::builder().stdout(MemorySink::new()).stderr(MemorySink::new()).build();
/// use rust_stream_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Path of the function the macro is expanded in, e.g. `app::db::connect`.
///
/// Inside a closure the path ends in `{{closure}}`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// Log at trace level with the `module`, `function`, file and line of the
/// invocation.
///
/// ```
/// # use rust_stream_logger::prelude::*;
/// let out = MemorySink::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Trace)
///     .stdout(out.clone())
///     .build();
///
/// rust_stream_logger::trace!(logger, "value is {}", 42);
/// assert!(out.contents().contains("module="));
/// assert!(out.contents().contains("function="));
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace_at(
            $crate::CallSite::new(Some(module_path!()), file!(), line!())
                .with_function($crate::function_name!()),
            format!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log at fatal level and run the logger's fatal hook.
///
/// ```
/// # use rust_stream_logger::prelude::*;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let code = Arc::new(AtomicI32::new(0));
/// let seen = Arc::clone(&code);
/// let logger = Logger::builder()
///     .stderr(MemorySink::new())
///     .on_fatal(move |c| seen.store(c, Ordering::SeqCst))
///     .build();
///
/// rust_stream_logger::fatal!(logger, "disk {} is full", "/dev/sda1");
/// assert_eq!(code.load(Ordering::SeqCst), 127);
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}

/// Build a [`LogMessage`](crate::LogMessage) from `key => value` pairs.
///
/// ```
/// use rust_stream_logger::fields;
///
/// let msg = fields! { "user" => "alice", "attempts" => 3 };
/// assert_eq!(msg.get_str("user"), Some("alice"));
/// assert_eq!(fields! {}.len(), 0);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::LogMessage::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut msg = $crate::LogMessage::new();
        $( msg.put($key, $value); )+
        msg
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use crate::sinks::MemorySink;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    fn capture(level: LogLevel) -> (Logger, MemorySink, MemorySink) {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let logger = Logger::builder()
            .min_level(level)
            .stdout(out.clone())
            .stderr(err.clone())
            .on_fatal(|_| {})
            .build();
        (logger, out, err)
    }

    #[test]
    fn test_level_macros_route_lines() {
        let (logger, out, err) = capture(LogLevel::Debug);

        debug!(logger, "debug {}", 1);
        info!(logger, "info {}", 2);
        warning!(logger, "warning {}", 3);
        error!(logger, "error {}", 4);
        fatal!(logger, "fatal {}", 5);

        let out = out.lines();
        assert_eq!(out.len(), 3);
        assert!(out[0].contains(r#"level="debug" message="debug 1""#));
        assert!(out[2].contains(r#"level="warning" message="warning 3""#));

        let err = err.lines();
        assert_eq!(err.len(), 2);
        assert!(err[0].contains(r#"message="error 4""#));
        assert!(err[1].contains(r#"level="fatal""#));
    }

    #[test]
    fn test_log_macro_filters() {
        let (logger, out, _err) = capture(LogLevel::Warning);
        log!(logger, LogLevel::Info, "hidden {}", "value");
        assert!(out.is_empty());
    }

    #[test]
    fn test_trace_macro_records_module() {
        let (logger, out, _err) = capture(LogLevel::Trace);
        trace!(logger, "step {}", 7);

        let line = out.contents();
        assert!(line.contains(&format!("module=\"{}\"", module_path!())));
        assert!(line.contains("macros.rs:"));
    }

    #[test]
    fn test_trace_macro_records_function() {
        let (logger, out, _err) = capture(LogLevel::Trace);
        trace!(logger, "inside");

        let line = out.contents();
        assert!(
            line.contains(
                "function=\"rust_stream_logger::macros::tests::test_trace_macro_records_function\""
            ),
            "line was {}",
            line
        );
    }

    #[test]
    fn test_fatal_macro_runs_hook() {
        let code = Arc::new(AtomicI32::new(0));
        let seen = Arc::clone(&code);
        let logger = Logger::builder()
            .stderr(MemorySink::new())
            .on_fatal(move |c| seen.store(c, Ordering::SeqCst))
            .build();

        fatal!(logger, "bye");
        assert_eq!(code.load(Ordering::SeqCst), crate::FATAL_EXIT_CODE);
    }

    #[test]
    fn test_fields_macro() {
        let msg = fields! {
            "message" => "hello",
            "count" => 3,
            "ok" => true,
        };
        assert_eq!(msg.len(), 3);
        assert_eq!(msg.get("count").and_then(|v| v.as_i64()), Some(3));
    }
}

//! Integration tests for the stream logger
//!
//! These tests verify:
//! - Level filtering and stream routing
//! - Text and JSON line layouts
//! - Log injection prevention
//! - Fatal ordering and exit code
//! - File-backed sinks
//! - Thread safety
//! - Configuration loading

use rust_stream_logger::prelude::*;
use rust_stream_logger::{fields, FATAL_EXIT_CODE};
use std::fs::{self, File};
use std::process::Command;
use std::sync::{Arc, Mutex as StdMutex};
use std::thread;
use tempfile::TempDir;

fn capture(level: LogLevel, format: OutputFormat) -> (Logger, MemorySink, MemorySink) {
    let out = MemorySink::new();
    let err = MemorySink::new();
    let logger = Logger::builder()
        .min_level(level)
        .output_format(format)
        .stdout(out.clone())
        .stderr(err.clone())
        .on_fatal(|_| {})
        .build();
    (logger, out, err)
}

#[test]
fn test_info_line_on_normal_stream() {
    let (logger, out, err) = capture(LogLevel::Info, OutputFormat::Text);

    logger.info(fields! { "message" => "started" });

    let lines = out.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("time=\""));
    assert!(lines[0].contains("Z\" level=\"info\" message=\"started\""));
    assert!(err.is_empty());
}

#[test]
fn test_debug_filtered_at_info() {
    let (logger, out, err) = capture(LogLevel::Info, OutputFormat::Text);

    logger.debug(fields! { "message" => "skipped" });

    assert!(out.is_empty());
    assert!(err.is_empty());
    assert_eq!(logger.metrics().suppressed(), 1);
}

#[test]
fn test_json_error_line() {
    let (logger, out, err) = capture(LogLevel::Info, OutputFormat::Json);

    logger.error(fields! { "message" => "boom", "code" => 500 });

    assert!(out.is_empty());
    let lines = err.lines();
    assert_eq!(lines.len(), 1);

    let value: serde_json::Value = serde_json::from_str(&lines[0]).expect("valid JSON line");
    assert_eq!(value["level"], "error");
    assert_eq!(value["message"], "boom");
    assert_eq!(value["code"], 500);
    assert!(value["time"].as_str().is_some_and(|t| t.ends_with('Z')));
}

#[test]
fn test_routing_for_every_level() {
    let (logger, out, err) = capture(LogLevel::Trace, OutputFormat::Text);

    logger.fatal("f");
    logger.error("e");
    logger.warning("w");
    logger.info("i");
    logger.debug("d");
    logger.trace("t");
    logger.log(LogLevel::Custom, "c");

    assert_eq!(err.lines().len(), 2);
    assert_eq!(out.lines().len(), 5);
    assert!(out.lines()[4].contains(r#"level="custom""#));
}

#[test]
fn test_log_injection_prevention() {
    let (logger, out, _err) = capture(LogLevel::Info, OutputFormat::Text);

    logger.info("User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation");

    let content = out.contents();
    assert!(content.contains("\\n"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_fatal_writes_before_exit_hook() {
    let err = MemorySink::new();
    let seen = Arc::new(StdMutex::new(None));

    let observed = err.clone();
    let record = Arc::clone(&seen);
    let logger = Logger::builder()
        .stderr(err.clone())
        .on_fatal(move |code| {
            *record.lock().unwrap() = Some((code, observed.lines().len()));
        })
        .build();

    logger.fatal(fields! { "message" => "shutting down" });

    assert_eq!(*seen.lock().unwrap(), Some((FATAL_EXIT_CODE, 1)));
    assert!(err.contents().contains(r#"level="fatal" message="shutting down""#));
}

const FATAL_CHILD_ENV: &str = "RUST_STREAM_LOGGER_FATAL_CHILD";

/// Re-runs this test in a child process where the default fatal hook
/// terminates the process.
#[test]
fn test_default_fatal_hook_exits_with_127() {
    if std::env::var_os(FATAL_CHILD_ENV).is_some() {
        let logger = Logger::builder().stdout(MemorySink::new()).build();
        logger.fatal(fields! { "message" => "terminating" });
        unreachable!("fatal returned without exiting");
    }

    let exe = std::env::current_exe().expect("Failed to locate test binary");
    let output = Command::new(exe)
        .args([
            "test_default_fatal_hook_exits_with_127",
            "--exact",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(FATAL_CHILD_ENV, "1")
        .output()
        .expect("Failed to run child test process");

    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(r#"level="fatal" message="terminating""#),
        "child stderr: {}",
        stderr
    );
}

#[test]
fn test_lookalike_reserved_keys_stay_single() {
    let (logger, out, _err) = capture(LogLevel::Info, OutputFormat::Text);

    logger.info(
        LogMessage::new()
            .with_message("hi")
            .with_field("level ", "fatal")
            .with_field(" time", "1999"),
    );

    let line = out.lines().remove(0);
    assert_eq!(line.matches("level=").count(), 1, "line: {}", line);
    assert_eq!(line.matches("time=").count(), 1, "line: {}", line);
    assert!(line.contains(r#"level="info""#));
}

#[test]
fn test_trace_captures_call_site() {
    let (logger, out, _err) = capture(LogLevel::Trace, OutputFormat::Json);

    logger.trace("inside");

    let value: serde_json::Value = serde_json::from_str(&out.lines()[0]).unwrap();
    let file = value["file"].as_str().unwrap();
    assert!(file.contains("integration_tests.rs:"), "file was {}", file);
}

#[test]
fn test_writer_sink_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("app.log");
    let file = File::create(&path).expect("Failed to create log file");

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .timestamp_format(TimestampFormat::UnixMillis)
        .stdout(WriterSink::named("app.log", file))
        .build();

    for i in 0..10 {
        logger.debug(fields! { "message" => "tick", "n" => i });
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[9].ends_with("n=9"));
    assert!(lines[0].starts_with("time="));
    assert!(!lines[0].starts_with("time=\""));
}

#[test]
fn test_concurrent_logging_keeps_lines_whole() {
    let out = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .output_format(OutputFormat::Json)
            .stdout(out.clone())
            .build(),
    );

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    logger.info(fields! { "message" => "work", "thread" => t, "i" => i });
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let lines = out.lines();
    assert_eq!(lines.len(), 400);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(&line).expect("whole JSON line");
        assert_eq!(value["message"], "work");
    }
    assert_eq!(logger.metrics().emitted(), 400);
}

#[test]
fn test_builder_from_config() {
    let config =
        LoggerConfig::from_vars([("LOG_LEVEL", "WARN"), ("LOG_FORMAT", "json")]).unwrap();

    let out = MemorySink::new();
    let logger = LoggerBuilder::from_config(&config)
        .unwrap()
        .stdout(out.clone())
        .build();

    logger.info("hidden");
    logger.warning("shown");

    assert_eq!(logger.min_level(), LogLevel::Warning);
    let lines = out.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with('{'));
}

#[test]
fn test_custom_formatter() {
    struct MessageOnly;

    impl Formatter for MessageOnly {
        fn format(&self, msg: &LogMessage) -> Result<String> {
            Ok(msg.get_str("message").unwrap_or_default().to_uppercase())
        }

        fn name(&self) -> &str {
            "message-only"
        }
    }

    let out = MemorySink::new();
    let logger = Logger::builder()
        .formatter(MessageOnly)
        .stdout(out.clone())
        .build();

    logger.info("quiet");
    assert_eq!(out.contents(), "QUIET\n");
}

#[test]
fn test_non_finite_float_reports_diagnostic() {
    let (logger, out, err) = capture(LogLevel::Info, OutputFormat::Json);

    logger.info(fields! { "message" => "ratio", "value" => f64::NAN });

    assert!(out.is_empty());
    let diagnostic = err.contents();
    assert!(diagnostic.contains("ERROR: json formatter failed: "));
    assert!(!diagnostic.contains("Formatter error"));
    assert_eq!(logger.metrics().format_failures(), 1);
}

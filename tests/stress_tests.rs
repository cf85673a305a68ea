//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Lines from many threads never interleave
//! - Both streams stay consistent under mixed-level load
//! - A failing sink does not disturb the other stream

use rust_stream_logger::prelude::*;
use rust_stream_logger::fields;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 16;
const PER_THREAD: usize = 500;

#[test]
fn test_many_threads_no_interleaving() {
    let out = MemorySink::new();
    let err = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .min_level(LogLevel::Debug)
            .stdout(out.clone())
            .stderr(err.clone())
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let msg = fields! {
                        "message" => "payload with \"quotes\" and\nnewline",
                        "id" => format!("{}-{}", t, i),
                    };
                    if i % 5 == 0 {
                        logger.error(msg);
                    } else {
                        logger.debug(msg);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let out_lines = out.lines();
    let err_lines = err.lines();
    assert_eq!(out_lines.len() + err_lines.len(), THREADS * PER_THREAD);
    assert_eq!(err_lines.len(), THREADS * PER_THREAD / 5);

    let mut ids = HashSet::new();
    for line in out_lines.iter().chain(err_lines.iter()) {
        assert!(line.starts_with("time=\""), "broken line: {}", line);
        assert_eq!(line.matches(" level=").count(), 1, "interleaved: {}", line);
        let id = line.rsplit("id=").next().unwrap();
        assert!(ids.insert(id.to_string()), "duplicate id {}", id);
    }
    assert_eq!(logger.metrics().emitted(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_failing_stderr_does_not_block_stdout() {
    struct ClosedSink;

    impl Sink for ClosedSink {
        fn write_line(&mut self, _line: &[u8]) -> Result<()> {
            Err(LoggerError::writer("closed"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "closed"
        }
    }

    let out = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .stdout(out.clone())
            .stderr(ClosedSink)
            .build(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..100 {
                    logger.error("lost");
                    logger.info("kept");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(out.lines().len(), 400);
    assert_eq!(logger.metrics().write_failures(), 400);
    assert_eq!(logger.metrics().emitted(), 400);
}

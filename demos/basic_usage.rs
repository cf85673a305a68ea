//! Basic logger usage example
//!
//! Demonstrates level filtering and stream routing on the process console.
//!
//! Run with: cargo run --example basic_usage

use rust_stream_logger::prelude::*;
use rust_stream_logger::{info, warning};

fn main() -> Result<()> {
    println!("=== Rust Stream Logger - Basic Usage Example ===\n");

    println!("1. Logging at different levels (errors go to stderr):");
    let logger = Logger::builder()
        .min_level(LogLevel::Trace)
        .on_fatal(|code| println!("   (fatal hook called with exit code {})", code))
        .build();

    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Minimum level INFO - trace and debug won't show:");
    let logger = Logger::builder().min_level_str("info").build();
    logger.trace("Trace message (hidden)");
    logger.debug("Debug message (hidden)");
    info!(logger, "Info message {}", "(visible)");
    warning!(logger, "Retry attempt {} of {}", 3, 5);

    println!("\n3. Configuration from the environment (LOG_LEVEL, LOG_FORMAT):");
    let config = LoggerConfig::from_env()?;
    let logger = LoggerBuilder::from_config(&config)?.build();
    logger.info(
        LogMessage::new()
            .with_message("configured")
            .with_field("configured_level", config.level.as_str()),
    );

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}

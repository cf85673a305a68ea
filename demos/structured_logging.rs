//! Structured logging example
//!
//! Demonstrates field messages in text and JSON, custom timestamps and
//! writing to a file.
//!
//! Run with: cargo run --example structured_logging

use rust_stream_logger::fields;
use rust_stream_logger::prelude::*;
use std::fs::{self, File};

fn main() -> Result<()> {
    println!("=== Rust Stream Logger - Structured Logging Example ===\n");

    let event = fields! {
        "message" => "order placed",
        "order_id" => 1042,
        "total" => 99.95,
        "express" => true,
        "items" => vec!["book", "pen"],
    };

    println!("1. Text lines:");
    let text = Logger::new();
    text.info(event.clone());

    println!("\n2. JSON lines with Unix millisecond timestamps:");
    let json = Logger::builder()
        .output_format(OutputFormat::Json)
        .timestamp_format(TimestampFormat::UnixMillis)
        .build();
    json.info(event.clone());
    json.error(LogMessage::new().with_message("payment declined").with_error("card expired"));

    println!("\n3. Custom strftime timestamp:");
    let custom = Logger::builder()
        .timestamp_format(TimestampFormat::custom("%H:%M:%S")?)
        .build();
    custom.warning("disk usage at 91%");

    println!("\n4. Writing to a file:");
    let path = std::env::temp_dir().join("rust_stream_logger_demo.log");
    let file = File::create(&path)?;
    let file_logger = Logger::builder()
        .output_format(OutputFormat::Json)
        .stdout(WriterSink::named("demo.log", file))
        .build();
    for n in 0..3 {
        file_logger.info(fields! { "message" => "batch processed", "batch" => n });
    }
    file_logger.flush()?;
    print!("{}", fs::read_to_string(&path)?);

    let metrics = file_logger.metrics();
    println!("\n   emitted={} dropped={}", metrics.emitted(), metrics.dropped_count());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

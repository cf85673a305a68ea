//! Access logging example
//!
//! Demonstrates HTTP access lines with generated session ids. At debug level
//! every request header is included.
//!
//! Run with: cargo run --example access_log

use rust_stream_logger::access::SESSION_ID_HEADER;
use rust_stream_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Stream Logger - Access Log Example ===\n");

    let request = RequestInfo::new("GET", "/api/items?page=2")
        .with_remote_addr("203.0.113.9:51234")
        .with_user("alice")
        .with_header("User-Agent", "curl/8.4.0")
        .with_header("Accept", "application/json");

    println!("1. Info level (user agent only):");
    let logger = Logger::builder().output_format(OutputFormat::Json).build();
    let session_id = logger.access(LogLevel::Info, &request);
    println!("   {}: {}", SESSION_ID_HEADER, session_id);

    println!("\n2. Debug level (all headers):");
    let verbose = Logger::builder()
        .min_level(LogLevel::Debug)
        .output_format(OutputFormat::Json)
        .build();
    verbose.access(LogLevel::Info, &request);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

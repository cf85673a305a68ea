//! Output format selection for the built-in formatters
//!
//! - Text: `key="value"` pairs (default)
//! - Json: one JSON object per line

use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use crate::formatters::{JsonFormatter, TextFormatter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `time="2025-01-08T10:30:45.123Z" level="info" message="Request processed"`
    #[default]
    Text,

    /// Example: `{"level":"info","message":"Request processed","time":"2025-01-08T10:30:45.123Z"}`
    Json,
}

impl OutputFormat {
    /// Build the formatter for this format
    pub fn formatter(&self) -> Box<dyn Formatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(LoggerError::config(
                "OutputFormat",
                format!("unknown output format '{}', expected 'text' or 'json'", other),
            )),
        }
    }
}

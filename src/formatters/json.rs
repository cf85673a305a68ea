//! JSON formatter: one object per line

use crate::core::{Formatter, LogMessage, LoggerError, Result};

/// Renders the whole message as a single-line JSON object.
///
/// Keys come out sorted because [`LogMessage`] keeps them in a `BTreeMap`.
/// Non-finite floats cannot be represented and make `format` fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, msg: &LogMessage) -> Result<String> {
        serde_json::to_string(msg).map_err(|e| LoggerError::formatter(self.name(), e.to_string()))
    }

    fn name(&self) -> &str {
        "json"
    }
}

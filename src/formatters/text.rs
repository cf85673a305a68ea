//! Text formatter: space-separated `key="value"` pairs

use crate::core::{FieldValue, Formatter, LogMessage, Result, FIXED_KEYS};

/// Renders `time`, `level`, `message` and `error` first, then every other
/// field in sorted key order.
///
/// Integers, floats and booleans are written bare (`code=500`); every other
/// value is quoted with `\`, `"`, newlines and tabs escaped, so a line never
/// spills onto a second line. Keys made only of alphanumerics, `_`, `-` and
/// `.` are written as-is; any other key is quoted the same way as a value, so
/// it can never read as a reserved key or collide with another field.
///
/// # Example
///
/// ```
/// use rust_stream_logger::formatters::TextFormatter;
/// use rust_stream_logger::{Formatter, LogMessage};
///
/// let msg = LogMessage::new()
///     .with_field("code", 500)
///     .with_message("boom")
///     .with_field("level", "error");
///
/// let line = TextFormatter.format(&msg).unwrap();
/// assert_eq!(line, r#"level="error" message="boom" code=500"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render_pair(key: &str, value: &FieldValue) -> String {
        let key = Self::escape_key(key);
        if value.is_bare() {
            format!("{}={}", key, value)
        } else {
            format!("{}={}", key, Self::quote_value(&value.to_string()))
        }
    }

    fn escape_key(key: &str) -> String {
        let plain = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if plain {
            key.to_string()
        } else {
            Self::quote_value(key)
        }
    }

    fn quote_value(value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            match c {
                '\\' => quoted.push_str("\\\\"),
                '"' => quoted.push_str("\\\""),
                '\n' => quoted.push_str("\\n"),
                '\r' => quoted.push_str("\\r"),
                '\t' => quoted.push_str("\\t"),
                other => quoted.push(other),
            }
        }
        quoted.push('"');
        quoted
    }
}

impl Formatter for TextFormatter {
    fn format(&self, msg: &LogMessage) -> Result<String> {
        let mut parts = Vec::with_capacity(msg.len());

        for key in FIXED_KEYS {
            if let Some(value) = msg.get(key) {
                parts.push(Self::render_pair(key, value));
            }
        }

        for (key, value) in msg.iter().filter(|(key, _)| !FIXED_KEYS.contains(key)) {
            parts.push(Self::render_pair(key, value));
        }

        Ok(parts.join(" "))
    }

    fn name(&self) -> &str {
        "text"
    }
}

//! Formatter trait for rendering a message into one output line

use super::{error::Result, log_message::LogMessage};

/// Renders a [`LogMessage`] into a single line without a trailing newline.
///
/// Implementations read the message through a shared reference and must not
/// depend on any state mutated between calls.
pub trait Formatter: Send + Sync {
    fn format(&self, msg: &LogMessage) -> Result<String>;
    fn name(&self) -> &str;
}

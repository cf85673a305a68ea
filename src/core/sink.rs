//! Sink trait for log output destinations

use super::error::Result;

/// Byte-oriented destination for formatted lines.
///
/// `write_line` receives one complete line including its terminator. The
/// logger serializes calls per sink, so implementations need no locking of
/// their own.
pub trait Sink: Send {
    fn write_line(&mut self, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

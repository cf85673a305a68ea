//! Process standard output and standard error sinks

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;

/// Writes lines to the process standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StdoutSink {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        std::io::stdout()
            .lock()
            .write_all(line)
            .map_err(|e| LoggerError::io_operation("writing to stdout", "line not written", e))
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

/// Writes lines to the process standard error
#[derive(Debug, Default)]
pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StderrSink {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        std::io::stderr()
            .lock()
            .write_all(line)
            .map_err(|e| LoggerError::io_operation("writing to stderr", "line not written", e))
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stderr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sinks_accept_lines() {
        let mut out = StdoutSink::new();
        let mut err = StderrSink::new();

        assert!(out.write_line(b"time=\"t\" level=\"info\"\n").is_ok());
        assert!(err.write_line(b"time=\"t\" level=\"error\"\n").is_ok());
        assert!(out.flush().is_ok());
        assert!(err.flush().is_ok());
        assert_eq!(out.name(), "stdout");
        assert_eq!(err.name(), "stderr");
    }
}

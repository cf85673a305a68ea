//! Sink over any `std::io::Write` implementation

use crate::core::{LoggerError, Result, Sink};
use std::io::{BufWriter, Write};

/// Buffered sink wrapping an arbitrary writer, such as an open file or a
/// socket the caller manages.
///
/// Buffered data is flushed on [`Sink::flush`] and, best-effort, when the
/// inner `BufWriter` is dropped.
pub struct WriterSink<W: Write + Send> {
    writer: BufWriter<W>,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named("writer", writer)
    }

    pub fn named(name: impl Into<String>, writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            name: name.into(),
        }
    }

    /// Flush and return the wrapped writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| LoggerError::writer(format!("failed to flush writer: {}", e.error())))
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer.write_all(line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

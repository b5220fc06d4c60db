use anyhow::{Context, Result};
use std::io::Write;

/// Writes finished INSERT statements, one per line
pub struct StatementWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> StatementWriter<W> {
    pub fn new(writer: W) -> Self {
        StatementWriter { writer, written: 0 }
    }

    pub fn write_statement(&mut self, statement: &str) -> Result<()> {
        writeln!(self.writer, "{}", statement).context("Failed to write statement")?;
        self.written += 1;
        Ok(())
    }

    /// Number of statements written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

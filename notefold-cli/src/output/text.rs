//! Plain text output formatter

use super::BlockFormatter;
use anyhow::Result;
use notefold_core::OutputBlock;
use std::io::{self, Write};

/// Plain text formatter - one block per line, chapter labels on their
/// own lines
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BlockFormatter for TextFormatter<W> {
    fn format_block(&mut self, block: &OutputBlock) -> Result<()> {
        if let Some(label) = &block.chapter_label {
            writeln!(self.writer, "{label}")?;
        }
        writeln!(self.writer, "{} {}", block.text, block.suffix_label())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

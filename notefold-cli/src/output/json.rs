//! JSON output formatter

use super::BlockFormatter;
use anyhow::Result;
use notefold_core::OutputBlock;
use std::io::Write;

/// JSON formatter - outputs blocks as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    blocks: Vec<OutputBlock>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            blocks: Vec::new(),
        }
    }
}

impl<W: Write> BlockFormatter for JsonFormatter<W> {
    fn format_block(&mut self, block: &OutputBlock) -> Result<()> {
        self.blocks.push(block.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.blocks)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.blocks)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

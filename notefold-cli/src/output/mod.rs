//! Output formatting module

use anyhow::Result;
use notefold_core::OutputBlock;

/// Trait for aggregated block formatters
pub trait BlockFormatter {
    /// Format one output block, in run order
    fn format_block(&mut self, block: &OutputBlock) -> Result<()>;

    /// Finalize output (e.g. close a JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod html;
pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

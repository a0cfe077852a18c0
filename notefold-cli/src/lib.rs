//! Notefold CLI library
//!
//! Command-line plumbing for condensing e-reader notebook exports:
//! file discovery, pre-parse line edits, HTML extraction, and rendering
//! of the aggregated output produced by `notefold-core`.

pub mod commands;
pub mod config;
pub mod edit;
pub mod error;
pub mod extract;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

//! CLI command implementations

use crate::error::CliResult;
use clap::Subcommand;

pub mod process;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Aggregate the annotations of one or more notebook exports
    Process(process::ProcessArgs),
}

impl Commands {
    /// Dispatch to the selected command
    pub fn run(&self) -> CliResult<()> {
        match self {
            Commands::Process(args) => args.execute(),
        }
    }
}

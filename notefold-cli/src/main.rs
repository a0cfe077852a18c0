//! notefold command-line entry point

use clap::Parser;
use notefold_cli::commands::Commands;

/// Condense exported e-reader notebooks by merging closely spaced
/// annotations
#[derive(Debug, Parser)]
#[command(name = "notefold", version, about, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = cli.command.run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_a_process_invocation() {
        let cli = Cli::parse_from(["notefold", "process", "-i", "notebook.html"]);
        let Commands::Process(args) = cli.command;
        assert_eq!(args.input, vec!["notebook.html".to_string()]);
    }
}

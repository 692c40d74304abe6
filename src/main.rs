//! CLI entry point for deterministic avatar generation

use avagen::cli::Cli;
use clap::Parser;

fn main() -> avagen::Result<()> {
    let cli = Cli::parse();
    cli.run()
}

//! DirCheck CLI - data quality checks for a biobank directory.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use logging::{LogConfig, init_logging};

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_flags(cli.verbose, cli.quiet));

    let result = match cli.command {
        Commands::Check {
            directory,
            orpha_mapping,
            config,
            disabled,
            output,
            json,
        } => commands::check::run(directory, orpha_mapping, config, disabled, output, json),

        Commands::Classify { codes, chapter } => commands::classify::run(codes, chapter),

        Commands::ListChecks => commands::list_checks::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

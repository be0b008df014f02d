//! layercfg CLI
//!
//! Inspects how configuration keys resolve through command-line overrides
//! and an aliased sectioned file.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        if let Err(e) = logging::init() {
            eprintln!("{}: failed to initialise logging: {}", "warning".yellow().bold(), e);
        }
        tracing::debug!("Verbose mode enabled");
    }

    let Some(command) = cli.command.clone() else {
        println!("{} layered configuration inspector", "layercfg".green().bold());
        println!();
        println!("Run {} for available commands.", "layercfg --help".cyan());
        return Ok(());
    };

    let config = context::load(&cli)?;
    match command {
        Commands::Dump { json } => commands::run_dump(&config, json),
        Commands::Get { key, as_type } => commands::run_get(&config, &key, as_type),
        Commands::Keys => commands::run_keys(&config),
    }
}

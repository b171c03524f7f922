//! Polychat - multilingual chat client
//!
//! A command line chat client for English, Hindi and Telugu that keeps the
//! offline speech-recognition models it ships with provisioned in a local
//! model directory.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod asset;
mod chat;
mod cli;
mod commands;
mod config;
mod error;
mod hash;
mod language;
mod model;
mod provision;
mod transcript;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Environment variable holding the log filter directives
const LOG_ENV: &str = "POLYCHAT_LOG";

/// Log to stderr; `POLYCHAT_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "polychat=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Provision(args) => commands::provision::run(cli.config, args),
        Commands::Status(args) => commands::status::run(cli.config, args),
        Commands::Chat(args) => commands::chat::run(cli.config, args),
        Commands::Language(args) => commands::language::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

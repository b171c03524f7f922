//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - provision: Provision command arguments
//! - status: Status command arguments
//! - chat: Chat command arguments
//! - language: Language command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod chat;
pub mod completions;
pub mod language;
pub mod provision;
pub mod status;

pub use chat::ChatArgs;
pub use completions::CompletionsArgs;
pub use language::LanguageArgs;
pub use provision::ProvisionArgs;
pub use status::StatusArgs;

/// Polychat - multilingual chat client
///
/// Provision offline speech models and chat with a backend in English, Hindi or Telugu.
#[derive(Parser, Debug)]
#[command(
    name = "polychat",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Multilingual chat client with offline speech model provisioning",
    long_about = "Polychat copies packaged offline speech-recognition models into a local model \
                  directory and chats with a backend in English, Hindi or Telugu.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  polychat provision                 \x1b[90m# Copy packaged models into place\x1b[0m\n   \
                  polychat status                    \x1b[90m# Show local model copies\x1b[0m\n   \
                  polychat language hi               \x1b[90m# Switch to Hindi\x1b[0m\n   \
                  polychat chat                      \x1b[90m# Start chatting\x1b[0m\n   \
                  polychat chat -m \"hello\"           \x1b[90m# Send one message\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to <config-dir>/polychat/polychat.yaml)
    #[arg(long, short = 'c', global = true, env = "POLYCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy packaged speech models into the local model directory
    Provision(ProvisionArgs),

    /// Show local model copies
    Status(StatusArgs),

    /// Chat with the backend
    Chat(ChatArgs),

    /// Show or set the chat language
    Language(LanguageArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

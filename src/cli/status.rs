use clap::Parser;
use std::path::PathBuf;

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show local model copies:\n    polychat status\n\n\
                  Inspect another model root:\n    polychat status --models ./models")]
pub struct StatusArgs {
    /// Local model root to inspect
    #[arg(long, value_name = "DIR")]
    pub models: Option<PathBuf>,
}

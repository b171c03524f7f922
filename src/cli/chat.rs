use clap::Parser;
use std::path::PathBuf;

/// Arguments for the chat command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Start an interactive session:\n    polychat chat\n\n\
                  Send one message in Hindi:\n    polychat chat --language hi --message namaste\n\n\
                  Keep the transcript:\n    polychat chat --save transcript.json")]
pub struct ChatArgs {
    /// Language for this session (en, hi, te); defaults to the saved preference
    #[arg(long, short = 'l', value_name = "CODE")]
    pub language: Option<String>,

    /// Send a single message and exit
    #[arg(long, short = 'm', value_name = "TEXT")]
    pub message: Option<String>,

    /// Local model root used for the readiness check
    #[arg(long, value_name = "DIR")]
    pub models: Option<PathBuf>,

    /// Provision the configured models before chatting
    #[arg(long)]
    pub provision: bool,

    /// Write the transcript as JSON when the session ends
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

use clap::Parser;
use std::path::PathBuf;

/// Arguments for the provision command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Provision every configured model:\n    polychat provision\n\n\
                  Provision only the Hindi model:\n    polychat provision --bundle vosk-model-small-hi-0.22\n\n\
                  Use packaged models from another directory:\n    polychat provision --assets ./assets --models ./models")]
pub struct ProvisionArgs {
    /// Directory of packaged model bundles (defaults to assets_dir from config)
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Local model root to provision into
    #[arg(long, value_name = "DIR")]
    pub models: Option<PathBuf>,

    /// Bundle to provision; repeat for several (defaults to bundles from config)
    #[arg(long = "bundle", short = 'b', value_name = "NAME")]
    pub bundles: Vec<String>,

    /// Do not show progress or the summary
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

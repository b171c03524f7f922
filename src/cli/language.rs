use clap::Parser;

/// Arguments for the language command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the selected language:\n    polychat language\n\n\
                  Switch to Telugu:\n    polychat language te")]
pub struct LanguageArgs {
    /// Language code or name to select (en, hi, te)
    pub code: Option<String>,
}

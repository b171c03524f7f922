use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    polychat completions bash > ~/.bash_completion.d/polychat\n\n\
                  Generate zsh completions:\n    polychat completions zsh > ~/.zfunc/_polychat\n\n\
                  Generate fish completions:\n    polychat completions fish > ~/.config/fish/completions/polychat.fish\n\n\
                  Generate PowerShell completions:\n    polychat completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}

//! Language command implementation
//!
//! Without an argument, shows the selected language and the supported
//! table. With one, validates it and persists it to `prefs.yaml`.

use std::path::Path;

use console::Style;

use crate::cli::LanguageArgs;
use crate::config::{self, Prefs};
use crate::error::Result;
use crate::language::Language;

/// Run language command
pub fn run(args: LanguageArgs) -> Result<()> {
    let data_dir = config::data_dir()?;

    match args.code {
        Some(code) => {
            let language = set_language(&data_dir, &code)?;
            println!("Language set to {language}");
        }
        None => show_languages(Prefs::load(&data_dir)?.language),
    }

    Ok(())
}

/// Parse `code` and persist it as the selected language
fn set_language(data_dir: &Path, code: &str) -> Result<Language> {
    let language: Language = code.parse()?;
    let mut prefs = Prefs::load(data_dir)?;
    prefs.language = language;
    prefs.save(data_dir)?;
    Ok(language)
}

fn show_languages(selected: Language) {
    println!(
        "{} {}",
        Style::new().bold().apply_to("Selected:"),
        selected
    );
    println!();
    for language in Language::ALL {
        let marker = if language == selected { "*" } else { " " };
        println!(
            "{marker} {}  {:<8} {:<6} {:<6} {}",
            Style::new().cyan().apply_to(language.code()),
            language.name(),
            language.recognizer_locale(),
            language.tts_locale(),
            language.model_bundle()
        );
    }
}

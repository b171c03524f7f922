//! Status command implementation
//!
//! Lists every configured bundle with the state of its local copy. The
//! bundle bound to the selected language is marked with `*`.

use std::path::{Path, PathBuf};

use console::Style;

use crate::cli::StatusArgs;
use crate::config::{self, AppConfig, Prefs};
use crate::error::Result;
use crate::hash;
use crate::language::Language;
use crate::model::{self, CopyState, LocalCopyStatus};

/// Run status command
pub fn run(config_path: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let app_config = AppConfig::load(config_path.as_deref())?;
    let models_dir = app_config.models_dir(args.models.as_deref())?;
    let language = Prefs::load(&config::data_dir()?)?.language;

    let statuses = collect_statuses(&models_dir, &app_config.bundles);
    print_statuses(&models_dir, &statuses, language);

    Ok(())
}

fn collect_statuses(models_dir: &Path, bundles: &[String]) -> Vec<LocalCopyStatus> {
    bundles
        .iter()
        .map(|bundle| model::inspect(models_dir, bundle))
        .collect()
}

fn print_statuses(models_dir: &Path, statuses: &[LocalCopyStatus], language: Language) {
    let bold = Style::new().bold();

    println!("{} {}", bold.apply_to("Models:"), models_dir.display());
    println!("{} {}", bold.apply_to("Language:"), language);
    println!();

    if statuses.is_empty() {
        println!("No bundles configured.");
        return;
    }

    let width = statuses.iter().map(|s| s.bundle.len()).max().unwrap_or(0);
    for status in statuses {
        let marker = if status.bundle == language.model_bundle() {
            "*"
        } else {
            " "
        };
        println!("{marker} {:<width$}  {}", status.bundle, describe(status));
    }

    if statuses.iter().any(|s| s.state != CopyState::Ready) {
        println!();
        println!("Run 'polychat provision' to copy missing models.");
    }
}

fn describe(status: &LocalCopyStatus) -> String {
    match status.state {
        CopyState::Ready => format!(
            "{}  {} file{}, {}  {}",
            Style::new().green().apply_to("ready"),
            status.files,
            if status.files == 1 { "" } else { "s" },
            status.formatted_size(),
            status.digest.as_deref().map(hash::short).unwrap_or_default()
        ),
        CopyState::Empty => format!(
            "{}  {}",
            Style::new().yellow().apply_to("empty"),
            status.path.display()
        ),
        CopyState::Missing => Style::new().red().apply_to("missing").to_string(),
        CopyState::Unreadable => format!(
            "{}  {}",
            Style::new().red().apply_to("unreadable"),
            status.problem.as_deref().unwrap_or_default()
        ),
    }
}

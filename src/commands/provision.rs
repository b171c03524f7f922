//! Provision command implementation
//!
//! Copies the configured (or given) model bundles from the packaged assets
//! directory into the local model root. Every bundle is attempted; the
//! command fails afterwards if any of them reported an issue.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::asset::DirAssetSource;
use crate::cli::ProvisionArgs;
use crate::config::AppConfig;
use crate::error::{Result, provision as provision_err};
use crate::provision::Provisioner;
use crate::ui::{InteractiveProvisionReporter, ProvisionSummary, SilentProvisionReporter};

/// Run provision command
pub fn run(config_path: Option<PathBuf>, args: ProvisionArgs) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let assets_dir = config.assets_dir(args.assets.as_deref());
    let models_dir = config.models_dir(args.models.as_deref())?;
    let bundles = if args.bundles.is_empty() {
        config.bundles.clone()
    } else {
        args.bundles
    };

    let summary = provision_bundles(&assets_dir, &models_dir, &bundles, args.quiet);
    if !args.quiet {
        summary.print();
    }

    if summary.is_clean() {
        Ok(())
    } else {
        Err(provision_err::incomplete(summary.issues.len()))
    }
}

/// Provision `bundles` from `assets_dir` into `models_dir`
fn provision_bundles(
    assets_dir: &Path,
    models_dir: &Path,
    bundles: &[String],
    quiet: bool,
) -> ProvisionSummary {
    let source = DirAssetSource::new(assets_dir);
    if !source.root().is_dir() {
        warn!(path = %source.root().display(), "Assets directory does not exist");
    }

    let provisioner = Provisioner::new(&source, models_dir);

    if quiet {
        let mut reporter = SilentProvisionReporter::default();
        provisioner.provision(bundles, &mut reporter);
        reporter.into_summary()
    } else {
        let mut reporter = InteractiveProvisionReporter::new(bundles.len() as u64);
        provisioner.provision(bundles, &mut reporter);
        reporter.into_summary()
    }
}

//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress bars for provisioning passes using indicatif
//! - Printing provisioning issues as they happen
//! - Collecting a per-pass summary for the final report and exit status
//!
//! Reporters implement [`ProvisionObserver`]; commands pick one based on
//! command-line flags (`--quiet` selects the silent one).

use std::path::{Path, PathBuf};

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::provision::{ProvisionIssue, ProvisionObserver};

/// What a provisioning pass did, bundle by bundle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProvisionSummary {
    /// Bundles replaced with a fresh copy: (name, files, path)
    pub ready: Vec<(String, usize, PathBuf)>,
    pub issues: Vec<ProvisionIssue>,
}

impl ProvisionSummary {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Bundles with at least one issue, in first-reported order
    pub fn failed_bundles(&self) -> Vec<&str> {
        let mut failed: Vec<&str> = Vec::new();
        for bundle in self.issues.iter().map(ProvisionIssue::bundle) {
            if !failed.contains(&bundle) {
                failed.push(bundle);
            }
        }
        failed
    }

    /// Print the end-of-pass report to stdout
    pub fn print(&self) {
        let ok = Style::new().green();
        let bad = Style::new().red().bold();

        for (bundle, files, path) in &self.ready {
            println!(
                "{} {} ({} file{}) -> {}",
                ok.apply_to("✓"),
                bundle,
                files,
                if *files == 1 { "" } else { "s" },
                path.display()
            );
        }
        if !self.issues.is_empty() {
            println!(
                "{} {} issue{} during provisioning: {}",
                bad.apply_to("✗"),
                self.issues.len(),
                if self.issues.len() == 1 { "" } else { "s" },
                self.failed_bundles().join(", ")
            );
        }
    }
}

impl ProvisionObserver for ProvisionSummary {
    fn bundle_ready(&mut self, bundle: &str, files: usize, path: &Path) {
        self.ready
            .push((bundle.to_string(), files, path.to_path_buf()));
    }

    fn issue(&mut self, issue: &ProvisionIssue) {
        self.issues.push(issue.clone());
    }
}

/// Interactive reporter with a bundle progress bar
pub struct InteractiveProvisionReporter {
    bundle_pb: ProgressBar,
    files_in_bundle: u64,
    summary: ProvisionSummary,
}

impl InteractiveProvisionReporter {
    pub fn new(total_bundles: u64) -> Self {
        let bundle_style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let bundle_pb = ProgressBar::new(total_bundles);
        bundle_pb.set_style(bundle_style);

        Self {
            bundle_pb,
            files_in_bundle: 0,
            summary: ProvisionSummary::default(),
        }
    }

    pub fn into_summary(self) -> ProvisionSummary {
        self.summary
    }
}

impl ProvisionObserver for InteractiveProvisionReporter {
    fn bundle_started(&mut self, bundle: &str, index: usize, total: usize) {
        self.files_in_bundle = 0;
        // Earlier bundles are done one way or the other
        self.bundle_pb.set_position(index.saturating_sub(1) as u64);
        self.bundle_pb
            .set_message(format!("({index}/{total}) {bundle}"));
    }

    fn file_copied(&mut self, bundle: &str, asset_path: &str, _bytes: u64) {
        self.files_in_bundle += 1;
        // Keep the tail of long paths visible
        let display_path = match asset_path.char_indices().rev().nth(46) {
            Some((cut, _)) => format!("...{}", &asset_path[cut..]),
            None => asset_path.to_string(),
        };
        self.bundle_pb.set_message(format!(
            "{bundle}: {} files {display_path}",
            self.files_in_bundle
        ));
    }

    fn bundle_ready(&mut self, bundle: &str, files: usize, path: &Path) {
        self.summary.bundle_ready(bundle, files, path);
    }

    fn issue(&mut self, issue: &ProvisionIssue) {
        let line = format!("{} {issue}", Style::new().red().bold().apply_to("error:"));
        // A hidden bar (no terminal) swallows println
        if self.bundle_pb.is_hidden() {
            eprintln!("{line}");
        } else {
            self.bundle_pb.println(line);
        }
        self.summary.issue(issue);
    }

    fn finished(&mut self) {
        if let Some(len) = self.bundle_pb.length() {
            self.bundle_pb.set_position(len);
        }
        if self.summary.is_clean() {
            self.bundle_pb.finish_and_clear();
        } else {
            self.bundle_pb.abandon();
        }
    }
}

/// Silent reporter for `--quiet`: collects the summary, prints nothing
#[derive(Debug, Default)]
pub struct SilentProvisionReporter {
    summary: ProvisionSummary,
}

impl SilentProvisionReporter {
    pub fn into_summary(self) -> ProvisionSummary {
        self.summary
    }
}

impl ProvisionObserver for SilentProvisionReporter {
    fn bundle_ready(&mut self, bundle: &str, files: usize, path: &Path) {
        self.summary.bundle_ready(bundle, files, path);
    }

    fn issue(&mut self, issue: &ProvisionIssue) {
        self.summary.issue(issue);
    }
}

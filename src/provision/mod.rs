//! Model provisioning
//!
//! Materializes packaged model bundles from an [`AssetSource`] into a
//! writable local root, one directory per bundle:
//!
//! ```text
//! <local-root>/
//! ├── vosk-model-small-en-us-0.15/
//! │   ├── am/final.mdl
//! │   └── conf/model.conf
//! └── vosk-model-small-hi-0.22/
//!     └── ...
//! ```
//!
//! Every pass rebuilds each local copy from scratch. The bundle is first
//! copied into a staging directory next to its destination
//! (`.staging-<bundle>-XXXX`); only a complete, verified copy replaces the
//! previous one. Nothing here is fatal: problems are reported per bundle as
//! [`ProvisionIssue`]s through a [`ProvisionObserver`] and the pass moves
//! on to the next file or bundle.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::asset::{self, AssetSource, EntryKind};


/// A non-fatal provisioning problem, scoped to one bundle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionIssue {
    #[error("No files found in assets for {bundle}")]
    MissingBundle { bundle: String },

    #[error("Error deleting old model directory {bundle}: {reason}")]
    StaleCopyRemoval {
        bundle: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Error copying file {asset_path}: {reason}")]
    FileCopy {
        bundle: String,
        asset_path: String,
        reason: String,
    },

    #[error("Error verifying copy of {bundle} in {}: {reason}", path.display())]
    Verification {
        bundle: String,
        path: PathBuf,
        reason: String,
    },
}

impl ProvisionIssue {
    /// Bundle the issue belongs to
    pub fn bundle(&self) -> &str {
        match self {
            ProvisionIssue::MissingBundle { bundle }
            | ProvisionIssue::StaleCopyRemoval { bundle, .. }
            | ProvisionIssue::FileCopy { bundle, .. }
            | ProvisionIssue::Verification { bundle, .. } => bundle,
        }
    }
}

/// Receives progress and issues from a provisioning pass
pub trait ProvisionObserver {
    fn bundle_started(&mut self, _bundle: &str, _index: usize, _total: usize) {}

    fn file_copied(&mut self, _bundle: &str, _asset_path: &str, _bytes: u64) {}

    /// The bundle's local copy was replaced with a verified fresh copy
    fn bundle_ready(&mut self, _bundle: &str, _files: usize, _path: &Path) {}

    fn issue(&mut self, issue: &ProvisionIssue);

    fn finished(&mut self) {}
}

/// Copies packaged bundles into the local model root
pub struct Provisioner<'a> {
    source: &'a dyn AssetSource,
    local_root: PathBuf,
}

/// Bookkeeping for one bundle's copy
struct CopyPass<'o> {
    bundle: String,
    copied: usize,
    failed: usize,
    observer: &'o mut dyn ProvisionObserver,
}

impl CopyPass<'_> {
    fn report(&mut self, issue: ProvisionIssue) {
        error!(bundle = %self.bundle, "{issue}");
        if matches!(issue, ProvisionIssue::FileCopy { .. }) {
            self.failed += 1;
        }
        self.observer.issue(&issue);
    }
}

impl<'a> Provisioner<'a> {
    pub fn new(source: &'a dyn AssetSource, local_root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            local_root: local_root.into(),
        }
    }

    /// Destination directory of a bundle's local copy
    pub fn local_copy_path(&self, bundle: &str) -> PathBuf {
        self.local_root.join(bundle)
    }

    /// Provision every bundle in order.
    ///
    /// Never fails; per-bundle problems go to `observer`.
    pub fn provision(&self, bundle_names: &[String], observer: &mut dyn ProvisionObserver) {
        info!(
            bundles = bundle_names.len(),
            root = %self.local_root.display(),
            "Provisioning models"
        );

        for (index, name) in bundle_names.iter().enumerate() {
            observer.bundle_started(name, index + 1, bundle_names.len());
            let mut pass = CopyPass {
                bundle: name.clone(),
                copied: 0,
                failed: 0,
                observer: &mut *observer,
            };
            self.provision_bundle(&mut pass);
        }

        observer.finished();
        info!("Provisioning completed");
    }

    fn provision_bundle(&self, pass: &mut CopyPass<'_>) {
        let name = pass.bundle.clone();

        if !is_valid_bundle_name(&name) {
            pass.report(ProvisionIssue::MissingBundle { bundle: name });
            return;
        }

        let dest = self.local_copy_path(&name);
        let entries = self.source.list_entries(&name);
        if entries.is_empty() {
            // The bundle is gone from the assets, so is any copy of it
            if dest.exists() {
                if let Err(e) = fs::remove_dir_all(&dest) {
                    pass.report(ProvisionIssue::StaleCopyRemoval {
                        bundle: name.clone(),
                        path: dest.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            pass.report(ProvisionIssue::MissingBundle { bundle: name });
            return;
        }
        debug!(
            bundle = %name,
            count = entries.len(),
            "Found entries in assets: {}",
            entries.join(", ")
        );

        let staging = match fs::create_dir_all(&self.local_root).and_then(|()| {
            tempfile::Builder::new()
                .prefix(&format!(".staging-{name}-"))
                .tempdir_in(&self.local_root)
        }) {
            Ok(staging) => staging,
            Err(e) => {
                pass.report(ProvisionIssue::FileCopy {
                    bundle: name.clone(),
                    asset_path: name,
                    reason: format!("cannot create staging directory: {e}"),
                });
                return;
            }
        };

        self.copy_tree(&name, staging.path(), pass);

        if pass.failed > 0 {
            warn!(
                bundle = %name,
                failed = pass.failed,
                "Discarding incomplete copy, previous local copy left in place"
            );
            return;
        }

        if let Err(reason) = verify_copy(staging.path(), pass.copied) {
            pass.report(ProvisionIssue::Verification {
                bundle: name,
                path: dest,
                reason,
            });
            return;
        }

        if dest.exists() {
            if let Err(e) = fs::remove_dir_all(&dest) {
                pass.report(ProvisionIssue::StaleCopyRemoval {
                    bundle: name,
                    path: dest,
                    reason: e.to_string(),
                });
                return;
            }
            debug!(bundle = %name, path = %dest.display(), "Deleted existing directory");
        }

        // The TempDir guard only cleans up if the rename did not happen
        if let Err(e) = fs::rename(staging.path(), &dest) {
            pass.report(ProvisionIssue::FileCopy {
                bundle: name.clone(),
                asset_path: name,
                reason: format!("cannot move staged copy into place: {e}"),
            });
            return;
        }

        info!(
            bundle = %name,
            files = pass.copied,
            path = %dest.display(),
            "Copied model"
        );
        pass.observer.bundle_ready(&name, pass.copied, &dest);
    }

    /// Copy the subtree at `asset_path` into `dest_dir`, in listing order
    fn copy_tree(&self, asset_path: &str, dest_dir: &Path, pass: &mut CopyPass<'_>) {
        for entry in self.source.list_entries(asset_path) {
            let child = asset::join(asset_path, &entry);
            if !is_safe_entry_name(&entry) {
                pass.report(ProvisionIssue::FileCopy {
                    bundle: pass.bundle.clone(),
                    asset_path: child,
                    reason: "unsafe entry name".to_string(),
                });
                continue;
            }
            let target = dest_dir.join(&entry);

            match asset::entry_kind(self.source, &child) {
                EntryKind::Directory => {
                    if let Err(e) = fs::create_dir_all(&target) {
                        pass.report(ProvisionIssue::FileCopy {
                            bundle: pass.bundle.clone(),
                            asset_path: child,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                    self.copy_tree(&child, &target, pass);
                }
                EntryKind::File => match self.copy_file(&child, &target) {
                    Ok(bytes) => {
                        pass.copied += 1;
                        debug!(
                            bundle = %pass.bundle,
                            "Copied {child} to {}, {bytes} bytes",
                            target.display()
                        );
                        pass.observer.file_copied(&pass.bundle, &child, bytes);
                    }
                    Err(e) => {
                        pass.report(ProvisionIssue::FileCopy {
                            bundle: pass.bundle.clone(),
                            asset_path: child,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }
    }

    fn copy_file(&self, asset_path: &str, target: &Path) -> io::Result<u64> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut input = self.source.open(asset_path)?;
        let mut output = File::create(target)?;
        io::copy(&mut input, &mut output)
    }
}

/// Bundle names are single path segments under the local root
fn is_valid_bundle_name(name: &str) -> bool {
    is_safe_entry_name(name)
}

fn is_safe_entry_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Check a staged copy is non-empty and holds every file that was copied
fn verify_copy(staged: &Path, copied: usize) -> Result<(), String> {
    let top_level = fs::read_dir(staged)
        .map(Iterator::count)
        .map_err(|e| e.to_string())?;
    if top_level == 0 {
        return Err("no files found after copying".to_string());
    }

    let on_disk = WalkDir::new(staged)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count();
    if on_disk != copied {
        return Err(format!("expected {copied} files, found {on_disk}"));
    }

    Ok(())
}

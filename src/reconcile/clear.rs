//! Remove every symlink below a genre root, leaving everything else alone.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// A symlink that could not be removed.
#[derive(Debug, Clone, Serialize)]
pub struct RemovalFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of clearing one genre root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClearReport {
    pub root: PathBuf,
    /// `false` when the root did not exist and nothing was walked.
    pub existed: bool,
    pub found: usize,
    pub removed: usize,
    /// Removed symlinks per folder, relative to the root (`root` for the root itself).
    pub per_folder: BTreeMap<String, usize>,
    pub failures: Vec<RemovalFailure>,
}

/// Walk `root` without following links and unlink every symlink found.
///
/// Regular files and directories are never touched. A missing root is a no-op.
pub fn clear_symlinks(root: &Path) -> ClearReport {
    let mut report = ClearReport {
        root: root.to_path_buf(),
        ..ClearReport::default()
    };

    if !root.is_dir() {
        info!(root = %root.display(), "Genre root does not exist, nothing to clear");
        return report;
    }
    report.existed = true;

    // Collect first so removals never race the directory iterator.
    let mut links = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).min_depth(1) {
        match entry {
            Ok(entry) if entry.path_is_symlink() => links.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => warn!(root = %root.display(), "Error walking genre root: {}", e),
        }
    }
    report.found = links.len();

    for link in links {
        match std::fs::read_link(&link) {
            Ok(target) => debug!("Removing: {} -> {}", link.display(), target.display()),
            Err(_) => debug!("Removing broken symlink: {}", link.display()),
        }
        match remove_symlink(&link) {
            Ok(()) => {
                report.removed += 1;
                *report.per_folder.entry(folder_label(root, &link)).or_default() += 1;
            }
            Err(e) => {
                error!("Error removing {}: {}", link.display(), e);
                report.failures.push(RemovalFailure {
                    path: link,
                    reason: e.to_string(),
                });
            }
        }
    }

    for (folder, count) in &report.per_folder {
        debug!("Genre '{}': removed {} symlinks", folder, count);
    }
    info!(
        root = %root.display(),
        found = report.found,
        removed = report.removed,
        "Cleared genre symlinks"
    );
    report
}

fn folder_label(root: &Path, link: &Path) -> String {
    match link.parent().and_then(|p| p.strip_prefix(root).ok()) {
        Some(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => "root".to_string(),
    }
}

/// Unlink a symlink. Directory symlinks on Windows need `remove_dir`.
pub(crate) fn remove_symlink(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if cfg!(windows) => std::fs::remove_dir(path).map_err(|_| err),
        Err(err) => Err(err),
    }
}

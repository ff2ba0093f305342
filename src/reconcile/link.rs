//! Symlink creation inside genre folders.

use super::clear::remove_symlink;
use super::folders::GenreFolder;
use super::paths::relative_path;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// What happened when linking one entry into one genre folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// New symlink created.
    Linked,
    /// An existing symlink with the same name was removed and recreated.
    Replaced,
    /// A regular file or directory already uses the name; left untouched.
    ConflictSkipped,
    /// The genre folder does not exist on the host.
    MissingGenreFolder,
    /// Filesystem error while removing or creating the symlink.
    Failed(String),
}

impl LinkOutcome {
    /// True when a symlink now exists for the entry.
    pub fn is_linked(&self) -> bool {
        matches!(self, LinkOutcome::Linked | LinkOutcome::Replaced)
    }
}

/// One symlink attempt: `<genre folder>/<link name> -> <target>`.
#[derive(Debug, Clone, Serialize)]
pub struct GenreLink {
    pub genre: String,
    pub link_name: String,
    /// Link target relative to the genre folder in the container namespace.
    pub target: PathBuf,
    pub outcome: LinkOutcome,
}

/// Link `link_name` inside `folder` to `container_target`.
///
/// The stored target is relative to the folder's container path, so the link
/// resolves for the media server even when this host mounts the library elsewhere.
pub fn link_into_genre(folder: &GenreFolder, link_name: &str, container_target: &Path) -> GenreLink {
    let target = relative_path(container_target, &folder.path.container);
    let outcome = if folder.exists() {
        place_symlink(&folder.path.host.join(link_name), &target)
    } else {
        LinkOutcome::MissingGenreFolder
    };
    GenreLink {
        genre: folder.genre.clone(),
        link_name: link_name.to_string(),
        target,
        outcome,
    }
}

fn place_symlink(link_path: &Path, target: &Path) -> LinkOutcome {
    let replaced = match std::fs::symlink_metadata(link_path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if let Err(e) = remove_symlink(link_path) {
                return LinkOutcome::Failed(format!("failed to remove existing symlink: {}", e));
            }
            true
        }
        Ok(_) => return LinkOutcome::ConflictSkipped,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return LinkOutcome::Failed(e.to_string()),
    };

    match create_symlink(target, link_path) {
        Ok(()) if replaced => LinkOutcome::Replaced,
        Ok(()) => LinkOutcome::Linked,
        Err(e) => LinkOutcome::Failed(e.to_string()),
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

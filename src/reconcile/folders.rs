//! Genre folder naming and creation.

use crate::catalog::Catalog;
use crate::config::PathMapping;
use crate::error::LinkerError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, error, info};

static ILLEGAL_FOLDER_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("folder character regex is valid"));

/// Folder-safe genre name: illegal characters become `_`, surrounding whitespace is trimmed.
///
/// Names made only of dots (`.`, `..`) become underscores so a folder never
/// resolves outside the genre root.
pub fn sanitize_genre(genre: &str) -> String {
    let clean = ILLEGAL_FOLDER_CHARS.replace_all(genre, "_");
    let clean = clean.trim();
    if !clean.is_empty() && clean.chars().all(|c| c == '.') {
        return "_".repeat(clean.len());
    }
    clean.to_string()
}

/// A genre directory on both sides of the path mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreFolder {
    /// Sanitized genre name, also the folder and library name.
    pub genre: String,
    pub path: PathMapping,
}

impl GenreFolder {
    pub fn new(genres_root: &PathMapping, raw_genre: &str) -> Option<Self> {
        let genre = sanitize_genre(raw_genre);
        if genre.is_empty() {
            return None;
        }
        Some(Self {
            path: genres_root.join(&genre),
            genre,
        })
    }

    pub fn exists(&self) -> bool {
        self.path.host.is_dir()
    }
}

/// Distinct genre folders implied by the catalog, sorted by name.
pub fn catalog_genre_folders(catalog: &Catalog, genres_root: &PathMapping) -> Vec<GenreFolder> {
    let names: BTreeSet<String> = catalog
        .genres()
        .into_iter()
        .map(sanitize_genre)
        .filter(|genre| !genre.is_empty())
        .collect();
    names
        .into_iter()
        .map(|genre| GenreFolder {
            path: genres_root.join(&genre),
            genre,
        })
        .collect()
}

/// Outcome of [`ensure_genre_folders`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderReport {
    /// Distinct sanitized genres in the catalog.
    pub genres: usize,
    pub created: Vec<String>,
    pub failed: Vec<String>,
}

/// Create the genre root and a folder for every catalog genre that lacks one.
///
/// Existing folders are left as they are; folders for genres no longer in the
/// catalog are never removed.
pub fn ensure_genre_folders(
    genres_root: &PathMapping,
    catalog: &Catalog,
) -> Result<FolderReport, LinkerError> {
    std::fs::create_dir_all(&genres_root.host).map_err(|e| {
        LinkerError::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to create genre root {}: {}",
                genres_root.host.display(),
                e
            ),
        ))
    })?;

    let folders = catalog_genre_folders(catalog, genres_root);
    let mut report = FolderReport {
        genres: folders.len(),
        ..FolderReport::default()
    };

    for folder in folders {
        if folder.exists() {
            continue;
        }
        match std::fs::create_dir_all(&folder.path.host) {
            Ok(()) => {
                debug!("Created genre folder: {}", folder.genre);
                report.created.push(folder.genre);
            }
            Err(e) => {
                error!("Failed to create genre folder {}: {}", folder.path.host.display(), e);
                report.failed.push(folder.genre);
            }
        }
    }

    info!(
        root = %genres_root.host.display(),
        genres = report.genres,
        created = report.created.len(),
        "Genre folders ready"
    );
    Ok(report)
}

//! Symlink reconciliation: clearing, genre folders, and per-title links.
//!
//! Every symlink under the genre root belongs to this tool and may be removed or
//! recreated. Anything that is not a symlink belongs to someone else and is only
//! ever reported, never modified.

pub mod clear;
pub mod folders;
pub mod link;
pub mod paths;

pub use clear::{clear_symlinks, ClearReport};
pub use folders::{ensure_genre_folders, sanitize_genre, FolderReport, GenreFolder};
pub use link::{link_into_genre, GenreLink, LinkOutcome};

use crate::catalog::{Catalog, ItemType};
use crate::config::PathMapping;
use crate::matcher::{LocalEntry, MatchPolicy, TitleMatcher};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Immediate subdirectories of a media root, sorted by name.
///
/// Hidden entries and plain files are skipped; directory symlinks count as titles.
pub fn scan_media_root(root: &Path) -> std::io::Result<Vec<LocalEntry>> {
    let base = dunce::canonicalize(root)?;
    let mut entries = Vec::new();
    for dir_entry in std::fs::read_dir(&base)? {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", base.display(), e);
                continue;
            }
        };
        let path = dir_entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = match dir_entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("Skipping non UTF-8 folder name: {:?}", raw);
                continue;
            }
        };
        if name.starts_with('.') {
            continue;
        }
        entries.push(LocalEntry::new(name, path));
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Catalog item a local folder was matched to.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedTitle {
    pub name: String,
    pub year: Option<i32>,
    pub score: f64,
    /// Genres considered for linking, after the per-item cap.
    pub genres: Vec<String>,
}

/// Per-folder result of a media root pass.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub name: String,
    /// `None` when no catalog item cleared the match threshold.
    pub matched: Option<MatchedTitle>,
    pub links: Vec<GenreLink>,
}

impl EntryReport {
    pub fn has_links(&self) -> bool {
        self.links.iter().any(|link| link.outcome.is_linked())
    }
}

/// Result of linking every title under one media root.
#[derive(Debug, Clone, Serialize)]
pub struct MediaRootReport {
    pub item_type: ItemType,
    pub root: PathBuf,
    /// `false` when the root was missing or unreadable and nothing was processed.
    pub scanned: bool,
    pub entries: Vec<EntryReport>,
}

impl MediaRootReport {
    pub fn processed(&self) -> usize {
        self.entries.len()
    }

    /// Entries with at least one symlink in place.
    pub fn linked_items(&self) -> usize {
        self.entries.iter().filter(|e| e.has_links()).count()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| e.matched.is_none())
    }

    /// Links with the given outcome across all entries.
    pub fn count_outcome(&self, predicate: impl Fn(&LinkOutcome) -> bool) -> usize {
        self.entries
            .iter()
            .flat_map(|e| e.links.iter())
            .filter(|link| predicate(&link.outcome))
            .count()
    }
}

/// Match every folder under `media_root` and link it into its genre folders.
pub fn link_media_root(
    media_root: &PathMapping,
    genres_root: &PathMapping,
    catalog: &Catalog,
    item_type: ItemType,
    policy: &MatchPolicy,
) -> MediaRootReport {
    let mut report = MediaRootReport {
        item_type,
        root: media_root.host.clone(),
        scanned: false,
        entries: Vec::new(),
    };

    let entries = match scan_media_root(&media_root.host) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "Path {} is not readable ({}), skipping {}",
                media_root.host.display(),
                e,
                item_type.label()
            );
            return report;
        }
    };
    report.scanned = true;

    let matcher = TitleMatcher::new(catalog, item_type, policy);
    info!(
        root = %media_root.host.display(),
        folders = entries.len(),
        candidates = matcher.candidate_count(),
        "Processing {}",
        item_type.label()
    );

    for entry in entries {
        let Some(found) = matcher.best_match(&entry) else {
            warn!("No matching {} found for {}", item_type, entry.name);
            report.entries.push(EntryReport {
                name: entry.name,
                matched: None,
                links: Vec::new(),
            });
            continue;
        };

        let genres: Vec<String> = found
            .item
            .genres
            .iter()
            .take(policy.max_genres)
            .cloned()
            .collect();
        debug!(
            "{} -> {} ({}) score {:.1}, genres: {}",
            entry.name,
            found.item.name,
            found
                .item
                .production_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            found.score,
            genres.join(", ")
        );
        if genres.is_empty() {
            warn!("No genres found for {}", found.item.name);
        }

        let container_target = media_root.container.join(&entry.name);
        let mut links = Vec::new();
        for genre in &genres {
            let Some(folder) = GenreFolder::new(genres_root, genre) else {
                continue;
            };
            let link = link_into_genre(&folder, &entry.name, &container_target);
            log_link(&link);
            links.push(link);
        }

        report.entries.push(EntryReport {
            name: entry.name,
            matched: Some(MatchedTitle {
                name: found.item.name.clone(),
                year: found.item.production_year,
                score: found.score,
                genres,
            }),
            links,
        });
    }

    info!(
        root = %media_root.host.display(),
        processed = report.processed(),
        linked = report.linked_items(),
        "{} pass complete",
        item_type.label()
    );
    report
}

fn log_link(link: &GenreLink) {
    match &link.outcome {
        LinkOutcome::Linked | LinkOutcome::Replaced => {
            debug!("Linked {} into {}", link.link_name, link.genre)
        }
        LinkOutcome::ConflictSkipped => warn!(
            "Skipping {} in {}: a regular file or directory already exists",
            link.link_name, link.genre
        ),
        LinkOutcome::MissingGenreFolder => warn!(
            "Genre folder {} doesn't exist, skipping {}",
            link.genre, link.link_name
        ),
        LinkOutcome::Failed(reason) => tracing::error!(
            "Error creating symlink {} in {}: {}",
            link.link_name,
            link.genre,
            reason
        ),
    }
}

//! The `create` and `clear` runs.
//!
//! `create` fetches the catalog before touching the filesystem, so an empty or
//! unreachable catalog leaves existing genre links in place.

use crate::config::{LinkerConfig, PathMapping};
use crate::catalog::ItemType;
use crate::error::LinkerError;
use crate::library::{LibraryManager, LibraryReport};
use crate::reconcile::{
    clear_symlinks, ensure_genre_folders, link_media_root, ClearReport, FolderReport,
    MediaRootReport,
};
use crate::server::{fetch_catalog, MediaServer};
use serde::Serialize;
use tracing::info;

/// Everything a `create` run did, for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// RFC 3339 start time.
    pub started_at: String,
    pub catalog_items: usize,
    pub clear: ClearReport,
    pub folders: FolderReport,
    pub media: Vec<MediaRootReport>,
    /// `None` when library management was skipped.
    pub libraries: Option<LibraryReport>,
}

impl RunSummary {
    /// Titles with at least one genre link, over all media roots.
    pub fn linked_items(&self) -> usize {
        self.media.iter().map(MediaRootReport::linked_items).sum()
    }
}

/// Full reconciliation: fetch, clear, ensure folders, link, manage libraries.
pub async fn run_create(
    config: &LinkerConfig,
    server: &dyn MediaServer,
    manage_libraries: bool,
) -> Result<RunSummary, LinkerError> {
    let started_at = chrono::Utc::now().to_rfc3339();

    let catalog = fetch_catalog(server, config.include_shows).await?;
    info!(
        movies = catalog.count_of(ItemType::Movie),
        series = catalog.count_of(ItemType::Series),
        "Catalog fetched"
    );

    let clear = clear_symlinks(&config.genres.host);
    let folders = ensure_genre_folders(&config.genres, &catalog)?;

    let mut media = vec![link_media_root(
        &config.movies,
        &config.genres,
        &catalog,
        ItemType::Movie,
        &config.matching,
    )];
    match (&config.shows, config.include_shows) {
        (Some(shows), true) => media.push(link_media_root(
            shows,
            &config.genres,
            &catalog,
            ItemType::Series,
            &config.matching,
        )),
        (None, true) => info!("No shows directory configured, skipping TV shows"),
        (_, false) => info!("TV shows disabled"),
    }

    let libraries = if manage_libraries {
        Some(
            LibraryManager::new(server, &config.genres, config.collection_type())
                .sync(&catalog)
                .await,
        )
    } else {
        info!("Skipping library management");
        None
    };

    let summary = RunSummary {
        started_at,
        catalog_items: catalog.len(),
        clear,
        folders,
        media,
        libraries,
    };
    info!(
        linked = summary.linked_items(),
        removed = summary.clear.removed,
        "Genre linking complete"
    );
    Ok(summary)
}

/// Remove every symlink under the genre root.
pub fn run_clear(genres: &PathMapping) -> ClearReport {
    clear_symlinks(&genres.host)
}

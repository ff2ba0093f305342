//! Virtual library registration for genre folders.
//!
//! Every call here is best effort: failures are logged and recorded in the
//! [`LibraryReport`], and the run carries on.

use crate::catalog::Catalog;
use crate::config::PathMapping;
use crate::reconcile::folders::catalog_genre_folders;
use crate::server::{MediaServer, VirtualLibrary};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// What happened to one genre's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum LibraryOutcome {
    Created,
    /// Existing library already listed the path; its entry was updated.
    Updated,
    /// Existing library did not list the path; it was added.
    PathAdded,
    /// No genre folder on the host, nothing registered.
    MissingFolder,
    RemoteFailure(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct LibraryResult {
    pub library: String,
    pub path: String,
    pub outcome: LibraryOutcome,
}

/// Result of one library management pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LibraryReport {
    pub collection_type: String,
    pub existing: usize,
    pub results: Vec<LibraryResult>,
    pub refreshed: bool,
    /// Error from listing existing libraries, if that call failed.
    pub list_error: Option<String>,
}

impl LibraryReport {
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, LibraryOutcome::Created))
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, LibraryOutcome::Updated | LibraryOutcome::PathAdded))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, LibraryOutcome::RemoteFailure(_)))
    }

    fn count(&self, predicate: impl Fn(&LibraryOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Mirrors genre folders as virtual libraries on the media server.
pub struct LibraryManager<'a> {
    server: &'a dyn MediaServer,
    genres_root: &'a PathMapping,
    collection_type: &'a str,
}

impl<'a> LibraryManager<'a> {
    pub fn new(
        server: &'a dyn MediaServer,
        genres_root: &'a PathMapping,
        collection_type: &'a str,
    ) -> Self {
        Self {
            server,
            genres_root,
            collection_type,
        }
    }

    /// Create or update one library per catalog genre that has a folder, then
    /// request a library refresh.
    pub async fn sync(&self, catalog: &Catalog) -> LibraryReport {
        let mut report = LibraryReport {
            collection_type: self.collection_type.to_string(),
            ..LibraryReport::default()
        };

        let existing: HashMap<String, VirtualLibrary> = match self.server.list_libraries().await {
            Ok(libraries) => libraries
                .into_iter()
                .map(|lib| (lib.name.clone(), lib))
                .collect(),
            Err(e) => {
                warn!("Failed to get libraries: {}", e);
                report.list_error = Some(e.to_string());
                HashMap::new()
            }
        };
        report.existing = existing.len();
        info!(
            collection_type = self.collection_type,
            existing = report.existing,
            "Managing genre libraries"
        );

        for folder in catalog_genre_folders(catalog, self.genres_root) {
            let path = folder.path.container.to_string_lossy().into_owned();
            let outcome = if !folder.exists() {
                debug!("Skipping {} - no genre folder exists", folder.genre);
                LibraryOutcome::MissingFolder
            } else {
                self.register(&folder.genre, &path, existing.get(&folder.genre))
                    .await
            };
            report.results.push(LibraryResult {
                library: folder.genre,
                path,
                outcome,
            });
        }

        report.refreshed = match self.server.refresh_libraries().await {
            Ok(()) => {
                info!("Library refresh initiated");
                true
            }
            Err(e) => {
                warn!("Failed to refresh libraries: {}", e);
                false
            }
        };

        info!(
            created = report.created(),
            updated = report.updated(),
            failed = report.failed(),
            "Library management complete"
        );
        report
    }

    async fn register(
        &self,
        name: &str,
        path: &str,
        existing: Option<&VirtualLibrary>,
    ) -> LibraryOutcome {
        let (result, success) = match existing {
            Some(library) if library.locations.iter().any(|loc| loc == path) => (
                self.server.update_library_path(name, path).await,
                LibraryOutcome::Updated,
            ),
            Some(_) => (
                self.server.add_library_path(name, path).await,
                LibraryOutcome::PathAdded,
            ),
            None => (
                self.server
                    .create_library(name, self.collection_type, &[path.to_string()])
                    .await,
                LibraryOutcome::Created,
            ),
        };
        match result {
            Ok(()) => {
                debug!("Library {}: {:?} ({})", name, success, path);
                success
            }
            Err(e) => {
                warn!("Library {} failed: {}", name, e);
                LibraryOutcome::RemoteFailure(e.to_string())
            }
        }
    }
}

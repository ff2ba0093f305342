//! Shared fixtures: an in-memory media server and a temporary media layout.

use async_trait::async_trait;
use genre_linker::catalog::{CatalogItem, ItemType};
use genre_linker::config::{LinkerConfig, PathMapping, ServerSettings};
use genre_linker::error::LinkerError;
use genre_linker::matcher::MatchPolicy;
use genre_linker::server::{MediaServer, VirtualLibrary};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub fn movie(id: &str, name: &str, year: Option<i32>, genres: &[&str]) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        item_type: ItemType::Movie,
        production_year: year,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        path: None,
    }
}

pub fn series(id: &str, name: &str, year: Option<i32>, genres: &[&str]) -> CatalogItem {
    CatalogItem {
        item_type: ItemType::Series,
        ..movie(id, name, year, genres)
    }
}

/// Media server backed by a fixed item list; records library calls.
#[derive(Default)]
pub struct FakeServer {
    pub items: Vec<CatalogItem>,
    pub libraries: Vec<VirtualLibrary>,
    calls: Mutex<Vec<String>>,
}

impl FakeServer {
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_libraries(libraries: Vec<VirtualLibrary>) -> Self {
        Self {
            libraries,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MediaServer for FakeServer {
    async fn fetch_items(&self, item_type: ItemType) -> Result<Vec<CatalogItem>, LinkerError> {
        self.record(format!("fetch {}", item_type));
        Ok(self
            .items
            .iter()
            .filter(|i| i.item_type == item_type)
            .cloned()
            .collect())
    }

    async fn list_libraries(&self) -> Result<Vec<VirtualLibrary>, LinkerError> {
        Ok(self.libraries.clone())
    }

    async fn create_library(
        &self,
        name: &str,
        collection_type: &str,
        paths: &[String],
    ) -> Result<(), LinkerError> {
        self.record(format!("create {} {} {}", name, collection_type, paths.join(",")));
        Ok(())
    }

    async fn update_library_path(&self, name: &str, path: &str) -> Result<(), LinkerError> {
        self.record(format!("update {} {}", name, path));
        Ok(())
    }

    async fn add_library_path(&self, name: &str, path: &str) -> Result<(), LinkerError> {
        self.record(format!("add {} {}", name, path));
        Ok(())
    }

    async fn refresh_libraries(&self) -> Result<(), LinkerError> {
        self.record("refresh".to_string());
        Ok(())
    }
}

/// Temporary `Movies`, `Shows` and `Genres` roots under one directory.
pub struct MediaLayout {
    pub dir: TempDir,
}

impl MediaLayout {
    pub fn new() -> Self {
        let layout = Self {
            dir: TempDir::new().unwrap(),
        };
        std::fs::create_dir_all(layout.movies()).unwrap();
        std::fs::create_dir_all(layout.shows()).unwrap();
        layout
    }

    pub fn movies(&self) -> PathBuf {
        self.dir.path().join("Movies")
    }

    pub fn shows(&self) -> PathBuf {
        self.dir.path().join("Shows")
    }

    pub fn genres(&self) -> PathBuf {
        self.dir.path().join("Genres")
    }

    pub fn add_movie_folder(&self, name: &str) {
        std::fs::create_dir_all(self.movies().join(name)).unwrap();
    }

    pub fn add_show_folder(&self, name: &str) {
        std::fs::create_dir_all(self.shows().join(name)).unwrap();
    }

    /// Movies only, host and container paths identical.
    pub fn config(&self) -> LinkerConfig {
        LinkerConfig {
            server: ServerSettings {
                url: "http://localhost:8096".to_string(),
                username: "admin".to_string(),
                password: "secret".to_string(),
                request_timeout: None,
            },
            movies: PathMapping::identity(self.movies()),
            shows: None,
            genres: PathMapping::identity(self.genres()),
            include_shows: false,
            matching: MatchPolicy::default(),
        }
    }

    pub fn config_with_shows(&self) -> LinkerConfig {
        LinkerConfig {
            shows: Some(PathMapping::identity(self.shows())),
            include_shows: true,
            ..self.config()
        }
    }
}

/// Every symlink under `root` with its stored target, sorted by path.
pub fn symlink_set(root: &Path) -> Vec<(PathBuf, PathBuf)> {
    let mut links: Vec<(PathBuf, PathBuf)> = walkdir::WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path_is_symlink())
        .map(|e| {
            let target = std::fs::read_link(e.path()).unwrap();
            (e.path().strip_prefix(root).unwrap().to_path_buf(), target)
        })
        .collect();
    links.sort();
    links
}

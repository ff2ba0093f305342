use crate::catalog::{CatalogItem, ItemType};
use crate::error::LinkerError;
use crate::server::models::VirtualLibrary;
use async_trait::async_trait;

/// Operations the reconciler needs from an authenticated media server session.
#[async_trait]
pub trait MediaServer: Send + Sync {
    /// Every item of `item_type` visible to the session user, with genres, year and path.
    async fn fetch_items(&self, item_type: ItemType) -> Result<Vec<CatalogItem>, LinkerError>;

    async fn list_libraries(&self) -> Result<Vec<VirtualLibrary>, LinkerError>;

    async fn create_library(
        &self,
        name: &str,
        collection_type: &str,
        paths: &[String],
    ) -> Result<(), LinkerError>;

    /// Update an existing path entry of library `name`.
    async fn update_library_path(&self, name: &str, path: &str) -> Result<(), LinkerError>;

    /// Add a new path entry to library `name`.
    async fn add_library_path(&self, name: &str, path: &str) -> Result<(), LinkerError>;

    /// Ask the server to rescan all libraries.
    async fn refresh_libraries(&self) -> Result<(), LinkerError>;
}

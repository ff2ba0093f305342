//! Media server access: the [`MediaServer`] seam and its Jellyfin implementation.

pub mod contract;
pub mod jellyfin;
pub mod models;

pub use contract::MediaServer;
pub use jellyfin::JellyfinClient;
pub use models::VirtualLibrary;

use crate::catalog::{Catalog, ItemType};
use crate::error::LinkerError;
use tracing::{info, warn};

/// Fetch the catalog snapshot for a run.
///
/// Series are only requested when `include_shows` is set. A failed fetch for one
/// type is logged and treated as empty; an empty catalog overall is fatal.
pub async fn fetch_catalog(
    server: &dyn MediaServer,
    include_shows: bool,
) -> Result<Catalog, LinkerError> {
    let mut types = vec![ItemType::Movie];
    if include_shows {
        types.push(ItemType::Series);
    }

    let mut items = Vec::new();
    for item_type in types {
        match server.fetch_items(item_type).await {
            Ok(batch) => {
                info!("Found {} {} in the media server", batch.len(), item_type.label());
                items.extend(batch);
            }
            Err(e) => warn!("Failed to fetch {}: {}", item_type.label(), e),
        }
    }

    if items.is_empty() {
        return Err(LinkerError::EmptyCatalog);
    }
    Ok(Catalog::new(items))
}

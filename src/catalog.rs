//! Catalog snapshot of movies and series fetched from the media server.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of catalog item the matcher can look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Movie,
    Series,
}

impl ItemType {
    /// Value used for the server's `IncludeItemTypes` filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Movie => "Movie",
            ItemType::Series => "Series",
        }
    }

    /// Human label for log lines and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Movie => "movies",
            ItemType::Series => "TV shows",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One movie or series record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub production_year: Option<i32>,
    /// Genres in the order the server reports them.
    pub genres: Vec<String>,
    pub path: Option<String>,
}

/// Immutable snapshot of the server catalog for one run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_of(&self, item_type: ItemType) -> usize {
        self.items
            .iter()
            .filter(|item| item.item_type == item_type)
            .count()
    }

    /// Distinct raw genre names, skipping blanks. Sorted for stable processing order.
    pub fn genres(&self) -> BTreeSet<&str> {
        self.items
            .iter()
            .flat_map(|item| item.genres.iter())
            .map(String::as_str)
            .filter(|genre| !genre.trim().is_empty())
            .collect()
    }
}

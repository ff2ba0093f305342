//! Jellyfin wire types.

use crate::catalog::{CatalogItem, ItemType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthenticateByName<'a> {
    pub username: &'a str,
    pub pw: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthenticationResult {
    pub access_token: String,
    pub user: UserDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct UserDto {
    pub id: String,
}

/// One page of `/Users/{id}/Items`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ItemsPage {
    #[serde(default)]
    pub items: Option<Vec<BaseItemDto>>,
    #[serde(default)]
    pub total_record_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct BaseItemDto {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "Type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub production_year: Option<i32>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub path: Option<String>,
}

impl BaseItemDto {
    /// Convert to a catalog item; items of other types or without a name are dropped.
    pub fn into_catalog_item(self) -> Option<CatalogItem> {
        let item_type = match self.item_type.as_deref() {
            Some("Movie") => ItemType::Movie,
            Some("Series") => ItemType::Series,
            _ => return None,
        };
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        Some(CatalogItem {
            id: self.id,
            name,
            item_type,
            production_year: self.production_year,
            genres: self.genres.unwrap_or_default(),
            path: self.path,
        })
    }
}

/// A virtual library as listed by `/Library/VirtualFolders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualLibrary {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations: Vec<String>,
    #[serde(default)]
    pub collection_type: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MediaPathRequest<'a> {
    pub name: &'a str,
    pub path_info: MediaPathInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MediaPathInfo<'a> {
    pub path: &'a str,
}

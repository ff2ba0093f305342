//! Jellyfin HTTP client.

use crate::catalog::{CatalogItem, ItemType};
use crate::config::ServerSettings;
use crate::error::LinkerError;
use crate::server::contract::MediaServer;
use crate::server::models::{
    AuthenticateByName, AuthenticationResult, BaseItemDto, ItemsPage, MediaPathInfo,
    MediaPathRequest, VirtualLibrary,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode};
use tracing::debug;

const CLIENT_NAME: &str = "GenreLinker";
const DEVICE_NAME: &str = "genre-linker";
const DEVICE_ID: &str = "genre-linker-cli";
const TOKEN_HEADER: &str = "X-Emby-Token";
const AUTHORIZATION_HEADER: &str = "X-Emby-Authorization";
const ITEM_FIELDS: &str = "Genres,ProductionYear,Path";
const PAGE_SIZE: usize = 1000;

/// `X-Emby-Authorization` value identifying this client.
pub fn authorization_header() -> String {
    format!(
        r#"MediaBrowser Client="{}", Device="{}", DeviceId="{}", Version="{}""#,
        CLIENT_NAME,
        DEVICE_NAME,
        DEVICE_ID,
        env!("CARGO_PKG_VERSION")
    )
}

/// Authenticated Jellyfin session.
pub struct JellyfinClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    user_id: String,
}

impl JellyfinClient {
    /// Log in with user name and password.
    ///
    /// Transport errors and rejected credentials both surface as
    /// [`LinkerError::Authentication`].
    pub async fn authenticate(settings: &ServerSettings) -> Result<Self, LinkerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            LinkerError::Authentication(format!("Failed to build HTTP client: {}", e))
        })?;

        let url = format!("{}/Users/AuthenticateByName", settings.url);
        let response = http
            .post(&url)
            .header(AUTHORIZATION_HEADER, authorization_header())
            .header(ACCEPT, "application/json")
            .json(&AuthenticateByName {
                username: &settings.username,
                pw: &settings.password,
            })
            .send()
            .await
            .map_err(|e| {
                LinkerError::Authentication(format!("Cannot reach {}: {}", settings.url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LinkerError::Authentication(format!(
                "Login rejected: {} {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let auth: AuthenticationResult = response.json().await.map_err(|e| {
            LinkerError::Authentication(format!("Unexpected login response: {}", e))
        })?;
        if auth.access_token.is_empty() {
            return Err(LinkerError::Authentication(
                "Server returned an empty access token".to_string(),
            ));
        }

        debug!(user_id = %auth.user.id, "Authenticated with Jellyfin");
        Ok(Self {
            http,
            base_url: settings.url.clone(),
            token: auth.access_token,
            user_id: auth.user.id,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .header(TOKEN_HEADER, &self.token)
            .header(ACCEPT, "application/json")
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.url(path))
            .header(TOKEN_HEADER, &self.token)
            .header(ACCEPT, "application/json")
    }

    /// Accept 200 and 204; anything else becomes a remote error with the body attached.
    async fn expect_ok(response: Response, action: &str) -> Result<Response, LinkerError> {
        let status = response.status();
        if is_success(status) {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(LinkerError::Remote(format!(
            "{} failed with status {}{}",
            action,
            status.as_u16(),
            if body.trim().is_empty() {
                String::new()
            } else {
                format!(": {}", body.trim())
            }
        )))
    }

    fn items_request(&self, item_type: ItemType, start_index: usize) -> reqwest::RequestBuilder {
        let query = [
            ("IncludeItemTypes", item_type.as_str().to_string()),
            ("Recursive", "true".to_string()),
            ("Fields", ITEM_FIELDS.to_string()),
            ("StartIndex", start_index.to_string()),
            ("Limit", PAGE_SIZE.to_string()),
        ];
        self.get(&format!("/Users/{}/Items", self.user_id))
            .query(&query)
    }

    async fn fetch_page(
        &self,
        item_type: ItemType,
        start_index: usize,
    ) -> Result<ItemsPage, LinkerError> {
        let response = self.items_request(item_type, start_index).send().await?;
        let response = Self::expect_ok(response, "Fetching items").await?;
        Ok(response.json().await?)
    }

    fn create_library_request(
        &self,
        name: &str,
        collection_type: &str,
        paths: &[String],
    ) -> reqwest::RequestBuilder {
        let mut query: Vec<(&str, &str)> = vec![
            ("name", name),
            ("collectionType", collection_type),
            ("refreshLibrary", "false"),
        ];
        query.extend(paths.iter().map(|p| ("paths", p.as_str())));
        self.post("/Library/VirtualFolders").query(&query)
    }
}

/// Only 200 and 204 count as success.
fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::NO_CONTENT
}

/// Start index of the next page, or `None` once the listing is exhausted.
///
/// Stops on a short page, or when `total` (if the server sent one) is reached.
fn next_page_start(start_index: usize, received: usize, total: Option<usize>) -> Option<usize> {
    let next = start_index + received;
    if received < PAGE_SIZE {
        return None;
    }
    match total {
        Some(total) if next >= total => None,
        _ => Some(next),
    }
}

#[async_trait]
impl MediaServer for JellyfinClient {
    async fn fetch_items(&self, item_type: ItemType) -> Result<Vec<CatalogItem>, LinkerError> {
        let mut items = Vec::new();
        let mut start_index = 0;
        loop {
            let page = self.fetch_page(item_type, start_index).await?;
            let batch = page.items.unwrap_or_default();
            let received = batch.len();
            let total = page.total_record_count;
            items.extend(batch.into_iter().filter_map(BaseItemDto::into_catalog_item));

            debug!(item_type = %item_type, received, start_index, ?total, "Fetched item page");
            match next_page_start(start_index, received, total) {
                Some(next) => start_index = next,
                None => break,
            }
        }
        Ok(items.into_iter().filter(|i| i.item_type == item_type).collect())
    }

    async fn list_libraries(&self) -> Result<Vec<VirtualLibrary>, LinkerError> {
        let response = self.get("/Library/VirtualFolders").send().await?;
        let response = Self::expect_ok(response, "Listing libraries").await?;
        Ok(response.json().await?)
    }

    async fn create_library(
        &self,
        name: &str,
        collection_type: &str,
        paths: &[String],
    ) -> Result<(), LinkerError> {
        if paths.is_empty() {
            return Err(LinkerError::Remote(format!(
                "No paths provided for library {}",
                name
            )));
        }
        let response = self
            .create_library_request(name, collection_type, paths)
            .send()
            .await?;
        Self::expect_ok(response, &format!("Creating library {}", name)).await?;
        Ok(())
    }

    async fn update_library_path(&self, name: &str, path: &str) -> Result<(), LinkerError> {
        let response = self
            .post("/Library/VirtualFolders/Paths/Update")
            .json(&MediaPathRequest {
                name,
                path_info: MediaPathInfo { path },
            })
            .send()
            .await?;
        Self::expect_ok(response, &format!("Updating library {}", name)).await?;
        Ok(())
    }

    async fn add_library_path(&self, name: &str, path: &str) -> Result<(), LinkerError> {
        let response = self
            .post("/Library/VirtualFolders/Paths")
            .json(&MediaPathRequest {
                name,
                path_info: MediaPathInfo { path },
            })
            .send()
            .await?;
        Self::expect_ok(response, &format!("Adding path to library {}", name)).await?;
        Ok(())
    }

    async fn refresh_libraries(&self) -> Result<(), LinkerError> {
        let response = self.post("/Library/Refresh").send().await?;
        Self::expect_ok(response, "Refreshing libraries").await?;
        Ok(())
    }
}

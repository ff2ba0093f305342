//! Run configuration.
//!
//! Settings are read once at startup from a flat `KEY=VALUE` file plus a
//! `GENRE_LINKER_*` environment overlay, validated, and frozen into a
//! [`LinkerConfig`] that every component borrows.

pub mod facade;
pub mod mapping;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;
pub use mapping::PathMapping;

use crate::error::LinkerError;
use crate::matcher::MatchPolicy;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Media server connection settings.
#[derive(Clone)]
pub struct ServerSettings {
    /// Base URL without a trailing slash.
    pub url: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout; `None` keeps the HTTP client default.
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Immutable configuration for one reconcile run.
#[derive(Debug, Clone)]
pub struct LinkerConfig {
    pub server: ServerSettings,
    pub movies: PathMapping,
    /// Show root; `None` when `SHOWS_DIR` is unset.
    pub shows: Option<PathMapping>,
    pub genres: PathMapping,
    pub include_shows: bool,
    pub matching: MatchPolicy,
}

impl LinkerConfig {
    /// Virtual library collection type implied by `include_shows`.
    pub fn collection_type(&self) -> &'static str {
        if self.include_shows {
            "mixed"
        } else {
            "movies"
        }
    }
}

/// Settings as read from the sources, before validation.
///
/// Keys are matched case-insensitively: `SERVER_URL` in the file and
/// `GENRE_LINKER_SERVER_URL` in the environment both land in `server_url`.
#[derive(Clone, Default, Deserialize)]
pub struct RawSettings {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub movies_dir: Option<String>,
    pub shows_dir: Option<String>,
    pub genres_dir: Option<String>,
    pub include_shows: Option<bool>,
    pub min_match_score: Option<f64>,
    pub max_genres_per_item: Option<usize>,
    pub request_timeout_secs: Option<u64>,
}

impl fmt::Debug for RawSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSettings")
            .field("server_url", &self.server_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("movies_dir", &self.movies_dir)
            .field("shows_dir", &self.shows_dir)
            .field("genres_dir", &self.genres_dir)
            .field("include_shows", &self.include_shows)
            .field("min_match_score", &self.min_match_score)
            .field("max_genres_per_item", &self.max_genres_per_item)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Trimmed, non-empty string value.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RawSettings {
    /// Genre root mapping alone; all the `clear` command needs.
    pub fn genres_mapping(&self) -> Result<PathMapping, LinkerError> {
        present(&self.genres_dir)
            .and_then(PathMapping::parse)
            .ok_or_else(|| {
                LinkerError::Config("No genre directory configured (GENRES_DIR)".to_string())
            })
    }

    /// Validate and freeze into a [`LinkerConfig`].
    pub fn into_linker_config(self) -> Result<LinkerConfig, LinkerError> {
        let required = [
            ("SERVER_URL", &self.server_url),
            ("USERNAME", &self.username),
            ("PASSWORD", &self.password),
            ("MOVIES_DIR", &self.movies_dir),
            ("GENRES_DIR", &self.genres_dir),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| present(value).is_none())
            .map(|(key, _)| *key)
            .collect();
        if !missing.is_empty() {
            return Err(LinkerError::Config(format!(
                "Missing required configuration: {}",
                missing.join(", ")
            )));
        }

        let url = required_value("SERVER_URL", &self.server_url)?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(LinkerError::Config(format!(
                "SERVER_URL must start with http:// or https://, got {}",
                url
            )));
        }

        let server = ServerSettings {
            url: url.trim_end_matches('/').to_string(),
            username: required_value("USERNAME", &self.username)?.to_string(),
            password: required_value("PASSWORD", &self.password)?.to_string(),
            request_timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        };

        let movies = mapping("MOVIES_DIR", &self.movies_dir)?;
        let genres = mapping("GENRES_DIR", &self.genres_dir)?;
        let shows = present(&self.shows_dir).and_then(PathMapping::parse);

        let roots = [Some(&movies), shows.as_ref(), Some(&genres)];
        let absolute: Vec<bool> = roots
            .iter()
            .flatten()
            .map(|m| m.container.is_absolute())
            .collect();
        if absolute.iter().any(|a| *a != absolute[0]) {
            return Err(LinkerError::Config(
                "Container paths of MOVIES_DIR, SHOWS_DIR and GENRES_DIR must be all absolute or all relative".to_string(),
            ));
        }

        let defaults = MatchPolicy::default();
        let max_genres = self.max_genres_per_item.unwrap_or(defaults.max_genres);
        if max_genres == 0 {
            return Err(LinkerError::Config(
                "MAX_GENRES_PER_ITEM must be at least 1".to_string(),
            ));
        }

        Ok(LinkerConfig {
            server,
            movies,
            shows,
            genres,
            include_shows: self.include_shows.unwrap_or(true),
            matching: MatchPolicy {
                min_score: self.min_match_score.unwrap_or(defaults.min_score),
                max_genres,
            },
        })
    }
}

fn required_value<'a>(key: &str, value: &'a Option<String>) -> Result<&'a str, LinkerError> {
    present(value)
        .ok_or_else(|| LinkerError::Config(format!("Missing required configuration: {}", key)))
}

fn mapping(key: &str, value: &Option<String>) -> Result<PathMapping, LinkerError> {
    PathMapping::parse(required_value(key, value)?)
        .ok_or_else(|| LinkerError::Config(format!("{} has an empty path", key)))
}

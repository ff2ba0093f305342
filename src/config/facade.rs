//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::sources::env_file;
use super::{LinkerConfig, RawSettings};
use crate::error::LinkerError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Settings file path: explicit `--config` value, otherwise `.env` in `base_dir`.
    pub fn resolve_path(explicit: Option<&Path>, base_dir: &Path) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => env_file::default_path(base_dir),
        }
    }

    /// Load raw settings from a specific file with environment overlay.
    pub fn load_settings(path: &Path) -> Result<RawSettings, LinkerError> {
        if !path.is_file() {
            return Err(LinkerError::Config(format!(
                "Configuration file {} not found",
                path.display()
            )));
        }
        Ok(MergeService::load_from_file(path)?)
    }

    /// Load and validate the full run configuration.
    pub fn load_from_file(path: &Path) -> Result<LinkerConfig, LinkerError> {
        Self::load_settings(path)?.into_linker_config()
    }
}

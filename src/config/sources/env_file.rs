//! Flat `KEY=VALUE` settings file in dotenv syntax.
//!
//! Lines dotenv cannot parse are skipped with a warning; the keys around them
//! still load. Values containing spaces or backslashes must be single-quoted to
//! be taken literally.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Map, Source, Value, ValueKind};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_FILE_NAME: &str = ".env";

pub fn default_path(base_dir: &Path) -> PathBuf {
    base_dir.join(DEFAULT_FILE_NAME)
}

/// A dotenv file as a `config` source. Keys are lower-cased; empty values are dropped.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for EnvFile {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let origin = self.path.display().to_string();
        let entries = dotenvy::from_path_iter(&self.path)
            .map_err(|e| ConfigError::Foreign(Box::new(e)))?;

        let mut values = Map::new();
        for entry in entries {
            let (key, value) = match entry {
                Ok(pair) => pair,
                Err(dotenvy::Error::LineParse(line, index)) => {
                    warn!(
                        file = %origin,
                        "Skipping unparsable settings line at column {}: {}",
                        index,
                        line
                    );
                    continue;
                }
                Err(e) => return Err(ConfigError::Foreign(Box::new(e))),
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            values.insert(
                key.trim().to_ascii_lowercase(),
                Value::new(Some(&origin), ValueKind::String(value.to_string())),
            );
        }
        Ok(values)
    }
}

/// Add the settings file as the lowest-precedence layer.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(EnvFile::new(path))
}

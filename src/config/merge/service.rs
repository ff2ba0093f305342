//! MergeService: layers the settings file under the environment and deserializes
//! the result into RawSettings.

use crate::config::sources::{env_file, environment};
use crate::config::RawSettings;
use config::{Config, ConfigError, Environment};
use std::path::Path;

/// Merge service for settings composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: settings file (lowest) -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<RawSettings, ConfigError> {
        Self::load_with_environment(path, environment::source())
    }

    /// Same as [`MergeService::load_from_file`] with an explicit environment source.
    pub fn load_with_environment(
        path: &Path,
        env: Environment,
    ) -> Result<RawSettings, ConfigError> {
        let builder = Config::builder();
        let builder = env_file::add_to_builder(builder, path);
        let builder = environment::add_to_builder(builder, env);

        let config = builder.build()?;
        config.try_deserialize()
    }
}

//! Environment variable source: GENRE_LINKER_* prefix, flat keys.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

pub const ENV_PREFIX: &str = "GENRE_LINKER";

/// Environment overlay. `GENRE_LINKER_SERVER_URL` overrides `SERVER_URL` from the file.
pub fn source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .ignore_empty(true)
}

/// Add the environment overlay to builder, above the settings file.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    env: Environment,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(env)
}

//! CLI Tooling
//!
//! Command-line surface for genre-linker: `create` rebuilds genre links and
//! libraries, `clear` removes every genre symlink.

use crate::config::{ConfigLoader, LinkerConfig};
use crate::error::LinkerError;
use crate::logging::LoggingConfig;
use crate::pipeline::{run_clear, run_create};
use crate::report::{render_clear, render_run, OutputFormat};
use crate::server::JellyfinClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Genre Linker - organize a Jellyfin library into per-genre symlink folders
#[derive(Parser)]
#[command(name = "genre-linker")]
#[command(version)]
#[command(about = "Organize media folders into genre symlink libraries for Jellyfin")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (default: .env in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild genre symlinks and genre libraries
    Create {
        /// Do not create, update or refresh media server libraries
        #[arg(long)]
        skip_libraries: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Remove every symlink under the genre directory
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Cli {
    /// Logging settings from global flags; `--verbose` wins over `--log-level`.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig::default();
        if let Some(ref level) = self.log_level {
            config.level = level.clone();
        }
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(ref format) = self.log_format {
            config.format = format.clone();
        }
        if let Some(ref output) = self.log_output {
            config.output = output.clone();
        }
        config.file = self.log_file.clone();
        config
    }
}

/// CLI context: where configuration comes from.
pub struct CliContext {
    config_path: PathBuf,
}

impl CliContext {
    /// Resolve the configuration path against the current directory.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, LinkerError> {
        let cwd = std::env::current_dir()?;
        Ok(Self {
            config_path: ConfigLoader::resolve_path(config_path.as_deref(), &cwd),
        })
    }

    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, LinkerError> {
        match command {
            Commands::Create {
                skip_libraries,
                format,
            } => self.handle_create(!*skip_libraries, OutputFormat::parse(format)?),
            Commands::Clear { yes, format } => {
                self.handle_clear(*yes, OutputFormat::parse(format)?)
            }
        }
    }

    fn handle_create(
        &self,
        manage_libraries: bool,
        format: OutputFormat,
    ) -> Result<String, LinkerError> {
        let config = ConfigLoader::load_from_file(&self.config_path)?;
        info!(config = %self.config_path.display(), "Starting genre linking");

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LinkerError::Config(format!("Failed to create runtime: {}", e)))?;
        let summary = rt.block_on(Self::create(&config, manage_libraries))?;
        render_run(&summary, format)
    }

    async fn create(
        config: &LinkerConfig,
        manage_libraries: bool,
    ) -> Result<crate::pipeline::RunSummary, LinkerError> {
        let client = JellyfinClient::authenticate(&config.server).await?;
        run_create(config, &client, manage_libraries).await
    }

    fn handle_clear(&self, yes: bool, format: OutputFormat) -> Result<String, LinkerError> {
        let genres = ConfigLoader::load_settings(&self.config_path)?.genres_mapping()?;

        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt("Are you sure you want to remove all symlinks?")
                .default(false)
                .interact()
                .map_err(|e| LinkerError::Prompt(e.to_string()))?;

            if !confirmed {
                return Ok("Operation cancelled.".to_string());
            }
        }

        let report = run_clear(&genres);
        render_clear(&report, format)
    }
}

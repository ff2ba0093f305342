//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format and destination come
//! from CLI flags, overridable through `GENRE_LINKER_LOG*` environment variables.

use crate::error::LinkerError;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const ENV_FILTER: &str = "GENRE_LINKER_LOG";
const ENV_FORMAT: &str = "GENRE_LINKER_LOG_FORMAT";
const ENV_OUTPUT: &str = "GENRE_LINKER_LOG_OUTPUT";
const ENV_FILE: &str = "GENRE_LINKER_LOG_FILE";

/// Resolve the log file path with precedence: CLI, GENRE_LINKER_LOG_FILE env, default.
///
/// Default uses the `ProjectDirs` state directory (falling back to the data directory
/// on platforms without one).
pub fn resolve_log_file_path(cli_file: Option<PathBuf>) -> Result<PathBuf, LinkerError> {
    if let Some(p) = cli_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    if let Ok(env_path) = std::env::var(ENV_FILE) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    let project_dirs =
        directories::ProjectDirs::from("", "genre-linker", "genre-linker").ok_or_else(|| {
            LinkerError::Config(
                "Could not determine platform state directory for log file".to_string(),
            )
        })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir());
    Ok(dir.join("genre-linker.log"))
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,

    /// Output format: json, text
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    pub output: String,

    /// Log file path when output includes file; None means use runtime default
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, terminal destinations only)
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            output: "stderr".to_string(),
            file: None,
            color: true,
        }
    }
}

/// Output destinations
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

/// Initialize the global subscriber. Call once, before any command runs.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LinkerError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = parse_output_destinations(
        &std::env::var(ENV_OUTPUT).unwrap_or_else(|_| config.output.clone()),
    )?;

    let writer = if output.file {
        let file = open_log_file(config.file.clone())?;
        if output.stderr {
            BoxMakeWriter::new(file.and(std::io::stderr))
        } else {
            BoxMakeWriter::new(file)
        }
    } else if output.stdout && output.stderr {
        BoxMakeWriter::new(std::io::stdout.and(std::io::stderr))
    } else if output.stdout {
        BoxMakeWriter::new(std::io::stdout)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };
    let ansi = config.color && !output.file;

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init()
    };
    result.map_err(|e| LinkerError::Config(format!("Failed to initialize logging: {}", e)))
}

fn open_log_file(cli_file: Option<PathBuf>) -> Result<std::sync::Arc<std::fs::File>, LinkerError> {
    let log_file = resolve_log_file_path(cli_file)?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            LinkerError::Config(format!("Failed to create log directory: {}", e))
        })?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            LinkerError::Config(format!("Failed to open log file {:?}: {}", log_file, e))
        })?;
    Ok(std::sync::Arc::new(file))
}

/// Build environment filter from GENRE_LINKER_LOG or the configured level
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, LinkerError> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_FILTER) {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| LinkerError::Config(format!("Invalid log level {}: {}", config.level, e)))
}

/// Determine output format from environment or config
fn determine_format(config: &LoggingConfig) -> Result<String, LinkerError> {
    if let Ok(format) = std::env::var(ENV_FORMAT) {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }
    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(LinkerError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, LinkerError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        "both" => (true, true, false),
        _ => {
            return Err(LinkerError::Config(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}

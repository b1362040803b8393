//! Common utilities shared across CLI commands.

use std::path::Path;

use snowline::config::ConfigFile;
use snowline::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Load the configuration, from `path` if given, else from the default location.
///
/// An explicitly given file must exist; the default file falls back to
/// defaults when missing.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    match path {
        Some(path) if !path.exists() => Err(CliError::Config(format!(
            "config file '{}' not found",
            path.display()
        ))),
        Some(path) => Ok(ConfigFile::load_from(path)?),
        None => Ok(ConfigFile::load()?),
    }
}

/// Initialize logging from the `[logging]` section.
pub fn init_logging_from(config: &ConfigFile) -> Result<LoggingGuard, CliError> {
    init_logging(&config.logging.directory, &config.logging.file)
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}

//! Configuration loading and path resolution
//!
//! Bootstrap configuration lives in an optional TOML file:
//!
//! ```toml
//! document_path = "cleaned_repertoire.json"
//!
//! [logging]
//! level = "info"
//!
//! [corrections]
//! "Жастар биы" = "Жастар биі"
//! ```
//!
//! A missing file is not an error; built-in defaults apply. A `[corrections]`
//! table replaces the built-in correction table entirely.
//!
//! # Resolution Priority
//!
//! Document path:
//! 1. Command-line argument
//! 2. `REPERTOIRE_FILE` environment variable
//! 3. `document_path` from the TOML file
//! 4. [`DEFAULT_DOCUMENT_PATH`]
//!
//! Config file:
//! 1. Command-line argument
//! 2. `REPERTOIRE_CONFIG` environment variable
//! 3. `./repertoire.toml`
//! 4. `<user config dir>/repertoire/config.toml`

use crate::corrections::CorrectionTable;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Document cleaned when nothing else is configured
pub const DEFAULT_DOCUMENT_PATH: &str = "cleaned_repertoire.json";

/// Environment variable naming the document path
pub const DOCUMENT_ENV_VAR: &str = "REPERTOIRE_FILE";

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "REPERTOIRE_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "repertoire.toml";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path of the document to clean (relative or absolute)
    #[serde(default)]
    pub document_path: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Replacement correction table (optional, built-in table if absent)
    #[serde(default)]
    pub corrections: Option<CorrectionTable>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Correction table from the file, or the built-in one
    pub fn correction_table(&self) -> CorrectionTable {
        match &self.corrections {
            Some(table) => {
                if table.is_empty() {
                    warn!("Configured [corrections] table is empty, no typos will be corrected");
                }
                table.clone()
            }
            None => CorrectionTable::builtin(),
        }
    }
}

/// Find the config file to use, if any
///
/// An explicit path (argument or environment) is returned even if it does not
/// exist so that loading reports it; the implicit locations are only returned
/// when present.
pub fn locate_config_file(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Some(path) = env_path(CONFIG_ENV_VAR) {
        return Some(path);
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    match dirs::config_dir() {
        Some(dir) => Some(dir.join("repertoire").join("config.toml")).filter(|p| p.exists()),
        None => {
            warn!("Could not determine user config directory, skipping user config file");
            None
        }
    }
}

/// Load configuration following the resolution priority
///
/// Falls back to defaults when no config file is found.
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    match locate_config_file(cli_arg) {
        Some(path) => {
            let config = TomlConfig::load(&path)?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => {
            debug!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Resolve the document path following the resolution priority
pub fn resolve_document_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Some(path) = env_path(DOCUMENT_ENV_VAR) {
        return path;
    }

    if let Some(path) = &config.document_path {
        return path.clone();
    }

    PathBuf::from(DEFAULT_DOCUMENT_PATH)
}

/// Correction table from a JSON corrections file, else from configuration
pub fn resolve_correction_table(
    corrections_file: Option<&Path>,
    config: &TomlConfig,
) -> Result<CorrectionTable> {
    match corrections_file {
        Some(path) => CorrectionTable::from_json_file(path),
        None => Ok(config.correction_table()),
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

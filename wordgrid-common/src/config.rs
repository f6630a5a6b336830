//! Configuration loading and config file resolution
//!
//! Values are resolved in priority order:
//! 1. Command-line argument (highest priority, applied by the binary)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: the compiled defaults are used and
//! startup continues. A config file that exists but does not parse is.

use crate::db::rotation::RotationBoundary;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "WORDGRID_CONFIG";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8998;

/// Service configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Directory of puzzle JSON files imported at startup (`None` disables import)
    pub puzzle_dir: Option<PathBuf>,
    /// Directory of static site files
    pub site_dir: PathBuf,
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Whether an entry activating exactly at the query instant is active
    pub rotation_boundary: RotationBoundary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_data_folder().join("wordgrid.db"),
            puzzle_dir: Some(PathBuf::from("./puzzles")),
            site_dir: PathBuf::from("./site"),
            bind_address: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            rotation_boundary: RotationBoundary::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text; absent keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve and load configuration
    ///
    /// An explicitly requested file (argument or environment variable) must
    /// exist. The platform default file is optional.
    pub fn load(cli_arg: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_config_path(cli_arg) {
            info!("Loading config file: {}", path.display());
            return Self::from_file(&path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config file: {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                warn!("No config file found, using compiled defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Config file named by command-line argument or environment variable
pub fn explicit_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => None,
    }
}

/// Platform config file location (`<config dir>/wordgrid/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wordgrid").join("config.toml"))
}

/// OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("wordgrid"))
        .unwrap_or_else(|| PathBuf::from("./wordgrid_data"))
}

// src/config.rs
use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{instrument, trace, warn};

pub const DB_URL_ENV: &str = "LINKSHELF_DB_URL";
pub const FETCH_METADATA_ENV: &str = "LINKSHELF_FETCH_METADATA";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_url: String,

    /// Fill empty titles and descriptions from website metadata (default: true)
    #[serde(default = "default_fetch_metadata")]
    pub fetch_metadata: bool,
}

fn default_fetch_metadata() -> bool {
    true
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/linkshelf")
}

fn default_db_path() -> String {
    config_dir()
        .join("linkshelf.db")
        .to_string_lossy()
        .into_owned()
}

/// Location of the user's config file
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
            fetch_metadata: default_fetch_metadata(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read settings from a TOML file; missing keys take their defaults
pub fn load_settings_from_file(path: &Path) -> DomainResult<Settings> {
    let config_text = std::fs::read_to_string(path)?;
    toml::from_str::<Settings>(&config_text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Load settings from the config file and environment variables.
///
/// Precedence: environment over `~/.config/linkshelf/config.toml` over defaults.
#[instrument(level = "debug")]
pub fn load_settings() -> DomainResult<Settings> {
    load_settings_with(&default_config_path())
}

pub fn load_settings_with(config_path: &Path) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = if config_path.exists() {
        trace!("Loading config from: {:?}", config_path);
        load_settings_from_file(config_path)?
    } else {
        Settings::default()
    };

    if let Ok(db_url) = std::env::var(DB_URL_ENV) {
        trace!("Using {} from environment: {}", DB_URL_ENV, db_url);
        settings.db_url = db_url;
    }

    if let Ok(value) = std::env::var(FETCH_METADATA_ENV) {
        match parse_bool(&value) {
            Some(fetch_metadata) => settings.fetch_metadata = fetch_metadata,
            None => warn!("Ignoring {}={}: expected a boolean", FETCH_METADATA_ENV, value),
        }
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

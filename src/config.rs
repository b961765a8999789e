// src/config.rs
use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{instrument, trace};

pub const DB_URL_ENV: &str = "BLAND_DB_URL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_url: String,
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/bland")
}

fn default_db_path() -> String {
    config_dir().join("bland.db").to_string_lossy().to_string()
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
        }
    }
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Load settings: defaults, then the config file, then the environment.
///
/// An explicitly given config file must exist and parse. The default one
/// is optional and ignored when malformed.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => read_config_file(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                read_config_file(&path).unwrap_or_else(|e| {
                    trace!("Ignoring default config: {}", e);
                    Settings::default()
                })
            } else {
                Settings::default()
            }
        }
    };

    if let Ok(db_url) = std::env::var(DB_URL_ENV) {
        trace!("Using {} from environment: {}", DB_URL_ENV, db_url);
        settings.db_url = db_url;
    }

    settings.db_url = shellexpand::tilde(&settings.db_url).into_owned();

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

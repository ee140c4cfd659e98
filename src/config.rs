//! Configuration file handling.
//!
//! A configuration file names the output path and the target dialect:
//!
//! ```json
//! {
//!   "out_file_path": "./schema.sql",
//!   "db": {"driver": "mysql", "engine": "InnoDB", "charset": "utf8mb4"}
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dialect::DialectKind;
use crate::error::DdlError;

/// File looked up when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "ddl-maker.json";

pub const DEFAULT_DRIVER: &str = "mysql";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Configuration file not found: {path}\n\n\
         Example:\n\
         {{\n  \
           \"out_file_path\": \"./schema.sql\",\n  \
           \"db\": {{\"driver\": \"mysql\", \"engine\": \"InnoDB\", \"charset\": \"utf8mb4\"}}\n\
         }}"
    )]
    NotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: String, message: String },
}

/// Target database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    #[serde(default = "default_driver")]
    pub driver: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

fn default_driver() -> String {
    DEFAULT_DRIVER.to_string()
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            engine: None,
            charset: None,
        }
    }
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where `generate` writes the script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_file_path: Option<PathBuf>,
    #[serde(default)]
    pub db: DbConfig,
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file doesn't exist
    /// - The file cannot be read
    /// - The JSON is invalid
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::NotFound { path: display });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: display.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
            path: display,
            message: e.to_string(),
        })
    }

    /// Load `path` if given, otherwise `ddl-maker.json` when it exists, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Dialect selected by the `db` section.
    pub fn dialect(&self) -> Result<DialectKind, DdlError> {
        DialectKind::new(
            &self.db.driver,
            self.db.engine.as_deref(),
            self.db.charset.as_deref(),
        )
    }
}

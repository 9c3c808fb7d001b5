mod file_creation;

use super::{Config, ConfigPaths};
use crate::{ReelviewError, Result};
use file_creation::create_default_config_file;
use std::{fs, path::Path};
use toml::Value;
use tracing::{debug, info};

impl Config {
    /// Loads the main configuration file from the user's config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or if
    /// [`Config::load_from_path`] fails.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load_from_path(&path)
    }

    /// Loads a configuration file.
    ///
    /// A missing file is created with a commented stub, so all defaults
    /// apply. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or read
    /// - The TOML content is invalid
    /// - A value has the wrong type for its field
    pub fn load_from_path(path: &Path) -> Result<Config> {
        if !path.exists() {
            info!("Creating default config file at {}", path.display());
            create_default_config_file(path)?;
        }

        let content = fs::read_to_string(path).map_err(|e| ReelviewError::io_at(e, path))?;
        let config = Self::from_toml_str(&content, Some(path))?;

        debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `TomlParseError` for malformed TOML and `ConfigValidation`
    /// when a value does not fit the schema.
    pub fn from_toml_str(content: &str, path: Option<&Path>) -> Result<Config> {
        let value: Value =
            toml::from_str(content).map_err(|e| ReelviewError::toml_parse(e, path))?;

        value
            .try_into()
            .map_err(|e| ReelviewError::ConfigValidation {
                component: "config parsing".to_string(),
                details: format!("Configuration validation failed: {e}"),
            })
    }
}

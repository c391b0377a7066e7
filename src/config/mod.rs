//! Settings for the `ffder` binary
//!
//! Settings are layered:
//! 1. Default values (embedded in structs)
//! 2. Settings file (TOML, or any format the `config` crate knows by extension)
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Settings can be overridden using environment variables with the pattern:
//! `FFDER__<section>__<key>`
//!
//! Examples:
//! - `FFDER__LOADER__WORK_DIR=/etc/myapp`
//! - `FFDER__LOADER__REVERSE=false`
//! - `FFDER__LOADER__HANDLERS=toml,json`
//! - `FFDER__LOG__FILTER=ffder=debug`
//!
//! # Settings File
//!
//! By default, settings are read from `ffder.toml` in the current directory
//! when it exists. This can be overridden using the `FFDER_CONFIG` environment
//! variable or the `--config` flag.

mod models;
mod sources;
mod validation;

pub use models::{LoaderSettings, LogSettings, Settings};
pub use validation::ValidationError;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::handlers::{HandlerChain, HandlerRegistry};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Settings validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Settings {
    /// Load settings from all sources (file + environment)
    ///
    /// `explicit` takes precedence over `FFDER_CONFIG` and the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The settings file is malformed
    /// - Validation fails (unknown handler names, missing work dir, etc.)
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = sources::load(explicit)?;
        validation::validate(&settings)?;
        Ok(settings)
    }

    /// Settings file [`load`](Self::load) reads for `explicit`, which may not exist
    pub fn path(explicit: Option<&Path>) -> PathBuf {
        sources::resolve_path(explicit)
    }

    /// Load settings from a specific path
    pub fn load_from_path(path: PathBuf) -> Result<Self, SettingsError> {
        let settings = sources::load_from_sources(path)?;
        validation::validate(&settings)?;
        Ok(settings)
    }

    /// Built-in registry restricted to `loader.handlers` when set
    pub fn registry(&self) -> HandlerRegistry {
        let registry = HandlerRegistry::with_defaults();
        if self.loader.handlers.is_empty() {
            registry
        } else {
            registry.filtered(&self.loader.handlers)
        }
    }

    /// Chain built from [`registry`](Self::registry) in the configured order
    pub fn chain(&self) -> HandlerChain {
        HandlerChain::build(&self.registry(), self.loader.reverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("ffder.toml");

        fs::write(&config_path, "[loader]\nreverse = false\n").unwrap();

        let settings = Settings::load_from_path(config_path).unwrap();
        assert_eq!(settings.chain().names(), vec!["env", "toml", "yaml", "json"]);
    }

    #[test]
    fn test_handler_subset_chain() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("ffder.toml");

        fs::write(&config_path, "[loader]\nhandlers = [\"env\", \"json\"]\n").unwrap();

        let settings = Settings::load_from_path(config_path).unwrap();
        assert_eq!(settings.chain().names(), vec!["json", "env"]);
    }

    #[test]
    fn test_validation_catches_unknown_handler() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("ffder.toml");

        fs::write(&config_path, "[loader]\nhandlers = [\"xml\"]\n").unwrap();

        let result = Settings::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            SettingsError::ValidationError(ValidationError::UnknownHandler { .. })
        ));
    }

    #[test]
    fn test_path_prefers_explicit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");

        assert_eq!(Settings::path(Some(&config_path)), config_path);
    }

    #[test]
    fn test_malformed_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("ffder.toml");

        fs::write(&config_path, "[loader\nreverse = ").unwrap();

        let result = Settings::load_from_path(config_path);
        assert!(matches!(result.unwrap_err(), SettingsError::LoadError(_)));
    }
}

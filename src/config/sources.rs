use super::models::Settings;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "FFDER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "ffder.toml";
const ENV_PREFIX: &str = "FFDER";
const ENV_SEPARATOR: &str = "__";

/// Load settings from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. Settings file, if it exists: `explicit`, else `$FFDER_CONFIG`, else `ffder.toml`
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    load_from_sources(resolve_path(explicit))
}

/// Settings file path: `explicit`, else `$FFDER_CONFIG`, else `ffder.toml`
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load settings from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::debug!("Loading settings from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            "Settings file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // FFDER__LOADER__REVERSE -> loader.reverse
    // FFDER__LOADER__HANDLERS=toml,json -> loader.handlers
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .list_separator(",")
            .with_list_parse_key("loader.handlers")
            .try_parsing(true),
    );

    let settings = builder.build()?;
    settings.try_deserialize()
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level settings of the `ffder` binary
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub loader: LoaderSettings,
    #[serde(default)]
    pub log: LogSettings,
}

/// Loader settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoaderSettings {
    /// Search root for bare names; the current directory when unset
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
    /// Consult later-registered handlers first
    #[serde(default = "default_reverse")]
    pub reverse: bool,
    /// Restrict the chain to these handler names; empty keeps all built-ins
    #[serde(default)]
    pub handlers: Vec<String>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            work_dir: None,
            reverse: default_reverse(),
            handlers: Vec::new(),
        }
    }
}

fn default_reverse() -> bool {
    true
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

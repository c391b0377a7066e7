//! File discovery and loading facade
//!
//! [`ConfigLoader`] resolves a file (searching its working directory when
//! given a bare name) and hands it to a [`HandlerChain`].
//!
//! # Usage
//!
//! ```no_run
//! use ffder::loader::ConfigLoader;
//!
//! let loader = ConfigLoader::from_cwd().expect("current directory is readable");
//! let values = loader.loads("settings.toml").expect("settings load");
//! println!("{:?}", values.get("server"));
//! ```

mod error;

pub use error::{LoadError, Result};

use bon::Builder;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::handlers::{HandlerChain, Mapping};
use crate::observability::LoaderMetrics;
use crate::search;

static LOADER: OnceLock<ConfigLoader> = OnceLock::new();

/// What to load: a name searched under the working directory, or a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Name(String),
    Path(PathBuf),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&Path> for Target {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&PathBuf> for Target {
    fn from(path: &PathBuf) -> Self {
        Self::Path(path.clone())
    }
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Finds configuration files and parses them through a handler chain
#[derive(Debug, Builder)]
pub struct ConfigLoader {
    /// Base directory for name lookups
    #[builder(into)]
    work_dir: PathBuf,
    #[builder(default)]
    chain: HandlerChain,
    #[builder(default)]
    metrics: LoaderMetrics,
}

impl ConfigLoader {
    /// Loader over `work_dir` with the default chain
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self::builder().work_dir(work_dir).build()
    }

    /// Process-wide loader bound to the current directory at first use
    ///
    /// Later calls return the same instance even if the process has changed
    /// directory since.
    pub fn from_cwd() -> io::Result<&'static ConfigLoader> {
        if let Some(loader) = LOADER.get() {
            return Ok(loader);
        }

        let work_dir = env::current_dir()?;
        Ok(LOADER.get_or_init(|| {
            tracing::debug!(work_dir = %work_dir.display(), "Initialised process-wide loader");
            Self::new(work_dir)
        }))
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn chain(&self) -> &HandlerChain {
        &self.chain
    }

    pub fn metrics(&self) -> &LoaderMetrics {
        &self.metrics
    }

    /// First file under `dir` (default: the working directory) named
    /// `pattern` or matching it as a glob
    ///
    /// Patterns with a directory part (`conf/settings.toml`) match the
    /// trailing components of a path at any depth.
    pub fn find(&self, pattern: &str, dir: Option<&Path>) -> Result<PathBuf> {
        let root = dir.unwrap_or(self.work_dir.as_path());

        search::find_first(root, pattern).ok_or_else(|| LoadError::NotFoundInDir {
            pattern: pattern.to_string(),
            dir: root.to_path_buf(),
        })
    }

    /// Parse a file into a mapping
    ///
    /// Names are resolved with [`find`](Self::find) first; paths are used as
    /// given. A file no handler claims fails with
    /// [`LoadError::UnsupportedFormat`].
    pub fn loads(&self, target: impl Into<Target>) -> Result<Mapping> {
        let result = self.resolve_and_dispatch(target.into());
        self.record(&result);
        result
    }

    fn resolve_and_dispatch(&self, target: Target) -> Result<Mapping> {
        let path = match target {
            Target::Name(name) => self.find(&name, None)?,
            Target::Path(path) => path,
        };

        let values = self.chain.dispatch(&path)?;
        tracing::debug!(file = %path.display(), keys = values.len(), "Loaded file");
        Ok(values)
    }

    fn record(&self, result: &Result<Mapping>) {
        match result {
            Ok(_) => self.metrics.file_loaded(),
            Err(LoadError::FileNotFound { .. } | LoadError::NotFoundInDir { .. }) => {
                self.metrics.file_not_found()
            }
            Err(err @ LoadError::UnsupportedFormat { .. }) => {
                tracing::warn!(error = %err, "Unsupported file format");
                self.metrics.unsupported_format()
            }
            Err(LoadError::Parse { .. } | LoadError::Io { .. }) => self.metrics.parse_failed(),
        }
    }
}

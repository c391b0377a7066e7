use std::fmt;
use std::path::Path;
use thiserror::Error;

use super::types::{Mapping, file_name_of, suffix_of};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("file of format '{extension}' is not supported, as its parser is not available")]
    Unsupported { extension: String },
    #[error("malformed {format} content: {source}")]
    Parse {
        format: &'static str,
        #[source]
        source: BoxError,
    },
}

impl HandlerError {
    pub fn unsupported(file: &Path) -> Self {
        Self::Unsupported {
            extension: suffix_of(file),
        }
    }

    pub fn parse(format: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Parse {
            format,
            source: source.into(),
        }
    }
}

/// Format handler trait for file parsing
///
/// A handler claims a set of file suffixes (`.toml`) or exact file names
/// (`.env`) and knows how to turn the bytes of such a file into a
/// [`Mapping`]. Handlers are consulted in priority order by a
/// [`HandlerChain`](super::HandlerChain); the first one that matches a file
/// parses it.
pub trait FormatHandler: Send + Sync {
    /// Short identifier used in logs and listings
    fn name(&self) -> &'static str;

    /// Suffixes (with leading dot) or exact file names this handler claims
    fn supported_formats(&self) -> &[&str];

    /// Capability probe: whether the parser for this format is compiled in
    fn is_available(&self) -> bool;

    /// Case-sensitive match on the file suffix or the full file name
    fn matches(&self, file: &Path) -> bool {
        let suffix = suffix_of(file);
        let name = file_name_of(file);
        self.supported_formats()
            .iter()
            .any(|format| (!suffix.is_empty() && *format == suffix) || *format == name)
    }

    /// Parse file contents into a mapping
    ///
    /// Must fail with [`HandlerError::Unsupported`] when the parser is not
    /// available rather than with any lower-level error.
    fn parse(&self, file: &Path, contents: &[u8]) -> Result<Mapping, HandlerError>;
}

impl fmt::Display for dyn FormatHandler + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.supported_formats().join(", "))
    }
}

impl fmt::Debug for dyn FormatHandler + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatHandler")
            .field("name", &self.name())
            .field("supported_formats", &self.supported_formats())
            .field("available", &self.is_available())
            .finish()
    }
}

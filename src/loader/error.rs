use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::handlers::{BoxError, DispatchError, HandlerError, suffix_of};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file {} not found", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("file '{pattern}' not found in directory {}", .dir.display())]
    NotFoundInDir { pattern: String, dir: PathBuf },

    /// No handler claims the file, or the claiming handler has no parser
    #[error("file of format '{extension}' is not supported ({})", .path.display())]
    UnsupportedFormat { extension: String, path: PathBuf },

    #[error("failed to parse {format} file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<DispatchError> for LoadError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::FileNotFound { path } => Self::FileNotFound { path },
            DispatchError::EndOfChain { path } => Self::UnsupportedFormat {
                extension: suffix_of(&path),
                path,
            },
            DispatchError::Read { path, source } => Self::Io { path, source },
            DispatchError::Handler {
                path,
                source: HandlerError::Unsupported { extension },
            } => Self::UnsupportedFormat { extension, path },
            DispatchError::Handler {
                path,
                source: HandlerError::Parse { format, source },
            } => Self::Parse {
                path,
                format,
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;

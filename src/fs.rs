//! File-system access used by handler chains
//!
//! Dispatch only needs two primitives: a regular-file predicate and a byte
//! read. They sit behind [`FileSystem`] so chains can run against something
//! other than the local disk.

use std::io;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    /// True iff `path` resolves to an existing regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Read the whole file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Local disk via `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

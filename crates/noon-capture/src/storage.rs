//! Storage service consumed by the loader
//!
//! The loader reads capture files through this seam so tests can substitute
//! in-memory content and verify that every exit path releases its handle.

use std::io::{self, Read};
use std::path::Path;

/// Persistent storage open/read primitives
pub trait Storage: Send + Sync {
    /// Open a file for reading; the returned handle owns the underlying
    /// resource and releases it on drop
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Create a directory and any missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Storage backed by the local filesystem
#[derive(Debug, Default, Clone)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(std::fs::File::open(path)?))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Read the full contents of `path` through a storage service
pub fn read_to_string(storage: &dyn Storage, path: &Path) -> io::Result<String> {
    let mut handle = storage.open(path)?;
    let mut text = String::new();
    handle.read_to_string(&mut text)?;
    Ok(text)
}

//! In-memory capture storage backends

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use noon_capture::Storage;

/// Storage over an in-memory file map
#[derive(Default)]
pub struct MemStorage {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemStorage {
    /// Empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .lock()
            .expect("storage lock")
            .insert(path.into(), content.into());
    }

    fn content(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .expect("storage lock")
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

impl Storage for MemStorage {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let content = self.content(path)?;
        Ok(Box::new(io::Cursor::new(content.into_bytes())))
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// [`MemStorage`] that counts outstanding open handles
///
/// Each handle decrements the counter on drop, so a zero count after an
/// operation proves every exit path released its file.
#[derive(Default)]
pub struct TrackingStorage {
    inner: MemStorage,
    open_handles: Arc<AtomicUsize>,
}

struct TrackedRead {
    cursor: io::Cursor<Vec<u8>>,
    open_handles: Arc<AtomicUsize>,
}

impl Read for TrackedRead {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Drop for TrackedRead {
    fn drop(&mut self) {
        self.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

impl TrackingStorage {
    /// Empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.inner.insert(path, content);
    }

    /// Handles currently open
    pub fn outstanding_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }
}

impl Storage for TrackingStorage {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let content = self.inner.content(path)?;
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedRead {
            cursor: io::Cursor::new(content.into_bytes()),
            open_handles: Arc::clone(&self.open_handles),
        }))
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_storage_round_trip() {
        let storage = MemStorage::new();
        storage.insert("/c/a.sub", "Protocol: RAW\n");

        let text = noon_capture::storage::read_to_string(&storage, Path::new("/c/a.sub")).unwrap();
        assert_eq!(text, "Protocol: RAW\n");

        assert!(storage.open(Path::new("/c/missing.sub")).is_err());
    }

    #[test]
    fn test_tracking_storage_counts_handles() {
        let storage = TrackingStorage::new();
        storage.insert("/c/a.sub", "x");

        let handle = storage.open(Path::new("/c/a.sub")).unwrap();
        assert_eq!(storage.outstanding_handles(), 1);
        drop(handle);
        assert_eq!(storage.outstanding_handles(), 0);
    }
}

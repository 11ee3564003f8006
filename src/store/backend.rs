//! Storage backends
//!
//! Raw read/write of the settings file contents.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::{Result, StoreError};

/// Where the store's text lives
pub trait Backend: Send + Sync {
    /// Read the full contents
    fn read(&self) -> io::Result<String>;

    /// Replace the full contents, all or nothing
    fn write(&self, contents: &str) -> Result<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

// =============================================================================
// File Backend
// =============================================================================

/// Settings persisted in a single file on disk
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Backend for FileBackend {
    fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    /// Write to a temp file beside the target, fsync, then rename over it
    fn write(&self, contents: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        temp.write_all(contents.as_bytes())
            .map_err(|e| self.write_error(e))?;
        temp.as_file().sync_all().map_err(|e| self.write_error(e))?;
        temp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// Settings held in memory
///
/// `None` contents behave like a missing file. Reads and writes can be
/// forced to fail to exercise the store's error paths.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty backend (reads fail with NotFound)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend holding `contents`
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            ..Self::default()
        }
    }

    /// Current raw contents
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }

    /// Make subsequent reads fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Backend for MemoryBackend {
    fn read(&self) -> io::Result<String> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "reads disabled"));
        }
        self.contents
            .lock()
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no contents"))
    }

    fn write(&self, contents: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: PathBuf::from(self.describe()),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "writes disabled"),
            });
        }
        *self.contents.lock() = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    fn read(&self) -> io::Result<String> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<()> {
        (**self).write(contents)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

//! Storage capability for the persisted entry collection and goal
//!
//! The tracker only sees bytes; where they live is decided by whoever
//! constructs the storage.

use crate::error::{HabitError, Result};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Opaque byte persistence
pub trait Storage {
    /// Read the stored bytes. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored bytes
    fn save(&self, bytes: &[u8]) -> Result<()>;
}

/// Stores bytes in a single file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        FileStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HabitError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Write to a temp file next to the target, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn save(&self, bytes: &[u8]) -> Result<()> {
        let to_storage_error = |e: std::io::Error| {
            HabitError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(to_storage_error)?;
            }
        }

        let tmp_name = format!(
            "{}.tmp-{}",
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("data.json"),
            std::process::id()
        );
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, bytes).map_err(to_storage_error)?;

        if cfg!(windows) && self.path.exists() {
            fs::remove_file(&self.path).map_err(to_storage_error)?;
        }

        fs::rename(&tmp_path, &self.path).map_err(to_storage_error)?;
        Ok(())
    }
}

/// Keeps bytes in memory. Used by tests and by callers that persist
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    bytes: RefCell<Option<Vec<u8>>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        MemoryStorage {
            bytes: RefCell::new(Some(bytes)),
            read_only: false,
        }
    }

    /// A storage whose every save fails
    pub fn read_only() -> Self {
        MemoryStorage {
            bytes: RefCell::new(None),
            read_only: true,
        }
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.bytes.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.borrow().clone())
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        if self.read_only {
            return Err(HabitError::Storage("storage is read-only".to_string()));
        }
        *self.bytes.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

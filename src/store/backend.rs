//! Storage backends for the persisted cart value.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};

/// A single-value storage slot for the serialized cart.
///
/// The cart store is the slot's only writer; readers get the raw serialized
/// string (or `None` when nothing has been written yet) and the store owns
/// interpretation and fail-soft recovery.
pub trait StorageBackend {
    /// Reads the stored value, `None` if nothing exists yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored value.
    fn write(&self, contents: &str) -> Result<()>;
}

/// File-backed storage slot.
///
/// Writes are atomic (temp file + rename) so a crash mid-write never leaves
/// a truncated cart on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Creates a backend storing its value at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this backend reads and writes.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read {}", self.path.display())),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create data directory: {}",
                parent.display()
            ))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents).context(format!(
            "Failed to write temp cart file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp cart file to: {}",
            self.path.display()
        ))?;

        Ok(())
    }
}

/// In-memory storage slot for tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    value: Mutex<Option<String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-seeded with a raw value (e.g., malformed JSON).
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory backend lock poisoned"))?
            .clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory backend lock poisoned"))? =
            Some(contents.to_string());
        Ok(())
    }
}

//! Persistence collaborators for [`crate::MenuStore`].

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Record holding the menu document.
pub const MENU_DATA_KEY: &str = "weeklyMenuData";

/// Record holding the dish catalog.
pub const CATALOG_KEY: &str = "dishCatalog";

/// Key-value text storage for the two planner records.
pub trait StorageBackend {
    /// Read a record, `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a record.
    fn write(&mut self, key: &str, contents: &str) -> Result<(), StorageError>;
}

/// In-memory backend, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: BTreeMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record with raw text.
    #[must_use]
    pub fn with_record(mut self, key: &str, contents: impl Into<String>) -> Self {
        self.records.insert(key.to_string(), contents.into());
        self
    }

    pub fn record(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }

    /// Make every following write fail with [`StorageError::Unavailable`].
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!("write of '{key}' rejected")));
        }
        self.records.insert(key.to_string(), contents.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Stores each record as `<dir>/<key>.json`.
///
/// Writes go to a temp file that is renamed over the record, so a crash never
/// leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Io {
                    operation: "read",
                    path,
                    source: e,
                });
            }
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| StorageError::Encoding { path })
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StorageError> {
        let path = self.record_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| StorageError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;

        if let Err(error) = write_and_swap(&temp_path, &path, contents) {
            if temp_path.exists() {
                let _ = fs::remove_file(&temp_path);
            }
            return Err(error);
        }

        tracing::debug!(key, path = %path.display(), "wrote record");
        Ok(())
    }
}

/// Write `contents` to `temp_path`, sync it, and rename it over `path`.
fn write_and_swap(temp_path: &Path, path: &Path, contents: &str) -> Result<(), StorageError> {
    let mut file = File::create(temp_path).map_err(|e| StorageError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| StorageError::Io {
            operation: "write",
            path: temp_path.to_path_buf(),
            source: e,
        })?;

    file.sync_all().map_err(|e| StorageError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })?;
    drop(file);

    fs::rename(temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        temp_path: temp_path.to_path_buf(),
        target_path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_backend_round_trip() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("data"));

        assert_eq!(backend.read(MENU_DATA_KEY).unwrap(), None);
        backend.write(MENU_DATA_KEY, "{}").unwrap();
        assert_eq!(backend.read(MENU_DATA_KEY).unwrap().as_deref(), Some("{}"));
        assert!(backend.record_path(MENU_DATA_KEY).exists());
        assert!(!backend.record_path(MENU_DATA_KEY).with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path());
        let target = backend.record_path(MENU_DATA_KEY);
        fs::create_dir_all(target.join("occupied")).unwrap();

        let result = backend.write(MENU_DATA_KEY, "{}");
        assert!(matches!(
            result,
            Err(StorageError::AtomicWriteFailed { .. })
        ));
        assert!(!target.with_extension("json.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn file_backend_rejects_non_utf8_records() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        fs::write(backend.record_path(CATALOG_KEY), [0xff, 0xfe, 0x00]).unwrap();

        let result = backend.read(CATALOG_KEY);
        assert!(matches!(result, Err(StorageError::Encoding { .. })));
    }

    #[test]
    fn memory_backend_can_fail_writes() {
        let mut backend = MemoryBackend::new();
        backend.set_fail_writes(true);
        assert!(backend.write(MENU_DATA_KEY, "{}").is_err());
        assert_eq!(backend.write_count(), 0);
        assert_eq!(backend.record(MENU_DATA_KEY), None);
    }
}

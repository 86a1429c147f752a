//! Record storage for persisting client state between sessions.
//!
//! The cart and the order ledger each persist one named record. The
//! [`RecordStore`] trait is the seam between the state containers and
//! the storage medium, so tests can substitute an in-memory store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// A key-value medium holding one serialized record per fixed name.
///
/// Implementations report medium-level failures through [`StorageError`];
/// the state containers decide whether to surface or swallow them.
pub trait RecordStore {
    /// Loads a record. Returns `Ok(None)` if the record does not exist.
    fn load(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Saves a record, replacing any previous contents.
    fn save(&self, name: &str, contents: &str) -> Result<(), StorageError>;

    /// Removes a record. Removing an absent record succeeds.
    fn remove(&self, name: &str) -> Result<(), StorageError>;
}

/// File-backed record store.
///
/// Each record is one JSON file named `<record>.json` under the data
/// directory. Concurrent writers race with last-write-wins semantics.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    data_dir: PathBuf,
}

impl FileRecordStore {
    /// Creates a store rooted at the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a record name.
    pub fn path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    /// Checks if a record exists on disk.
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self, name: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(name);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }

    fn save(&self, name: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::Io(self.data_dir.clone(), e))?;

        let path = self.path(name);
        fs::write(&path, contents).map_err(|e| StorageError::Io(path, e))?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        let path = self.path(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }
}

/// In-memory record store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.borrow().get(name).cloned())
    }

    fn save(&self, name: &str, contents: &str) -> Result<(), StorageError> {
        self.records
            .borrow_mut()
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.records.borrow_mut().remove(name);
        Ok(())
    }
}

/// Errors that can occur at the storage medium.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing a record file.
    Io(PathBuf, io::Error),
    /// The medium rejected the operation (quota, disabled, ...).
    Unavailable(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::Unavailable(reason) => {
                write!(f, "Storage unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(_, e) => Some(e),
            StorageError::Unavailable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (FileRecordStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_record_path() {
        let (store, _temp) = test_store();
        assert!(store.path("cart").ends_with("cart.json"));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let (store, _temp) = test_store();
        assert!(store.load("cart").unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let store = FileRecordStore::new(nested_dir.clone());

        store.save("cart", "{}").unwrap();

        assert!(nested_dir.exists());
        assert!(store.exists("cart"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (store, _temp) = test_store();

        store.save("orders", r#"[{"orderId":"SC-1"}]"#).unwrap();
        let loaded = store.load("orders").unwrap().unwrap();
        assert_eq!(loaded, r#"[{"orderId":"SC-1"}]"#);
    }

    #[test]
    fn test_overwrite_existing_record() {
        let (store, _temp) = test_store();

        store.save("cart", "first").unwrap();
        store.save("cart", "second").unwrap();
        assert_eq!(store.load("cart").unwrap().unwrap(), "second");
    }

    #[test]
    fn test_remove_missing_record_succeeds() {
        let (store, _temp) = test_store();
        store.remove("cart").unwrap();
    }

    #[test]
    fn test_remove_deletes_record() {
        let (store, _temp) = test_store();

        store.save("cart", "{}").unwrap();
        assert!(store.exists("cart"));

        store.remove("cart").unwrap();
        assert!(!store.exists("cart"));
        assert!(store.load("cart").unwrap().is_none());
    }

    #[test]
    fn test_records_are_independent() {
        let (store, _temp) = test_store();

        store.save("cart", "cart-data").unwrap();
        store.save("orders", "order-data").unwrap();
        store.remove("cart").unwrap();

        assert_eq!(store.load("orders").unwrap().unwrap(), "order-data");
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryRecordStore::new();

        assert!(store.load("cart").unwrap().is_none());
        store.save("cart", "data").unwrap();
        assert_eq!(store.load("cart").unwrap().unwrap(), "data");

        store.remove("cart").unwrap();
        assert!(store.load("cart").unwrap().is_none());
    }
}

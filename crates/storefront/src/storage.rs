//! File-backed local storage for the fallback paths.
//!
//! Mirrors the browser's durable key/value storage: each key holds one
//! JSON-serialized array, written whole on every update. A malformed
//! payload is logged and treated as absent rather than surfaced as a
//! fault.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Fixed storage keys.
pub mod keys {
    /// Local product-list fallback cache.
    pub const PRODUCTS: &str = "loop_local_products";
}

/// A directory of JSON-array files, one per key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read the array stored under `key`.
    ///
    /// Returns `None` when the key has never been written. A payload that
    /// no longer parses is logged and also reported as `None`, so callers
    /// fall back to their default (empty cart, fresh seed).
    #[must_use]
    pub fn read_array<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read local store entry");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(values) => Some(values),
            Err(e) => {
                tracing::warn!(key, error = %e, "Malformed local store entry, treating as empty");
                None
            }
        }
    }

    /// Replace the array stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn write_array<T: Serialize>(&self, key: &str, values: &[T]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_string(values).map_err(io::Error::other)?;
        fs::write(self.path_for(key), body)
    }

    /// The directory backing this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> LocalStore {
        let dir = std::env::temp_dir().join(format!("loop-storage-{tag}-{}", uuid::Uuid::new_v4()));
        LocalStore::new(dir)
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let store = temp_store("missing");
        assert_eq!(store.read_array::<String>(keys::PRODUCTS), None);
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let store = temp_store("roundtrip");
        let values = vec!["a".to_string(), "b".to_string()];
        store.write_array(keys::PRODUCTS, &values).expect("write");
        assert_eq!(store.read_array::<String>(keys::PRODUCTS), Some(values));
    }

    #[test]
    fn test_malformed_payload_reads_as_none() {
        let store = temp_store("malformed");
        store.write_array(keys::PRODUCTS, &["ok".to_string()]).expect("write");
        std::fs::write(store.path_for(keys::PRODUCTS), "{not json").expect("corrupt");

        assert_eq!(store.read_array::<String>(keys::PRODUCTS), None);
    }

    #[test]
    fn test_write_replaces_previous_value() {
        let store = temp_store("replace");
        store.write_array(keys::PRODUCTS, &[1, 2, 3]).expect("write");
        store.write_array(keys::PRODUCTS, &[9]).expect("write");
        assert_eq!(store.read_array::<i32>(keys::PRODUCTS), Some(vec![9]));
    }
}

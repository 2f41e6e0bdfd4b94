//! Key-value persistence for client-side state.
//!
//! Values are opaque serialized strings, read and written whole. There is no
//! partial-update protocol; the compare list is small enough to rewrite on
//! every change.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::errors::{Error, Result};
use crate::io;

/// A process-independent key-value slot store.
///
/// Implementations must make a `set` visible to the next `get` on the same
/// store.
pub trait KeyValueStore: Send + Sync {
    /// Read the serialized value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` or `Error::FileSystem` when the backing storage
    /// cannot be read at all.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory store, used by tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by one JSON object in a state file.
///
/// Values that are JSON arrays or objects are embedded as JSON (so the compare
/// list appears as a plain array in the file); anything else, including JSON
/// scalars, is stored verbatim as a JSON string. A state file that is not a JSON object is treated as empty
/// and replaced on the next write.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    path: PathBuf,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>> {
        let Some(contents) = io::read_file_if_exists(&self.path)? else {
            return Ok(Map::new());
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                log::warn!(
                    "State file {} is not a JSON object; treating it as empty",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let object = self.read_object()?;
        Ok(object.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut object = self.read_object()?;
        let value = match serde_json::from_str::<Value>(value) {
            Ok(embedded @ (Value::Array(_) | Value::Object(_))) => embedded,
            _ => Value::String(value.to_string()),
        };
        object.insert(key.to_string(), value);
        let contents = serde_json::to_string_pretty(&Value::Object(object))?;
        io::write_file_atomic(&self.path, &contents)?;
        log::debug!("Wrote '{}' to {}", key, self.path.display());
        Ok(())
    }
}

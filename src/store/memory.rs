//! In-memory collaborators.
//!
//! [`MemoryParameterStore`] doubles as the file-backed configuration source:
//! a JSON object of `name -> value` pairs loads straight into it.

use super::{ObjectStore, ParameterStore};
use crate::util::error::{parameter_err, IngestError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

/// Parameter store backed by a map.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct MemoryParameterStore {
    values: BTreeMap<String, String>,
}

impl MemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Load a JSON object such as
    /// `{"/logonlogoff/s3bucket": "my-bucket", "/logonlogoff/prefixkey": "raw"}`.
    ///
    /// # Errors
    /// [`IngestError::Io`] if the file cannot be read, [`IngestError::Json`] if
    /// it is not an object of strings.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let store: Self = serde_json::from_str(&text)?;
        tracing::debug!(
            "Loaded {} parameters from {}",
            store.values.len(),
            path.display()
        );
        Ok(store)
    }
}

impl ParameterStore for MemoryParameterStore {
    fn get_parameter(&self, name: &str) -> Result<String> {
        match self.values.get(name) {
            Some(v) if !v.is_empty() => Ok(v.clone()),
            Some(_) => Err(parameter_err(name, "parameter value is empty")),
            None => Err(parameter_err(name, "parameter not found")),
        }
    }
}

/// One object captured by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Object store that keeps every write in memory.
///
/// [`MemoryObjectStore::failing`] builds one that rejects every write with
/// the given message, for exercising the storage error path.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<Vec<StoredObject>>,
    failure: Option<String>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Snapshot of all writes so far, oldest first.
    pub fn objects(&self) -> Vec<StoredObject> {
        self.lock().clone()
    }

    /// Latest object written under `bucket`/`key`.
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .iter()
            .rev()
            .find(|o| o.bucket == bucket && o.key == key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StoredObject>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(IngestError::Storage(message.clone()));
        }
        self.lock().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: body.to_vec(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

//! Collaborator seams: configuration lookup and object storage.
//!
//! The ingestor receives both as trait implementations so it can run against
//! real backends, the local filesystem, or in-memory fakes in tests.

pub mod dry_run;
pub mod env;
pub mod fs;
pub mod memory;

use crate::util::error::Result;

pub use dry_run::DryRunObjectStore;
pub use env::EnvParameterStore;
pub use fs::FsObjectStore;
pub use memory::{MemoryObjectStore, MemoryParameterStore, StoredObject};

/// Plain key-value configuration lookup.
pub trait ParameterStore: Send + Sync {
    /// Resolve `name` to its value.
    ///
    /// # Errors
    /// [`crate::util::error::IngestError::Parameter`] when the parameter is
    /// unknown or has no value.
    fn get_parameter(&self, name: &str) -> Result<String>;
}

/// Single-operation object store.
pub trait ObjectStore: Send + Sync {
    /// Write `body` under `bucket`/`key`, replacing any existing object.
    ///
    /// # Errors
    /// [`crate::util::error::IngestError::Storage`] (or `Io`) when the write
    /// does not complete.
    fn put_object(&self, bucket: &str, key: &str, body: &[u8], content_type: &str) -> Result<()>;
}

impl<T: ParameterStore + ?Sized> ParameterStore for &T {
    fn get_parameter(&self, name: &str) -> Result<String> {
        (**self).get_parameter(name)
    }
}

impl<T: ParameterStore + ?Sized> ParameterStore for Box<T> {
    fn get_parameter(&self, name: &str) -> Result<String> {
        (**self).get_parameter(name)
    }
}

impl<T: ObjectStore + ?Sized> ObjectStore for &T {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        (**self).put_object(bucket, key, body, content_type)
    }
}

impl<T: ObjectStore + ?Sized> ObjectStore for Box<T> {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        (**self).put_object(bucket, key, body, content_type)
    }
}

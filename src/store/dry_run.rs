//! Object store that only logs.
//!
//! Lets the driver run the full pipeline on a workstation without any
//! storage backend configured.

use super::ObjectStore;
use crate::util::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunObjectStore;

impl ObjectStore for DryRunObjectStore {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        tracing::info!(
            "[dry run] would put {} bytes ({}) to {}/{}",
            body.len(),
            content_type,
            bucket,
            key
        );
        Ok(())
    }
}

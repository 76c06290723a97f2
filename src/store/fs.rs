//! Filesystem-backed object store.
//!
//! Objects land at `<root>/<bucket>/<key>`, with the key's `/`-separated
//! segments mapped to directories. Useful for local runs and for feeding a
//! directory that is synced to the real bucket.

use super::ObjectStore;
use crate::util::error::{IngestError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Object store writing into a local directory tree.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map `bucket`/`key` onto a path under the root.
    ///
    /// Empty segments (leading, doubled or trailing slashes) are skipped.
    ///
    /// # Errors
    /// [`IngestError::Storage`] for `.` or `..` segments, or a key with no
    /// usable segment, since those would escape or alias the bucket directory.
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let mut path = self.root.join(checked_segment(bucket, "bucket")?);
        let mut segments = 0usize;
        for segment in key.split('/').filter(|s| !s.is_empty()) {
            path.push(checked_segment(segment, "key")?);
            segments += 1;
        }
        if segments == 0 {
            return Err(IngestError::Storage(format!(
                "object key {key:?} has no path segments"
            )));
        }
        Ok(path)
    }
}

fn checked_segment<'a>(segment: &'a str, what: &str) -> Result<&'a str> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains(['/', '\\']) {
        return Err(IngestError::Storage(format!(
            "invalid {what} segment {segment:?}"
        )));
    }
    Ok(segment)
}

impl ObjectStore for FsObjectStore {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                IngestError::Storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let file = std::fs::File::create(&path).map_err(|e| {
            IngestError::Storage(format!("Failed to create {}: {e}", path.display()))
        })?;
        let mut writer = std::io::BufWriter::new(file);
        writer
            .write_all(body)
            .map_err(|e| IngestError::Storage(format!("Failed to write object: {e}")))?;

        // Explicit flush so I/O errors are not silently swallowed by BufWriter::drop.
        writer
            .flush()
            .map_err(|e| IngestError::Storage(format!("Failed to flush object: {e}")))?;

        tracing::debug!(
            "Wrote {} bytes ({}) to {}",
            body.len(),
            content_type,
            path.display()
        );
        Ok(())
    }
}

//! Document serialisation and the object-store write.

use crate::core::event_record::EventRecord;
use crate::core::partition::StorageKey;
use crate::store::ObjectStore;
use crate::util::constants::OBJECT_CONTENT_TYPE;
use crate::util::encoding::encode_cp932;
use crate::util::error::IngestError;

/// Serialise `record` as compact `{userid, type, timestamp}` JSON, then
/// encode it as cp932. Non-ASCII characters stay literal in the JSON text.
///
/// # Errors
/// [`IngestError::Json`] if serialisation fails, [`IngestError::Encoding`] if
/// the text has characters cp932 cannot represent.
pub fn encode_document(record: &EventRecord) -> Result<Vec<u8>, IngestError> {
    let text = serde_json::to_string(record)?;
    encode_cp932(&text)
}

/// Encode `record` and write it to `bucket` under `key`. One attempt, no retry.
pub fn persist<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    key: &StorageKey,
    record: &EventRecord,
) -> Result<(), IngestError> {
    let body = encode_document(record)?;
    store.put_object(bucket, key.as_str(), &body, OBJECT_CONTENT_TYPE)?;
    tracing::debug!("Persisted {} bytes to {}/{}", body.len(), bucket, key);
    Ok(())
}

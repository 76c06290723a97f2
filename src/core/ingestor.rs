//! Request handler tying the stages together.
//!
//! Extract → validate → derive → persist → respond. Every stage runs at most
//! once; the first failure ends the invocation with its response. Nothing is
//! written unless validation passed.

use crate::core::event_record::EventRecord;
use crate::core::partition::{PartitionDate, StorageKey};
use crate::core::payload::extract_payload;
use crate::core::persister::persist;
use crate::core::response::{Response, STATUS_BAD_REQUEST, STATUS_INTERNAL_ERROR, STATUS_OK};
use crate::core::validator::{validate, Rejection};
use crate::store::{ObjectStore, ParameterStore};
use crate::util::constants::{PARAM_BUCKET, PARAM_PREFIX};
use crate::util::error::IngestError;
use serde_json::{json, Value};

/// Terminal failure of one invocation.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The payload failed a validation rule (400).
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Bucket or prefix could not be resolved (500).
    #[error("failed to get parameter {name}: {source}")]
    Configuration { name: String, source: IngestError },

    /// Encoding or writing the object failed (500).
    #[error("failed to put object to S3: {0}")]
    Storage(IngestError),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Rejected(_) => STATUS_BAD_REQUEST,
            Self::Configuration { .. } | Self::Storage(_) => STATUS_INTERNAL_ERROR,
        }
    }

    /// JSON body returned to the caller.
    pub fn to_body(&self) -> Value {
        match self {
            Self::Rejected(rejection) => rejection.to_body(),
            Self::Configuration { name, source } => json!({
                "message": "failed to get parameter",
                "name": name,
                "error": source.to_string(),
            }),
            Self::Storage(source) => json!({
                "message": "failed to put object to S3",
                "error": source.to_string(),
            }),
        }
    }

    pub fn to_response(&self) -> Response {
        Response::json(self.status_code(), &self.to_body())
    }
}

/// Where a successfully ingested event ended up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Ingested {
    pub bucket: String,
    pub key: StorageKey,
    pub date: PartitionDate,
}

/// Single-event ingestor over injected configuration and storage.
///
/// Holds no state between calls; bucket and prefix are looked up on every
/// invocation.
#[derive(Debug, Clone)]
pub struct EventIngestor<P, S> {
    params: P,
    store: S,
}

impl<P: ParameterStore, S: ObjectStore> EventIngestor<P, S> {
    pub fn new(params: P, store: S) -> Self {
        Self { params, store }
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one transport event and build the caller's response.
    pub fn handle(&self, event: Option<&Value>) -> Response {
        match self.ingest(event) {
            Ok(done) => {
                tracing::info!("Stored event for {} at {}/{}", done.date, done.bucket, done.key);
                Response::json(STATUS_OK, &json!(done))
            }
            Err(err) => {
                match &err {
                    HandlerError::Rejected(r) => tracing::warn!("Rejected event: {}", r),
                    other => tracing::error!("Ingest failed: {}", other),
                }
                err.to_response()
            }
        }
    }

    /// The pipeline behind [`EventIngestor::handle`], returning typed results.
    pub fn ingest(&self, event: Option<&Value>) -> Result<Ingested, HandlerError> {
        let payload = extract_payload(event);
        let record = validate(&payload)?;
        self.store_record(&record)
    }

    /// Derive the key for an already-validated record and persist it.
    pub fn store_record(&self, record: &EventRecord) -> Result<Ingested, HandlerError> {
        let prefix = self.parameter(PARAM_PREFIX)?;
        let key = StorageKey::build(&prefix, record);
        tracing::debug!("Derived key {} for {}", key, record.userid());

        let bucket = self.parameter(PARAM_BUCKET)?;
        persist(&self.store, &bucket, &key, record).map_err(HandlerError::Storage)?;

        Ok(Ingested {
            bucket,
            key,
            date: record.partition_date(),
        })
    }

    fn parameter(&self, name: &str) -> Result<String, HandlerError> {
        self.params
            .get_parameter(name)
            .map_err(|source| HandlerError::Configuration {
                name: name.to_string(),
                source,
            })
    }
}

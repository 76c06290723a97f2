//! Logon/logoff event ingestion.
//!
//! Validates one logon/logoff event per invocation and files it as a cp932
//! JSON object under a date-partitioned key. The binary entry point is in
//! `main.rs`; integration tests use the modules re-exported here.

pub mod core;
pub mod store;
pub mod util;

pub use crate::core::ingestor::{EventIngestor, HandlerError, Ingested};
pub use crate::core::response::Response;

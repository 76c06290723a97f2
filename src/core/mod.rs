//! Core domain modules.
//!
//! Contains the event data model, payload extraction, the validation
//! pipeline, partition/key derivation, persistence and the request handler.

pub mod event_record;
pub mod ingestor;
pub mod partition;
pub mod payload;
pub mod persister;
pub mod response;
pub mod validator;

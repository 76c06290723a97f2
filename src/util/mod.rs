//! Shared helpers: constants, error types, timestamp handling and the
//! legacy codepage encoder.

pub mod constants;
pub mod encoding;
pub mod error;
pub mod time;

//! Unified error types for the ingestor.
//!
//! Collaborator calls and I/O return `Result<T, IngestError>` so failures
//! propagate with `?`. Client-caused validation failures are not errors in
//! this sense; they are [`crate::core::validator::Rejection`]s.

/// Unified error type used by the collaborators and the driver.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// A configuration parameter could not be resolved.
    #[error("Parameter lookup failed for {name}: {reason}")]
    Parameter {
        /// Name of the parameter that was requested.
        name: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// The object store rejected or failed a write.
    #[error("Object store error: {0}")]
    Storage(String),

    /// The stored document could not be represented in the target codepage.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A timestamp string could not be turned into a calendar date-time.
    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] TimestampError),

    /// JSON (de)serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for I/O errors (file reads and writes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a `YYYY-MM-DD HH:MM:SS` string is not a real date-time.
///
/// `Display` yields the bare reason so it can be embedded in rejection
/// bodies as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// `chrono` refused the input (month 13, day 32, hour 25, ...).
    #[error("{0}")]
    Parse(#[from] chrono::ParseError),

    /// `chrono` accepts `:60` as a leap second; a business event never has one.
    #[error("second 60 is not a valid time of day")]
    LeapSecond,

    /// The date, or the business day derived from it, falls outside years
    /// 1 through 9999.
    #[error("date value out of range")]
    OutOfRange,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Build an [`IngestError::Parameter`] for the given parameter name.
pub fn parameter_err(name: impl Into<String>, reason: impl Into<String>) -> IngestError {
    IngestError::Parameter {
        name: name.into(),
        reason: reason.into(),
    }
}

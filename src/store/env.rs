//! Parameters read from environment variables.
//!
//! `/logonlogoff/s3bucket` is looked up as `LOGONLOGOFF_S3BUCKET`: the
//! leading slash is dropped, `/` and `-` become `_`, and the result is
//! upper-cased.

use super::ParameterStore;
use crate::util::error::{parameter_err, Result};

/// Parameter store over the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvParameterStore {
    var_prefix: String,
}

impl EnvParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every variable name, e.g. `TEST_` makes
    /// `/logonlogoff/s3bucket` resolve to `TEST_LOGONLOGOFF_S3BUCKET`.
    pub fn with_var_prefix(prefix: impl Into<String>) -> Self {
        Self {
            var_prefix: prefix.into(),
        }
    }

    /// Environment variable consulted for `name`.
    pub fn var_name(&self, name: &str) -> String {
        let body: String = name
            .trim_start_matches('/')
            .chars()
            .map(|c| match c {
                '/' | '-' | '.' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        format!("{}{body}", self.var_prefix)
    }
}

impl ParameterStore for EnvParameterStore {
    fn get_parameter(&self, name: &str) -> Result<String> {
        let var = self.var_name(name);
        match std::env::var(&var) {
            Ok(v) if !v.is_empty() => Ok(v),
            Ok(_) => Err(parameter_err(name, format!("{var} is empty"))),
            Err(e) => Err(parameter_err(name, format!("{var}: {e}"))),
        }
    }
}

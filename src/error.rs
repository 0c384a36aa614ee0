//! Error types
//!
//! The simulation itself never fails; only configuration loading does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The tuning document is not valid JSON for [`crate::Tuning`]
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but would break a simulation invariant
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for the few fallible edges of the core: scheduler
//! configuration and parsing display strings back into numbers.

use thiserror::Error;

/// Rejected scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("refresh interval must be positive, got {millis} ms")]
    NonPositiveInterval { millis: i64 },
}

/// A display string that does not parse back into its numeric field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid MM:SS duration: {0:?}")]
    Duration(String),

    #[error("invalid one-decimal value: {0:?}")]
    Tenths(String),

    #[error("invalid millions value: {0:?}")]
    Millions(String),

    #[error("unknown {kind} label: {label:?}")]
    Label { kind: &'static str, label: String },
}

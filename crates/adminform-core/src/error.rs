//! Error types.

use thiserror::Error;

/// Errors raised by the form-state container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field path was empty or contained an empty segment.
    #[error("invalid field path {0:?}")]
    InvalidPath(String),

    /// A path walks through a non-object value.
    #[error("field path {path:?} crosses non-object value at {segment:?}")]
    NotAnObject {
        /// Full path
        path: String,
        /// Offending segment
        segment: String,
    },

    /// Operation on a field that was never registered.
    #[error("field {0:?} is not registered")]
    UnknownField(String),

    /// The record handed to `initialize` is not a JSON object.
    #[error("record must be a JSON object, got {0}")]
    RecordNotAnObject(&'static str),
}

/// Errors raised while loading configuration or message catalogs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// File could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Parsed but semantically invalid.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Result alias for form operations.
pub type FormResult<T> = Result<T, FormError>;

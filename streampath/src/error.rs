//! Error types for the streampath library.
//!
//! Every operation is a synchronous string transform, so errors are surfaced
//! directly to the caller. Nothing in the crate logs and then drops an error.

use thiserror::Error;

/// Result type alias for operations that may fail with a streampath error.
///
/// # Examples
///
/// ```
/// use streampath::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/var/lib".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the streampath library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path argument was not string-like.
    ///
    /// Public operations accept anything that converts to an `OsStr`; values
    /// that are not valid UTF-8 cannot take part in the path algebra.
    #[error("invalid path input {path:?}: {reason}")]
    InvalidInput {
        /// Lossy rendering of the rejected value.
        path: String,
        /// The reason the value was rejected.
        reason: String,
    },

    /// Two operands carry different stream-wrapper prefixes.
    #[error("scheme mismatch: {from} vs {to}")]
    SchemeMismatch {
        /// Prefix of the first operand (defaulted to `file://`).
        from: String,
        /// Prefix of the second operand (defaulted to `file://`).
        to: String,
    },

    /// The operation is part of the adapter surface but has no implementation.
    #[error("operation not implemented: {operation}")]
    NotImplemented {
        /// Name of the operation.
        operation: &'static str,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if error was caused by a non string-like argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use streampath::Error;
    ///
    /// let err = Error::InvalidInput {
    ///     path: "bad\u{FFFD}".to_string(),
    ///     reason: "path is not valid UTF-8".to_string(),
    /// };
    /// assert!(err.is_invalid_input());
    /// ```
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Check if error reports mismatching stream-wrapper prefixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use streampath::Error;
    ///
    /// let err = Error::SchemeMismatch {
    ///     from: "glob://".to_string(),
    ///     to: "file://".to_string(),
    /// };
    /// assert!(err.is_scheme_mismatch());
    /// ```
    #[must_use]
    pub fn is_scheme_mismatch(&self) -> bool {
        matches!(self, Self::SchemeMismatch { .. })
    }
}

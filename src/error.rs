//! Unified error types for chatlens.
//!
//! Parsing and aggregation never fail on bad chat data: unparsable lines are
//! dropped and empty inputs produce empty results. [`ChatlensError`] is
//! reserved for the boundaries around that core:
//!
//! - reading and decoding an export file
//! - malformed configuration (programmer error, fails fast)
//! - writing reports

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::MessageRecord;
///
/// fn load() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred while reading an export or writing a report.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export file is not valid UTF-8.
    #[error("UTF-8 decoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A configuration value is unusable.
    ///
    /// Raised by [`AnalysisConfig::validate`](crate::config::AnalysisConfig::validate)
    /// for things like an empty keyword list or a zero top-N.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in a filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The export file exceeds the configured size limit.
    #[error("Input too large{}: {actual_size} bytes (maximum: {max_size} bytes)", path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    InputTooLarge {
        /// Maximum allowed size in bytes
        max_size: usize,
        /// Actual size encountered
        actual_size: usize,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "chat export".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an input-too-large error.
    pub fn input_too_large(max_size: usize, actual_size: usize, path: Option<PathBuf>) -> Self {
        ChatlensError::InputTooLarge {
            max_size,
            actual_size,
            path,
        }
    }

    /// Creates a UTF-8 error with a custom context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatlensError::InvalidConfig { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if the input could not be decoded.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatlensError::Utf8 { .. })
    }
}

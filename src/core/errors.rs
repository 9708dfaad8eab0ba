//! Error types for the sigil library.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! structured [`SigilError`]. Errors are raised synchronously at the call
//! site and are never recovered internally.

use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Main result type for sigil operations.
pub type Result<T> = std::result::Result<T, SigilError>;

/// Error type for all sigil operations.
#[derive(Error, Debug)]
pub enum SigilError {
    /// An argument failed validation (bad threshold, non-text input)
    #[error("Invalid argument '{argument}': {message} (got {value})")]
    InvalidArgument {
        /// Name of the offending argument
        argument: String,
        /// Rendering of the offending value
        value: String,
        /// Error description
        message: String,
    },

    /// A comparison operand was not a signature
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Type the operation requires
        expected: String,
        /// Type that was supplied
        found: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// I/O errors raised while loading or saving options
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being processed
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SigilError {
    /// Create a new invalid argument error
    pub fn invalid_argument(
        argument: impl Into<String>,
        value: impl std::fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Create a new type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Prefix the error message with caller context.
    ///
    /// Variants without a free-form message are returned unchanged.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::InvalidArgument { message, .. }
            | Self::Config { message, .. }
            | Self::Io { message, .. }
            | Self::Serialization { message, .. } => {
                *message = format!("{}: {message}", context.into());
            }
            Self::TypeMismatch { .. } => {}
        }
        self
    }
}

impl From<io::Error> for SigilError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for SigilError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for SigilError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<Utf8Error> for SigilError {
    fn from(err: Utf8Error) -> Self {
        Self::invalid_argument("text", format!("{err}"), "input is not valid UTF-8 text")
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add lazily built context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SigilError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}

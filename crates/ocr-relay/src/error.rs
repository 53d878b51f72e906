//! Error types for the OCR relay.
//!
//! All fallible operations return [`RelayError`]. Most of the core is
//! best-effort by contract (snapshot loads and writes never fail the caller),
//! so errors surface in only a few places:
//!
//! - `Validation` - malformed submit payloads and invalid configuration
//! - `Io` - startup-time file system failures (config files, bind errors)
//! - `Persistence` - snapshot write failures, logged and absorbed by the relay
//! - `Serialization` - snapshot JSON encode failures
//!
//! # Example
//!
//! ```rust
//! use ocr_relay::{RelayError, Result};
//!
//! fn non_empty(text: &str) -> Result<&str> {
//!     if text.is_empty() {
//!         return Err(RelayError::validation("text must not be empty"));
//!     }
//!     Ok(text)
//! }
//!
//! assert!(non_empty("").is_err());
//! ```
use thiserror::Error;

/// Result type alias using `RelayError`.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Main error type for all relay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl RelayError {
    error_constructor!(validation, Validation);
    error_constructor!(persistence, Persistence);

    /// Whether this error was caused by the caller's input rather than the system.
    pub fn is_validation(&self) -> bool {
        matches!(self, RelayError::Validation { .. })
    }
}

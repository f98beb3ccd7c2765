//! Error types for lead-gate
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (store, notifier)
//! - HTTP status code mapping for API integration
//! - The client-facing error body, which never leaks internal details

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for lead-gate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to clients when the email address fails the shape check
pub const INVALID_EMAIL_MESSAGE: &str = "Valid email is required";

/// Message returned to clients when the business case id is not in the catalog
pub const INVALID_BUSINESS_CASE_MESSAGE: &str = "Invalid business case";

/// Message returned to clients when the email provider rejects or fails a send
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email. Please try again.";

/// Message returned to clients for any other server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Main error type for lead-gate
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "PORT")
        key: Option<String>,
    },

    /// Email address does not have the `local@domain.tld` shape
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// Business case id is not in the catalog
    #[error("unknown business case: {0:?}")]
    InvalidBusinessCase(String),

    /// Lead store could not be read or written
    #[error("lead store error: {0}")]
    Store(#[from] StoreError),

    /// Business case document could not be read from the documents directory
    #[error("failed to read document {path}: {source}")]
    DocumentRead {
        /// Path of the document that was expected on disk
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Email provider failed to deliver the message
    #[error("notification error: {0}")]
    Notify(#[from] NotifyError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// Lead store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Existing store file could not be read before a rewrite
    #[error("failed to read lead store {path}: {source}")]
    Read {
        /// Store file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Could not create the directory holding the store file
    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Could not write or move the store file into place
    #[error("failed to write lead store {path}: {source}")]
    Write {
        /// Store file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Records could not be serialized
    #[error("failed to serialize leads: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Email delivery failures
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Request never produced a response (DNS, connect, timeout, ...)
    #[error("email provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("email provider returned status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the provider
        status: u16,
        /// Response body, as returned by the provider
        body: String,
    },

    /// Any other failure reported by a notifier implementation
    #[error("{0}")]
    Other(String),
}

/// Error body returned by every failing API endpoint
///
/// ```json
/// { "error": "Valid email is required" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    /// Create an error body with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Create the generic internal error body
    pub fn internal() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE)
    }
}

/// Convert errors to HTTP status codes for API responses
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::InvalidEmail(_) => 400,
            Error::InvalidBusinessCase(_) => 400,

            // 500 Internal Server Error - Server-side issues
            Error::Config { .. } => 500,
            Error::Store(_) => 500,
            Error::DocumentRead { .. } => 500,
            Error::Notify(_) => 500,
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InvalidEmail(_) => "invalid_email",
            Error::InvalidBusinessCase(_) => "invalid_business_case",
            Error::Store(_) => "store_error",
            Error::DocumentRead { .. } => "document_read_error",
            Error::Notify(_) => "send_failed",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        match error {
            Error::InvalidEmail(_) => ApiError::new(INVALID_EMAIL_MESSAGE),
            Error::InvalidBusinessCase(_) => ApiError::new(INVALID_BUSINESS_CASE_MESSAGE),
            Error::Notify(_) => ApiError::new(SEND_FAILED_MESSAGE),
            _ => ApiError::internal(),
        }
    }
}

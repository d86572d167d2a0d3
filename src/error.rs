//! Error handling for the admin API client

use std::fmt;
use thiserror::Error;

/// Unified error type for the admin API client
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced an HTTP response (connect failure,
    /// timeout, interrupted body)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response with the backend's status code and message
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Successful response whose body did not contain the expected entity
    #[error("Shape error: {0}")]
    Shape(String),

    /// Authentication failure (401); the stored session has been cleared
    #[error("Authentication error: {0}")]
    Auth(String),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Upload errors (malformed data URLs, unusable file parts)
    #[error("Upload error: {0}")]
    Upload(String),
}

impl Error {
    /// Create a new shape error
    pub fn shape<T: fmt::Display>(msg: T) -> Self {
        Error::Shape(msg.to_string())
    }

    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new upload error
    pub fn upload<T: fmt::Display>(msg: T) -> Self {
        Error::Upload(msg.to_string())
    }

    /// Create a new HTTP error
    pub fn http<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Http {
            status,
            message: msg.to_string(),
        }
    }

    /// Whether a read operation may retry after this error.
    ///
    /// Only failures where no HTTP response was reached qualify; an HTTP
    /// error is the backend's answer and is surfaced as-is.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// The HTTP status code, when the backend produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Auth(_) => Some(401),
            _ => None,
        }
    }
}

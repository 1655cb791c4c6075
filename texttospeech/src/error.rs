//! Error types for the Text-to-Speech client.

use thiserror::Error;

/// Canonical status names returned in the Google API error envelope.
pub mod status {
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";
}

/// Result type alias for Text-to-Speech operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Text-to-Speech operations.
#[derive(Error, Debug)]
pub enum Error {
    /// API error returned by the service.
    #[error("texttospeech: {message} (code={code}, status={status})")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding error on `audioContent`.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// No usable credentials were found.
    #[error("authentication: {0}")]
    Auth(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a new API error.
    pub fn api(code: u16, status: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Api {
            code,
            status: status.into(),
            message: message.into(),
        }
    }

    /// Returns true if the credentials were missing, expired or invalid.
    pub fn is_unauthenticated(&self) -> bool {
        match self {
            Error::Api { code, status, .. } => *code == 401 || status == status::UNAUTHENTICATED,
            Error::Auth(_) => true,
            _ => false,
        }
    }

    /// Returns true if the credentials lack access to the API or project.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::Api { code, status, .. } => {
                *code == 403 || status == status::PERMISSION_DENIED
            }
            _ => false,
        }
    }

    /// Returns true if the service rejected the request parameters.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Api { code, status, .. } => *code == 400 || status == status::INVALID_ARGUMENT,
            _ => false,
        }
    }

    /// Returns true if the service hit its quota or rate limit.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Error::Api { code, status, .. } => {
                *code == 429 || status == status::RESOURCE_EXHAUSTED
            }
            _ => false,
        }
    }

    /// Returns true if this is a server-side error.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

//! Admin client error types.

use thiserror::Error;
use turbo_catalog::CatalogError;

/// Errors surfaced by the admin API collaborators and the product form.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The API answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Local file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image exceeds the upload limit; rejected before upload.
    #[error("{file_name} is {size} bytes, larger than the {limit} byte limit")]
    ImageTooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },

    /// File extension is not a supported image type.
    #[error("unsupported image type: {0}")]
    UnsupportedImage(String),

    /// No session token available.
    #[error("not logged in")]
    NotLoggedIn,

    /// Builder or product validation failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AdminError {
    /// Whether the server rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdminError::Api { status: 401, .. } | AdminError::NotLoggedIn)
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::JsonError(e.to_string())
    }
}

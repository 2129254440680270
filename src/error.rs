//! Error types for App Store Connect API operations.

use thiserror::Error;

/// Errors that can occur during App Store Connect API operations.
#[derive(Debug, Error)]
pub enum AscError {
    /// Configuration is missing or incomplete.
    #[error("App Store Connect configuration required: {0}")]
    ConfigMissing(String),

    /// A local input failed validation before any request was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A server-supplied next-page URL was rejected before dispatch.
    ///
    /// Pagination links carry the bearer credential when followed, so only
    /// absolute URLs on an allow-listed host are accepted.
    #[error("invalid next-page URL '{url}': {reason}")]
    InvalidNextUrl { url: String, reason: String },

    /// Structured non-2xx response from the API.
    #[error("App Store Connect API error ({status}): {title}")]
    Api {
        status: u16,
        code: String,
        title: String,
        detail: Option<String>,
    },

    /// HTTP transport error (DNS, TLS, connection reset, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed response body.
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A reservation came back without any upload operations.
    ///
    /// Treated as a server contract violation; never retried.
    #[error("no upload operations returned from reservation '{reservation_id}'")]
    NoUploadOperations { reservation_id: String },

    /// One byte-range transfer failed; identifies which.
    #[error("upload operation {index} failed: {source}")]
    UploadOperation {
        index: usize,
        #[source]
        source: Box<AscError>,
    },

    /// The commit PATCH failed after every transfer succeeded.
    ///
    /// The server now holds an uploaded-but-uncommitted asset; the caller
    /// must delete reservation `reservation_id` to reconcile.
    #[error("failed to commit upload for reservation '{reservation_id}': {source}")]
    Commit {
        reservation_id: String,
        #[source]
        source: Box<AscError>,
    },
}

/// Result type alias for App Store Connect operations.
pub type Result<T> = core::result::Result<T, AscError>;

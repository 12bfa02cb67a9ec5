//! Error types for the HTTP collaborators.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while fetching templates or looking up profiles.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connect, timeout, body read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// No profile matched the requested slug.
    #[error("no profile found for slug '{slug}'")]
    ProfileNotFound { slug: String },

    /// The profile endpoint returned a body of an unexpected shape.
    #[error("unexpected profile payload from {url}: {message}")]
    UnexpectedPayload { url: String, message: String },

    /// Context serialization failed while rendering.
    #[error(transparent)]
    Render(#[from] overlay_render::RenderError),
}

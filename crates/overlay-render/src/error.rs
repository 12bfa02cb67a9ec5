//! Error types for overlay rendering.

use thiserror::Error;

/// Error type for the fallible rendering entry points.
///
/// Substitution itself cannot fail: a token that does not resolve is left in
/// the output verbatim rather than reported, and the media rewrite is a plain
/// text transform. The remaining failure mode is converting caller data into
/// the JSON context model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The context data could not be serialized to JSON.
    #[error("context serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

use thiserror::Error;

use crate::types::ContentId;

/// Top-level error type for the Notin content engine.
#[derive(Debug, Error)]
pub enum NotinError {
    /// The backing source for an identifier is missing or unreadable.
    #[error("content unavailable for '{id}': {source}")]
    ContentUnavailable {
        id: ContentId,
        #[source]
        source: anyhow::Error,
    },

    /// An identifier was requested that was never loaded into the session.
    #[error("no content loaded for '{0}'; it must be read from storage first")]
    ContentNotLoaded(ContentId),

    /// A navigation index outside `[0, len)`.
    #[error("navigation index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A non-success response from the remote Notin API.
    #[error("remote request failed: {0}")]
    RemoteRequestFailed(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

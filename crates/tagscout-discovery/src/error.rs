use thiserror::Error;

/// Failures surfaced by a rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    #[error("invalid selector \"{0}\"")]
    InvalidSelector(String),

    #[error("no page has been loaded")]
    NoPage,

    #[error("element is no longer attached to the page")]
    Detached,

    #[error("rendering session closed: {0}")]
    SessionClosed(String),

    #[error("rendering backend error: {0}")]
    Backend(String),
}

impl RenderError {
    /// `true` when the element (or the whole page) can no longer be read, as
    /// opposed to a single lookup coming back empty.
    #[must_use]
    pub fn is_element_fatal(&self) -> bool {
        matches!(self, Self::Detached | Self::SessionClosed(_))
    }

    /// `true` when the rendering session itself is gone and no further
    /// navigation on it can succeed.
    #[must_use]
    pub fn is_session_lost(&self) -> bool {
        matches!(self, Self::SessionClosed(_))
    }
}

/// Hashtag-level failures. Anything finer-grained is accumulated into the
/// crawl result's error list instead.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid hashtag \"{0}\"")]
    InvalidHashtag(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}

use tagscout_discovery::RenderError;
use thiserror::Error;

/// Errors returned by the Browserless HTTP API client.
#[derive(Debug, Error)]
pub enum BrowserlessError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Browserless answered with a non-2xx status.
    #[error("Browserless API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid Browserless URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BrowserlessError {
    /// `true` when Browserless itself could not be reached.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// `true` when the request ran out of time, either on our side or as
    /// reported by Browserless (408).
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout(),
            Self::Api { status, .. } => *status == 408,
            Self::InvalidUrl { .. } | Self::Deserialize { .. } => false,
        }
    }

    /// Maps this error onto the pipeline's rendering taxonomy. An unreachable
    /// Browserless means the session is gone; timeouts keep their meaning.
    pub(crate) fn into_render_error(self, operation: &'static str, timeout_ms: u64) -> RenderError {
        if self.is_unreachable() {
            RenderError::SessionClosed(self.to_string())
        } else if self.is_timeout() {
            RenderError::Timeout {
                operation,
                timeout_ms,
            }
        } else {
            RenderError::Backend(self.to_string())
        }
    }
}

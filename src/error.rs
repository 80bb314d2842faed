//! Rine error types

/// Rine error types
#[derive(Debug, thiserror::Error)]
pub enum RineError {
    // Single-request upstream errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    /// Response body was not a JSON object.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    // Provider errors
    /// The provider has no credentials. Expected when the community key is
    /// unset, so callers should not treat it as an incident.
    #[error("provider not configured: {0}")]
    NotConfigured(&'static str),

    #[error("all {0} endpoints failed")]
    AllEndpointsFailed(String),

    #[error("upstream error from {provider}: {source}")]
    Upstream {
        provider: String,
        #[source]
        source: Box<RineError>,
    },

    /// Every provider in the chain failed. The only error that crosses the
    /// gateway boundary; its message is safe to show to callers.
    #[error("All upstream providers failed")]
    AllProvidersFailed,

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for RineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RineError::InvalidPayload(err.to_string())
        } else {
            RineError::Http(err.to_string())
        }
    }
}

impl RineError {
    /// Whether this error is the expected "no credentials" signal rather
    /// than a real upstream failure.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, RineError::NotConfigured(_))
    }
}

/// Result type alias for Rine operations
pub type Result<T> = std::result::Result<T, RineError>;

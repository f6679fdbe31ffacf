//! Distance provider error types.

/// Errors that can occur when querying the routing API.
#[derive(Debug, thiserror::Error)]
pub enum DistanceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status without a parseable body
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The routing engine answered but found no route
    #[error("no route found ({code})")]
    NoRoute { code: String },

    /// Fewer than two usable coordinates
    #[error("need at least 2 coordinates, got {0}")]
    TooFewPoints(usize),

    /// Provider configured to fail (offline testing)
    #[error("provider unavailable")]
    Unavailable,
}

impl DistanceError {
    /// Whether the error was caused by the request timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, DistanceError::Http(e) if e.is_timeout())
    }
}

//! Crate-level error types.
//!
//! [`MercaditoError`] unifies every error source (configuration, HTTP,
//! JSON, terminal I/O) behind a single enum so callers can match on the
//! variant they care about while still using the `?` operator.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MercaditoError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum MercaditoError {
    /// A configuration value was missing, malformed, or unreadable.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed or returned an unexpected status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// The operation was abandoned because its owner went away.
    #[error("operation cancelled")]
    Cancelled,
}

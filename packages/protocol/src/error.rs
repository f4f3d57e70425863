//! Error types for protocol retrieval and extraction.
//!
//! Missing optional nodes in a protocol are never errors; extraction only
//! fails when the payload itself is not well-formed XML.

use thiserror::Error;

/// Main error type for the protocol library.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The payload is not well-formed UTF-8 XML.
    #[error("Malformed protocol document: {0}")]
    MalformedDocument(String),

    /// The document locator or the XML fetch failed or timed out.
    #[error("No protocol available: {0}")]
    RemoteUnavailable(String),

    /// A resource tag outside the known set was requested.
    #[error("Unsupported resource kind: '{0}'")]
    UnsupportedResourceKind(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An extraction task panicked or was cancelled.
    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<roxmltree::Error> for ProtocolError {
    fn from(err: roxmltree::Error) -> Self {
        Self::MalformedDocument(err.to_string())
    }
}

impl From<std::str::Utf8Error> for ProtocolError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::MalformedDocument(format!("invalid UTF-8: {err}"))
    }
}

impl ProtocolError {
    /// Whether this error means the remote protocol could not be obtained.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }
}

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

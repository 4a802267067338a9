//! # DomainError
//!
//! What can go wrong while fetching, storing or downloading photos. Each
//! variant knows the short message shown to the user in a notification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The primary error type for all gallery operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Transport-level failure (DNS, connection reset, TLS, ...)
    #[error("network error: {0}")]
    Network(String),

    /// The photo service answered 403 or 429
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Any other non-2xx status
    #[error("API Error: {0}")]
    Api(u16),

    /// The body did not decode into the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A photo id that is neither in the gallery nor in the ledger
    #[error("photo {0} not found")]
    NotFound(String),

    /// A photo without a full-resolution URL cannot be downloaded
    #[error("photo {0} has no download URL")]
    MissingDownloadUrl(String),

    /// Local key-value store failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid client construction (bad base URL, ...)
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Coarse classification carried in user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    RateLimited,
    Api,
    MalformedResponse,
    NotFound,
    Download,
    Storage,
    Configuration,
}

impl DomainError {
    /// Classifies a non-2xx HTTP status. 403 and 429 both mean the access
    /// key's hourly quota is exhausted.
    pub fn from_status(status: u16) -> Self {
        match status {
            403 | 429 => DomainError::RateLimited,
            other => DomainError::Api(other),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Network(_) => ErrorKind::Network,
            DomainError::RateLimited => ErrorKind::RateLimited,
            DomainError::Api(_) => ErrorKind::Api,
            DomainError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::MissingDownloadUrl(_) => ErrorKind::Download,
            DomainError::Storage(_) => ErrorKind::Storage,
            DomainError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Short message suitable for a transient toast.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Network(_) => "Network error. Check your connection.".to_string(),
            DomainError::MalformedResponse(_) => {
                "Unexpected response from the photo service.".to_string()
            }
            DomainError::NotFound(_) => "Photo not found.".to_string(),
            DomainError::MissingDownloadUrl(_) => "Failed to download photo".to_string(),
            other => other.to_string(),
        }
    }
}

/// A specialized Result type for gallery logic.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(DomainError::from_status(403), DomainError::RateLimited);
        assert_eq!(DomainError::from_status(429), DomainError::RateLimited);
        assert_eq!(DomainError::from_status(500), DomainError::Api(500));
        assert_eq!(DomainError::from_status(404).kind(), ErrorKind::Api);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            DomainError::RateLimited.user_message(),
            "Rate limit exceeded. Please try again later."
        );
        assert_eq!(DomainError::Api(502).user_message(), "API Error: 502");
    }
}

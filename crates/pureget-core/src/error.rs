//! Error types for pureget core

use thiserror::Error;

/// Errors that can occur while resolving a package
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("App not found")]
    AppNotFound,

    #[error("Download link not found")]
    DownloadLinkNotFound,

    #[error("{0}")]
    InvalidArguments(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("{0}")]
    Unexpected(String),
}

impl ResolveError {
    /// Check if this error is a clean "nothing there" outcome rather than a fault
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResolveError::AppNotFound | ResolveError::DownloadLinkNotFound
        )
    }
}

impl From<url::ParseError> for ResolveError {
    fn from(error: url::ParseError) -> Self {
        ResolveError::InvalidUrl(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(ResolveError::AppNotFound.to_string(), "App not found");
        assert_eq!(
            ResolveError::DownloadLinkNotFound.to_string(),
            "Download link not found"
        );
        assert!(ResolveError::AppNotFound.is_not_found());
        assert!(!ResolveError::UnexpectedStatus(503).is_not_found());
    }
}

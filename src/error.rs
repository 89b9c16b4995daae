//! Error types for the movie browser.

use std::fmt;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause attached to a failed catalog fetch.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Catalog capability that produced a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOperation {
    Trending,
    Search,
    Detail,
    Genres,
    Discover,
}

impl fmt::Display for FetchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchOperation::Trending => "trending",
            FetchOperation::Search => "search",
            FetchOperation::Detail => "detail",
            FetchOperation::Genres => "genres",
            FetchOperation::Discover => "discover",
        };
        f.write_str(name)
    }
}

/// Main error type for the movie browser.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    TmdbApiKeyMissing,

    // Catalog errors
    #[error("{operation} fetch failed: {message}")]
    FetchFailed {
        operation: FetchOperation,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    // Session errors
    #[error("Login failed: {0}")]
    LoginRejected(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a fetch failure with an attached cause.
    pub fn fetch<E>(operation: FetchOperation, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        let source = source.into();
        Error::FetchFailed {
            operation,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a fetch failure from a message only (e.g. a non-2xx status).
    pub fn fetch_message<S: Into<String>>(operation: FetchOperation, message: S) -> Self {
        Error::FetchFailed {
            operation,
            message: message.into(),
            source: None,
        }
    }

    /// Operation that failed, if this is a catalog fetch failure.
    pub fn fetch_operation(&self) -> Option<FetchOperation> {
        match self {
            Error::FetchFailed { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_display_names_operation() {
        let err = Error::fetch_message(FetchOperation::Search, "HTTP 500");
        assert_eq!(err.to_string(), "search fetch failed: HTTP 500");
        assert_eq!(err.fetch_operation(), Some(FetchOperation::Search));
    }

    #[test]
    fn test_fetch_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = Error::fetch(FetchOperation::Trending, io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_non_fetch_error_has_no_operation() {
        assert_eq!(Error::other("boom").fetch_operation(), None);
    }
}

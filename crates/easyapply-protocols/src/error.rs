//! Error types for the capability layer.

use thiserror::Error;

/// Failures reported by a browser backend.
///
/// Absence of an element is never an error; lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Session closed")]
    SessionClosed,

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl BrowserError {
    /// Whether the underlying session is gone and nothing further can succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BrowserError::ConnectionFailed(_) | BrowserError::NotConnected | BrowserError::SessionClosed
        )
    }
}

/// Failures reported by a fallback resolver.
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("Fallback request failed: {0}")]
    Request(String),

    #[error("Fallback API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Fallback returned no answer")]
    EmptyAnswer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(BrowserError::SessionClosed.is_fatal());
        assert!(BrowserError::NotConnected.is_fatal());
        assert!(BrowserError::ConnectionFailed("refused".to_string()).is_fatal());

        assert!(!BrowserError::ElementNotFound("#x".to_string()).is_fatal());
        assert!(!BrowserError::ActionFailed("detached".to_string()).is_fatal());
        assert!(!BrowserError::Timeout("click".to_string()).is_fatal());
        assert!(!BrowserError::JavaScript("boom".to_string()).is_fatal());
    }

    #[test]
    fn test_browser_error_display() {
        let err = BrowserError::NavigationFailed("net::ERR_NAME_NOT_RESOLVED".to_string());
        assert!(err.to_string().contains("Navigation failed"));
        assert!(err.to_string().contains("ERR_NAME_NOT_RESOLVED"));
    }

    #[test]
    fn test_fallback_api_error_display() {
        let err = FallbackError::Api {
            status: 429,
            message: "rate limited".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("429"));
        assert!(display.contains("rate limited"));
    }
}

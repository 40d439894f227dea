//! Engine errors.

use thiserror::Error;

use easyapply_protocols::BrowserError;

/// Failure of one discovery call.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Results container not found: {0}")]
    ContainerNotFound(String),

    /// Zero job cards after scrolling. The campaign treats this as the end
    /// of the results feed.
    #[error("No jobs found at offset {offset}")]
    NoJobs { offset: u32 },

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Browser(#[from] BrowserError),
}

impl DiscoveryError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DiscoveryError::Browser(e) if e.is_fatal())
    }
}

/// Failure that ends a campaign or login.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Profile has no {0}")]
    EmptyProfile(&'static str),

    #[error("Login failed: {0}")]
    Login(String),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_error_display() {
        let err = DiscoveryError::NoJobs { offset: 50 };
        assert_eq!(err.to_string(), "No jobs found at offset 50");

        let err = DiscoveryError::ContainerNotFound(".scaffold-layout__list".to_string());
        assert!(err.to_string().contains(".scaffold-layout__list"));
    }

    #[test]
    fn test_discovery_error_fatal() {
        assert!(DiscoveryError::Browser(BrowserError::SessionClosed).is_fatal());
        assert!(!DiscoveryError::Browser(BrowserError::Timeout("x".into())).is_fatal());
        assert!(!DiscoveryError::NoJobs { offset: 0 }.is_fatal());
    }

    #[test]
    fn test_engine_error_from() {
        let err: EngineError = BrowserError::NotConnected.into();
        assert!(matches!(err, EngineError::Browser(BrowserError::NotConnected)));

        let err: EngineError = DiscoveryError::NoJobs { offset: 25 }.into();
        assert!(err.to_string().contains("offset 25"));

        assert_eq!(
            EngineError::EmptyProfile("positions").to_string(),
            "Profile has no positions"
        );
    }
}

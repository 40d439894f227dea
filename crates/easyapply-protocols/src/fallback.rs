//! Fallback decision source for form fields the heuristics cannot classify.

use async_trait::async_trait;

use crate::error::FallbackError;

/// Injected answer generator, e.g. a language-model client.
///
/// Consulted only after every keyword rule has missed. An error or an empty
/// answer makes the caller fall through to its numeric default.
#[async_trait]
pub trait FallbackResolver: Send + Sync {
    async fn answer(&self, label: &str, input_type: &str) -> Result<String, FallbackError>;
}

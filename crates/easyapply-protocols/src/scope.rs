//! Queryable DOM regions and the elements inside them.
//!
//! A [`Scope`] is the main document, an embedded (iframe) document, or an
//! encapsulated (shadow) sub-tree. The engine only ever asks a scope for
//! matches; it never assumes which document a scope belongs to.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::BrowserError;
use crate::locator::{Key, Locator};

/// Interval between probes in [`Scope::wait_for`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub type ScopeHandle = Arc<dyn Scope>;
pub type ElementHandle = Arc<dyn Element>;

/// A queryable DOM region.
#[async_trait]
pub trait Scope: Send + Sync {
    /// First element matching the locator, or `None`.
    async fn find_one(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError>;

    /// All elements matching the locator, in document order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError>;

    /// Scopes for every embedded document reachable from this one.
    async fn embedded_scopes(&self) -> Result<Vec<ScopeHandle>, BrowserError>;

    /// Dispatch a key press to whatever is focused inside this scope.
    async fn press_key(&self, key: Key) -> Result<(), BrowserError>;

    /// Poll [`Scope::find_one`] until it matches or `timeout` elapses.
    ///
    /// A zero timeout performs exactly one probe.
    async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Option<ElementHandle>, BrowserError> {
        let start = Instant::now();
        loop {
            if let Some(element) = self.find_one(locator).await? {
                return Ok(Some(element));
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Ok(None);
            }
            tokio::time::sleep(DEFAULT_POLL_INTERVAL.min(timeout - elapsed)).await;
        }
    }
}

/// A live element.
#[async_trait]
pub trait Element: Send + Sync {
    /// Attribute value, `None` when the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError>;

    /// Rendered text content.
    async fn text(&self) -> Result<String, BrowserError>;

    async fn click(&self) -> Result<(), BrowserError>;

    async fn focus(&self) -> Result<(), BrowserError>;

    async fn scroll_into_view(&self) -> Result<(), BrowserError>;

    /// Replace the current value with `text`.
    async fn clear_and_type(&self, text: &str) -> Result<(), BrowserError>;

    /// First non-empty line of the nearest `fieldset` or `div` ancestor
    /// that has any text, walking at most `max_levels` parents.
    async fn group_text(&self, max_levels: usize) -> Result<Option<String>, BrowserError>;

    /// The element's encapsulated sub-tree, if it hosts one.
    async fn shadow_root(&self) -> Result<Option<ScopeHandle>, BrowserError>;
}

/// The main document of the controlled page.
#[async_trait]
pub trait BrowserPage: Scope {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Wait until the page's network activity settles.
    async fn wait_for_idle(&self) -> Result<(), BrowserError>;

    /// Serialized markup of the whole document.
    async fn content(&self) -> Result<String, BrowserError>;

    /// Hover the container and scroll it by `delta_y` pixels.
    ///
    /// Returns `false` when the container is not present.
    async fn scroll_container(&self, container: &Locator, delta_y: f64) -> Result<bool, BrowserError>;
}

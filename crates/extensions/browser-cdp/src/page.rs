//! CDP implementation of the `BrowserPage` capability.

use std::sync::Arc;

use async_trait::async_trait;
use easyapply_protocols::{BrowserError, BrowserPage, ElementHandle, Key, Locator, Scope, ScopeHandle};
use tracing::debug;

use crate::cdp::PageSession;
use crate::scope::CdpScope;

/// One browser tab, queried through its top document.
#[derive(Clone)]
pub struct CdpPage {
    session: Arc<PageSession>,
    document: CdpScope,
}

impl CdpPage {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self {
            document: CdpScope::top(session.clone()),
            session,
        }
    }

    pub fn session(&self) -> &Arc<PageSession> {
        &self.session
    }

    /// Current URL of the tab.
    pub async fn url(&self) -> Result<String, BrowserError> {
        Ok(self.session.get_url().await?)
    }
}

#[async_trait]
impl Scope for CdpPage {
    async fn find_one(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        self.document.find_one(locator).await
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError> {
        self.document.find_all(locator).await
    }

    async fn embedded_scopes(&self) -> Result<Vec<ScopeHandle>, BrowserError> {
        self.document.embedded_scopes().await
    }

    async fn press_key(&self, key: Key) -> Result<(), BrowserError> {
        self.document.press_key(key).await
    }
}

#[async_trait]
impl BrowserPage for CdpPage {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.session.navigate(url).await?;
        Ok(())
    }

    async fn wait_for_idle(&self) -> Result<(), BrowserError> {
        self.session.wait_for_network_idle().await?;
        Ok(())
    }

    async fn content(&self) -> Result<String, BrowserError> {
        Ok(self.session.get_content().await?)
    }

    async fn scroll_container(&self, container: &Locator, delta_y: f64) -> Result<bool, BrowserError> {
        let Some(element) = self.document.find_element(container).await? else {
            return Ok(false);
        };

        match element.center().await? {
            Some((x, y)) => {
                self.session.mouse_move(x, y).await?;
                self.session.scroll(x, y, 0.0, delta_y).await?;
            }
            None => {
                debug!(%container, "Container has no layout box, scrolling by script");
                element.scroll_by(delta_y).await?;
            }
        }
        Ok(true)
    }
}

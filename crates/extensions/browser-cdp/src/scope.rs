//! CDP implementation of the `Scope` and `Element` capabilities.

use std::sync::Arc;

use async_trait::async_trait;
use easyapply_protocols::{BrowserError, Element, ElementHandle, Key, Locator, Scope, ScopeHandle};
use serde_json::json;
use tracing::debug;

use crate::cdp::{CdpError, PageSession};
use crate::scripts;

/// Where a scope's queries start.
#[derive(Debug, Clone)]
enum Root {
    /// The top frame's current `document`, re-resolved on every query so
    /// the scope survives navigation.
    TopDocument,
    /// A fixed remote object: an iframe document or a shadow root.
    Object(String),
}

/// A search root inside the page: the top document, a same-origin iframe
/// document, or a shadow root.
#[derive(Clone)]
pub struct CdpScope {
    session: Arc<PageSession>,
    root: Root,
    top_frame: bool,
}

impl CdpScope {
    /// Scope over the top document of the session's page.
    pub fn top(session: Arc<PageSession>) -> Self {
        Self {
            session,
            root: Root::TopDocument,
            top_frame: true,
        }
    }

    fn object(session: Arc<PageSession>, object_id: String, top_frame: bool) -> Self {
        Self {
            session,
            root: Root::Object(object_id),
            top_frame,
        }
    }

    async fn root_id(&self) -> Result<String, CdpError> {
        match &self.root {
            Root::Object(id) => Ok(id.clone()),
            Root::TopDocument => self
                .session
                .evaluate_handle(scripts::TOP_DOCUMENT)
                .await?
                .object_id
                .ok_or_else(|| CdpError::InvalidResponse("document has no object id".to_string())),
        }
    }

    fn element(&self, object_id: String) -> CdpElement {
        CdpElement {
            session: self.session.clone(),
            object_id,
            top_frame: self.top_frame,
        }
    }

    /// First match as a concrete element.
    pub(crate) async fn find_element(&self, locator: &Locator) -> Result<Option<CdpElement>, CdpError> {
        let root = self.root_id().await?;
        let found = self
            .session
            .call_function_handle(&root, scripts::QUERY_ONE, scripts::query_args(locator))
            .await?;
        debug!(%locator, found = found.node_id().is_some(), "find_one");
        Ok(found.node_id().map(|id| self.element(id.to_string())))
    }
}

#[async_trait]
impl Scope for CdpScope {
    async fn find_one(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        Ok(self
            .find_element(locator)
            .await?
            .map(|e| Arc::new(e) as ElementHandle))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError> {
        let root = self.root_id().await?;
        let ids = self
            .session
            .call_function_nodes(&root, scripts::QUERY_ALL, scripts::query_args(locator))
            .await?;
        debug!(%locator, found = ids.len(), "find_all");
        Ok(ids
            .into_iter()
            .map(|id| Arc::new(self.element(id)) as ElementHandle)
            .collect())
    }

    async fn embedded_scopes(&self) -> Result<Vec<ScopeHandle>, BrowserError> {
        let root = self.root_id().await?;
        let ids = self
            .session
            .call_function_nodes(&root, scripts::FRAME_DOCUMENTS, Vec::new())
            .await?;
        Ok(ids
            .into_iter()
            .map(|id| Arc::new(CdpScope::object(self.session.clone(), id, false)) as ScopeHandle)
            .collect())
    }

    async fn press_key(&self, key: Key) -> Result<(), BrowserError> {
        self.session.press_key(key).await?;
        Ok(())
    }
}

/// A live element, held as a Runtime remote object.
pub struct CdpElement {
    session: Arc<PageSession>,
    object_id: String,
    /// Whether viewport coordinates from the box model are usable for
    /// trusted mouse input.
    top_frame: bool,
}

impl CdpElement {
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Viewport center of the element, `None` when it has no layout box.
    pub(crate) async fn center(&self) -> Result<Option<(f64, f64)>, CdpError> {
        self.session.element_center(&self.object_id).await
    }

    pub(crate) async fn scroll_by(&self, delta_y: f64) -> Result<(), CdpError> {
        self.session
            .call_function_on(
                &self.object_id,
                "function(dy) { this.scrollBy(0, dy); }",
                vec![json!(delta_y)],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Element for CdpElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        let value = self
            .session
            .call_function_on(&self.object_id, scripts::GET_ATTRIBUTE, vec![json!(name)])
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn text(&self) -> Result<String, BrowserError> {
        let value = self
            .session
            .call_function_on(&self.object_id, scripts::INNER_TEXT, Vec::new())
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn click(&self) -> Result<(), BrowserError> {
        if self.top_frame {
            self.session.scroll_into_view(&self.object_id).await?;
            if let Some((x, y)) = self.center().await? {
                self.session.click(x, y).await?;
                return Ok(());
            }
            debug!("Element has no layout box, falling back to script click");
        }
        self.session
            .call_function_on(&self.object_id, scripts::JS_CLICK, Vec::new())
            .await?;
        Ok(())
    }

    async fn focus(&self) -> Result<(), BrowserError> {
        self.session.focus(&self.object_id).await?;
        Ok(())
    }

    async fn scroll_into_view(&self) -> Result<(), BrowserError> {
        self.session.scroll_into_view(&self.object_id).await?;
        Ok(())
    }

    async fn clear_and_type(&self, text: &str) -> Result<(), BrowserError> {
        self.session
            .call_function_on(&self.object_id, scripts::CLEAR_VALUE, Vec::new())
            .await?;
        self.session.type_text(text).await?;
        Ok(())
    }

    async fn group_text(&self, max_levels: usize) -> Result<Option<String>, BrowserError> {
        let value = self
            .session
            .call_function_on(&self.object_id, scripts::GROUP_TEXT, vec![json!(max_levels)])
            .await?;
        Ok(value
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string))
    }

    async fn shadow_root(&self) -> Result<Option<ScopeHandle>, BrowserError> {
        let root = self
            .session
            .call_function_handle(&self.object_id, scripts::SHADOW_ROOT, Vec::new())
            .await?;
        Ok(root.node_id().map(|id| {
            Arc::new(CdpScope::object(self.session.clone(), id.to_string(), self.top_frame))
                as ScopeHandle
        }))
    }
}

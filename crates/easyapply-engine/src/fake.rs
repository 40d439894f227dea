//! In-memory DOM used by the engine tests.
//!
//! Elements are registered under the exact locator query the engine uses
//! (`Locator::query`), so lookups are plain string matches. Every
//! interaction is appended to a shared event log for ordering assertions.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use parking_lot::Mutex;

use easyapply_protocols::{
    BrowserError, BrowserPage, Element, ElementHandle, Key, Locator, Scope, ScopeHandle,
};

pub(crate) type EventLog = Arc<Mutex<Vec<String>>>;
type Effect = Box<dyn Fn() + Send + Sync>;

pub(crate) fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) struct FakeElement {
    name: String,
    attrs: Mutex<HashMap<String, String>>,
    text: String,
    group_text: Option<String>,
    shadow: Option<Arc<FakeScope>>,
    on_click: Mutex<Option<Effect>>,
    on_type: Mutex<Option<Effect>>,
    type_error: Option<fn() -> BrowserError>,
    click_error: Option<fn() -> BrowserError>,
    owner: Mutex<Weak<FakeScope>>,
}

impl FakeElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Mutex::new(HashMap::new()),
            text: String::new(),
            group_text: None,
            shadow: None,
            on_click: Mutex::new(None),
            on_type: Mutex::new(None),
            type_error: None,
            click_error: None,
            owner: Mutex::new(Weak::new()),
        }
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.attrs.lock().insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn group(mut self, text: &str) -> Self {
        self.group_text = Some(text.to_string());
        self
    }

    pub fn shadow(mut self, scope: Arc<FakeScope>) -> Self {
        self.shadow = Some(scope);
        self
    }

    pub fn failing_type(mut self, error: fn() -> BrowserError) -> Self {
        self.type_error = Some(error);
        self
    }

    pub fn failing_click(mut self, error: fn() -> BrowserError) -> Self {
        self.click_error = Some(error);
        self
    }

    pub fn value(&self) -> Option<String> {
        self.attrs.lock().get("value").cloned()
    }

    /// Run `effect` whenever the element is clicked or confirmed with Enter.
    pub fn on_click(&self, effect: impl Fn() + Send + Sync + 'static) {
        *self.on_click.lock() = Some(Box::new(effect));
    }

    /// Run `effect` after every successful `clear_and_type`.
    pub fn on_type(&self, effect: impl Fn() + Send + Sync + 'static) {
        *self.on_type.lock() = Some(Box::new(effect));
    }

    fn fire(&self) {
        if let Some(effect) = self.on_click.lock().as_ref() {
            effect();
        }
    }

    fn record(&self, event: String) {
        if let Some(owner) = self.owner.lock().upgrade() {
            owner.record(event);
        }
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        Ok(self.attrs.lock().get(name).cloned())
    }

    async fn text(&self) -> Result<String, BrowserError> {
        Ok(self.text.clone())
    }

    async fn click(&self) -> Result<(), BrowserError> {
        if let Some(error) = self.click_error {
            return Err(error());
        }
        self.record(format!("click:{}", self.name));
        self.fire();
        Ok(())
    }

    async fn focus(&self) -> Result<(), BrowserError> {
        self.record(format!("focus:{}", self.name));
        if let Some(owner) = self.owner.lock().upgrade() {
            *owner.focused.lock() = Some(self.name.clone());
        }
        Ok(())
    }

    async fn scroll_into_view(&self) -> Result<(), BrowserError> {
        self.record(format!("scroll:{}", self.name));
        Ok(())
    }

    async fn clear_and_type(&self, text: &str) -> Result<(), BrowserError> {
        if let Some(error) = self.type_error {
            return Err(error());
        }
        self.record(format!("type:{}={}", self.name, text));
        self.attrs
            .lock()
            .insert("value".to_string(), text.to_string());
        if let Some(effect) = self.on_type.lock().as_ref() {
            effect();
        }
        Ok(())
    }

    async fn group_text(&self, _max_levels: usize) -> Result<Option<String>, BrowserError> {
        Ok(self.group_text.clone())
    }

    async fn shadow_root(&self) -> Result<Option<ScopeHandle>, BrowserError> {
        Ok(self.shadow.clone().map(|s| s as ScopeHandle))
    }
}

pub(crate) struct FakeScope {
    name: String,
    log: EventLog,
    entries: Mutex<Vec<(String, Arc<FakeElement>)>>,
    embedded: Mutex<Vec<Arc<FakeScope>>>,
    focused: Mutex<Option<String>>,
    query_error: Mutex<Option<fn() -> BrowserError>>,
}

impl FakeScope {
    pub fn new(name: &str, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            log: log.clone(),
            entries: Mutex::new(Vec::new()),
            embedded: Mutex::new(Vec::new()),
            focused: Mutex::new(None),
            query_error: Mutex::new(None),
        })
    }

    /// Register `element` as a match for `query`.
    pub fn add(self: &Arc<Self>, query: &str, element: FakeElement) -> Arc<FakeElement> {
        let element = Arc::new(element);
        self.insert(query, element.clone());
        element
    }

    pub fn insert(self: &Arc<Self>, query: &str, element: Arc<FakeElement>) {
        *element.owner.lock() = Arc::downgrade(self);
        self.entries.lock().push((query.to_string(), element));
    }

    pub fn remove(&self, query: &str) {
        self.entries.lock().retain(|(q, _)| q != query);
    }

    pub fn embed(&self, scope: Arc<FakeScope>) {
        self.embedded.lock().push(scope);
    }

    /// Make every subsequent lookup fail with `error`.
    pub fn fail_queries(&self, error: fn() -> BrowserError) {
        *self.query_error.lock() = Some(error);
    }

    pub fn record(&self, event: String) {
        self.log.lock().push(event);
    }

    pub fn log_snapshot(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn check(&self) -> Result<(), BrowserError> {
        match *self.query_error.lock() {
            Some(error) => Err(error()),
            None => Ok(()),
        }
    }

    fn matches(&self, locator: &Locator) -> Vec<Arc<FakeElement>> {
        self.entries
            .lock()
            .iter()
            .filter(|(q, _)| q == locator.query.as_ref())
            .map(|(_, e)| e.clone())
            .collect()
    }
}

#[async_trait]
impl Scope for FakeScope {
    async fn find_one(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        self.check()?;
        Ok(self
            .matches(locator)
            .into_iter()
            .next()
            .map(|e| e as ElementHandle))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError> {
        self.check()?;
        Ok(self
            .matches(locator)
            .into_iter()
            .map(|e| e as ElementHandle)
            .collect())
    }

    async fn embedded_scopes(&self) -> Result<Vec<ScopeHandle>, BrowserError> {
        self.check()?;
        Ok(self
            .embedded
            .lock()
            .iter()
            .map(|s| s.clone() as ScopeHandle)
            .collect())
    }

    async fn press_key(&self, key: Key) -> Result<(), BrowserError> {
        self.record(format!("press:{}:{}", self.name, key.name()));
        if key != Key::Enter {
            return Ok(());
        }
        let focused = self.focused.lock().clone();
        let target = focused.and_then(|name| {
            self.entries
                .lock()
                .iter()
                .find(|(_, e)| e.name == name)
                .map(|(_, e)| e.clone())
        });
        if let Some(element) = target {
            element.fire();
        }
        Ok(())
    }
}

/// Page over a [`FakeScope`] main document with canned markup per URL.
pub(crate) struct FakePage {
    pub main: Arc<FakeScope>,
    log: EventLog,
    url: Mutex<String>,
    routes: Mutex<Vec<(String, String)>>,
    navigate_effects: Mutex<Vec<(String, Effect)>>,
}

impl FakePage {
    pub fn new() -> Self {
        let log = new_log();
        Self {
            main: FakeScope::new("main", &log),
            log,
            url: Mutex::new(String::new()),
            routes: Mutex::new(Vec::new()),
            navigate_effects: Mutex::new(Vec::new()),
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn events(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    /// Serve `html` from [`BrowserPage::content`] while the current URL
    /// contains `fragment`.
    pub fn route(&self, fragment: &str, html: &str) {
        self.routes
            .lock()
            .push((fragment.to_string(), html.to_string()));
    }

    /// Run `effect` after navigating to any URL containing `fragment`.
    pub fn on_navigate(&self, fragment: &str, effect: impl Fn() + Send + Sync + 'static) {
        self.navigate_effects
            .lock()
            .push((fragment.to_string(), Box::new(effect)));
    }

    pub fn current_url(&self) -> String {
        self.url.lock().clone()
    }
}

#[async_trait]
impl Scope for FakePage {
    async fn find_one(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        self.main.find_one(locator).await
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError> {
        self.main.find_all(locator).await
    }

    async fn embedded_scopes(&self) -> Result<Vec<ScopeHandle>, BrowserError> {
        self.main.embedded_scopes().await
    }

    async fn press_key(&self, key: Key) -> Result<(), BrowserError> {
        self.main.press_key(key).await
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.main.check()?;
        self.log.lock().push(format!("navigate:{url}"));
        *self.url.lock() = url.to_string();
        for (fragment, effect) in self.navigate_effects.lock().iter() {
            if url.contains(fragment.as_str()) {
                effect();
            }
        }
        Ok(())
    }

    async fn wait_for_idle(&self) -> Result<(), BrowserError> {
        self.main.check()
    }

    async fn content(&self) -> Result<String, BrowserError> {
        self.main.check()?;
        let url = self.url.lock().clone();
        Ok(self
            .routes
            .lock()
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, html)| html.clone())
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    async fn scroll_container(&self, container: &Locator, delta_y: f64) -> Result<bool, BrowserError> {
        if self.main.find_one(container).await?.is_none() {
            return Ok(false);
        }
        self.log.lock().push(format!("wheel:{delta_y}"));
        Ok(true)
    }
}

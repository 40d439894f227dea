//! Inline validation error detection.

use std::time::Duration;

use easyapply_protocols::{BrowserError, Locator, Scope, ScopeHandle};

use crate::probe::{absent_unless_fatal, empty_unless_fatal};

/// Icon the site renders next to a field that failed validation.
pub const ERROR_MARKER: Locator = Locator::css(".artdeco-inline-feedback__icon");

/// Host element of the application modal inside an embedded document.
pub const MODAL_HOST: Locator = Locator::css(".jobs-easy-apply-modal");

/// Where inline errors were found.
#[derive(Default)]
pub struct ErrorLocations {
    /// The marker is in the main document.
    pub main: bool,
    /// Encapsulated sub-trees of embedded modals that need a fill pass.
    pub modal_roots: Vec<ScopeHandle>,
    /// Embedded documents showing the marker without an encapsulated modal.
    pub embedded: usize,
}

impl ErrorLocations {
    pub fn any(&self) -> bool {
        self.main || !self.modal_roots.is_empty() || self.embedded > 0
    }
}

/// Checks the main document, then every embedded document and the
/// encapsulated sub-tree of its modal host.
#[derive(Debug, Clone, Copy)]
pub struct ErrorDetector {
    timeout: Duration,
}

impl ErrorDetector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Whether any inline error marker is showing.
    pub async fn has_errors<S>(&self, scope: &S) -> Result<bool, BrowserError>
    where
        S: Scope + ?Sized,
    {
        if absent_unless_fatal(scope.wait_for(&ERROR_MARKER, self.timeout).await, "error marker")?
            .is_some()
        {
            return Ok(true);
        }

        for embedded in embedded_scopes(scope).await? {
            if marker_in(&*embedded).await? {
                return Ok(true);
            }
            if let Some(root) = modal_root(&*embedded).await? {
                if marker_in(&*root).await? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Every place showing the marker, probing each scope once.
    pub async fn locate<S>(&self, scope: &S) -> Result<ErrorLocations, BrowserError>
    where
        S: Scope + ?Sized,
    {
        let mut found = ErrorLocations {
            main: marker_in(scope).await?,
            ..Default::default()
        };

        for embedded in embedded_scopes(scope).await? {
            let in_document = marker_in(&*embedded).await?;
            match modal_root(&*embedded).await? {
                Some(root) => {
                    if in_document || marker_in(&*root).await? {
                        found.modal_roots.push(root);
                    }
                }
                None if in_document => found.embedded += 1,
                None => {}
            }
        }
        Ok(found)
    }
}

async fn marker_in<S>(scope: &S) -> Result<bool, BrowserError>
where
    S: Scope + ?Sized,
{
    Ok(absent_unless_fatal(scope.find_one(&ERROR_MARKER).await, "error marker")?.is_some())
}

async fn embedded_scopes<S>(scope: &S) -> Result<Vec<ScopeHandle>, BrowserError>
where
    S: Scope + ?Sized,
{
    empty_unless_fatal(scope.embedded_scopes().await, "embedded scopes")
}

/// Encapsulated sub-tree of the modal host, if the scope has one.
async fn modal_root<S>(scope: &S) -> Result<Option<ScopeHandle>, BrowserError>
where
    S: Scope + ?Sized,
{
    let Some(host) = absent_unless_fatal(scope.find_one(&MODAL_HOST).await, "modal host")? else {
        return Ok(None);
    };
    absent_unless_fatal(host.shadow_root().await, "modal shadow root")
}

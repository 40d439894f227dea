//! Label discovery for form controls.
//!
//! The target form rarely ties labels to inputs with `for`, so several
//! sources are tried in a fixed order and the first non-empty one wins.

use std::time::Duration;

use tracing::debug;

use easyapply_protocols::{BrowserError, Element, Locator, Scope};

/// Ancestor levels walked by the structural fallback.
pub const GROUP_TEXT_LEVELS: usize = 4;

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn ok_or_log<T>(result: Result<Option<T>, BrowserError>, source: &str) -> Option<T> {
    result.unwrap_or_else(|e| {
        debug!(source, error = %e, "Label source failed");
        None
    })
}

/// Best human-readable label for `input`, or an empty string.
///
/// Order: `label[for=id]`, `aria-label`, `placeholder`, `aria-labelledby`
/// targets joined by a space, then the first line of the nearest
/// `fieldset`/`div` ancestor.
pub async fn best_label<S>(scope: &S, input: &dyn Element, timeout: Duration) -> String
where
    S: Scope + ?Sized,
{
    if let Some(id) = non_empty(ok_or_log(input.attribute("id").await, "id")) {
        if let Some(label) = text_of(scope, &Locator::label_for(&id), timeout).await {
            return label;
        }
    }

    if let Some(label) = non_empty(ok_or_log(input.attribute("aria-label").await, "aria-label")) {
        return label;
    }

    if let Some(label) = non_empty(ok_or_log(input.attribute("placeholder").await, "placeholder")) {
        return label;
    }

    if let Some(ids) = non_empty(ok_or_log(
        input.attribute("aria-labelledby").await,
        "aria-labelledby",
    )) {
        let mut parts = Vec::new();
        for id in ids.split_whitespace() {
            if let Some(text) = text_of(scope, &Locator::by_id(id), timeout).await {
                parts.push(text);
            }
        }
        if !parts.is_empty() {
            return parts.join(" ");
        }
    }

    non_empty(ok_or_log(input.group_text(GROUP_TEXT_LEVELS).await, "group")).unwrap_or_default()
}

/// Trimmed text of the first match, `None` when absent or blank.
async fn text_of<S>(scope: &S, locator: &Locator, timeout: Duration) -> Option<String>
where
    S: Scope + ?Sized,
{
    let element = ok_or_log(scope.wait_for(locator, timeout).await, "lookup")?;
    match element.text().await {
        Ok(text) => non_empty(Some(text)),
        Err(e) => {
            debug!(%locator, error = %e, "Failed to read label text");
            None
        }
    }
}

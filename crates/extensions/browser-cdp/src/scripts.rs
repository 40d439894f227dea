//! Page-side functions run through `Runtime.callFunctionOn`.
//!
//! Every function runs with `this` bound to a search root (a `Document`, a
//! `ShadowRoot`) or to an element, and takes plain JSON arguments.

use easyapply_protocols::{Locator, LocatorKind};
use serde_json::{Value, json};

/// `(kind, query)` → first match or `null`.
pub(crate) const QUERY_ONE: &str = r#"function(kind, query) {
    if (kind === 'xpath') {
        const doc = this.ownerDocument || this;
        return doc.evaluate(query, this, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
    }
    return this.querySelector(query);
}"#;

/// `(kind, query)` → array of matches in document order.
pub(crate) const QUERY_ALL: &str = r#"function(kind, query) {
    if (kind === 'xpath') {
        const doc = this.ownerDocument || this;
        const snap = doc.evaluate(query, this, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
        const out = [];
        for (let i = 0; i < snap.snapshotLength; i++) out.push(snap.snapshotItem(i));
        return out;
    }
    return Array.from(this.querySelectorAll(query));
}"#;

/// Documents of every iframe under the root. Cross-origin frames expose no
/// `contentDocument` and are left out.
pub(crate) const FRAME_DOCUMENTS: &str = r#"function() {
    const docs = [];
    for (const frame of this.querySelectorAll('iframe')) {
        try {
            if (frame.contentDocument) docs.push(frame.contentDocument);
        } catch (e) {}
    }
    return docs;
}"#;

pub(crate) const GET_ATTRIBUTE: &str = r#"function(name) {
    return this.getAttribute(name);
}"#;

pub(crate) const INNER_TEXT: &str = r#"function() {
    return this.innerText !== undefined ? this.innerText : (this.textContent || '');
}"#;

pub(crate) const JS_CLICK: &str = r#"function() {
    this.click();
}"#;

/// Focus the control and empty it, firing `input` so frameworks notice.
pub(crate) const CLEAR_VALUE: &str = r#"function() {
    this.focus();
    if ('value' in this) {
        this.value = '';
        this.dispatchEvent(new Event('input', { bubbles: true }));
    } else if (this.isContentEditable) {
        this.textContent = '';
    }
}"#;

/// `(maxLevels)` → first non-empty line of the nearest `fieldset`/`div`
/// ancestor that has any text, or `null`. Text-less wrappers are skipped.
pub(crate) const GROUP_TEXT: &str = r#"function(maxLevels) {
    let node = this.parentElement;
    for (let level = 0; node && level < maxLevels; level++, node = node.parentElement) {
        const tag = node.tagName.toLowerCase();
        if (tag !== 'fieldset' && tag !== 'div') continue;
        const text = node.innerText || node.textContent || '';
        for (const line of text.split('\n')) {
            if (line.trim()) return line.trim();
        }
    }
    return null;
}"#;

pub(crate) const SHADOW_ROOT: &str = r#"function() {
    return this.shadowRoot;
}"#;

/// `document` of the top frame, for rooting queries after each navigation.
pub(crate) const TOP_DOCUMENT: &str = "document";

/// Call arguments for [`QUERY_ONE`] / [`QUERY_ALL`].
pub(crate) fn query_args(locator: &Locator) -> Vec<Value> {
    let kind = match locator.kind {
        LocatorKind::Css => "css",
        LocatorKind::XPath => "xpath",
    };
    vec![json!(kind), json!(locator.query.as_ref())]
}

//! Declarative element locators.

use std::borrow::Cow;
use std::fmt;

/// How a locator query is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocatorKind {
    /// Attribute/CSS query, e.g. `button[aria-label='Submit application']`.
    Css,
    /// Structural path (XPath), e.g. `//div[@data-job-id]`.
    XPath,
}

/// Description of how to find one control within a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    pub kind: LocatorKind,
    pub query: Cow<'static, str>,
}

impl Locator {
    /// Static CSS locator.
    pub const fn css(query: &'static str) -> Self {
        Self {
            kind: LocatorKind::Css,
            query: Cow::Borrowed(query),
        }
    }

    /// Static XPath locator.
    pub const fn xpath(query: &'static str) -> Self {
        Self {
            kind: LocatorKind::XPath,
            query: Cow::Borrowed(query),
        }
    }

    /// CSS locator built at runtime.
    pub fn css_owned(query: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::Css,
            query: Cow::Owned(query.into()),
        }
    }

    /// Matches the element whose `id` attribute equals `id`.
    ///
    /// Uses an attribute selector so ids containing characters that are not
    /// valid CSS identifiers (colons, leading digits) still match.
    pub fn by_id(id: &str) -> Self {
        Self::css_owned(format!("[id=\"{}\"]", escape_attr_value(id)))
    }

    /// Matches `label[for=id]`.
    pub fn label_for(id: &str) -> Self {
        Self::css_owned(format!("label[for=\"{}\"]", escape_attr_value(id)))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LocatorKind::Css => write!(f, "css:{}", self.query),
            LocatorKind::XPath => write!(f, "xpath:{}", self.query),
        }
    }
}

/// Escape a value for use inside a double-quoted CSS attribute selector.
pub fn escape_attr_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Keys the engine dispatches through a scope's keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
}

impl Key {
    /// DOM `key` value.
    pub fn name(&self) -> &'static str {
        match self {
            Key::Enter => "Enter",
            Key::Tab => "Tab",
        }
    }

    /// Windows virtual key code, required by CDP for keys with default actions.
    pub fn virtual_key_code(&self) -> i64 {
        match self {
            Key::Enter => 13,
            Key::Tab => 9,
        }
    }

    /// Text the key produces, if any.
    pub fn text(&self) -> Option<&'static str> {
        match self {
            Key::Enter => Some("\r"),
            Key::Tab => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_locators() {
        const NEXT: Locator = Locator::css("button[aria-label='Continue to next step']");
        assert_eq!(NEXT.kind, LocatorKind::Css);
        assert_eq!(NEXT.query, "button[aria-label='Continue to next step']");

        const CARD: Locator = Locator::xpath("//div[@data-job-id]");
        assert_eq!(CARD.kind, LocatorKind::XPath);
    }

    #[test]
    fn test_by_id_quotes_value() {
        let loc = Locator::by_id("urn:li:fs_question:123");
        assert_eq!(loc.query, "[id=\"urn:li:fs_question:123\"]");
    }

    #[test]
    fn test_label_for_escapes_quotes() {
        let loc = Locator::label_for("a\"b");
        assert_eq!(loc.query, "label[for=\"a\\\"b\"]");
    }

    #[test]
    fn test_display() {
        assert_eq!(Locator::css("#x").to_string(), "css:#x");
        assert_eq!(Locator::xpath("//a").to_string(), "xpath://a");
    }

    #[test]
    fn test_enter_key() {
        assert_eq!(Key::Enter.name(), "Enter");
        assert_eq!(Key::Enter.virtual_key_code(), 13);
        assert_eq!(Key::Enter.text(), Some("\r"));
        assert_eq!(Key::Tab.text(), None);
    }
}

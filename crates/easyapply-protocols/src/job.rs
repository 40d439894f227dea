//! Job identifiers and link parsing.

use url::Url;

/// Numeric identifier of one job posting.
pub type JobId = u64;

/// Extracts a job identifier from a posting link.
///
/// Kept behind a trait so the parsing rule can change with the target site's
/// URL shape without touching discovery.
pub trait JobIdParser: Send + Sync {
    fn parse(&self, href: &str) -> Option<JobId>;
}

/// Takes a fixed path segment as the identifier.
///
/// The path is trimmed of leading and trailing `/`, split on `/`, and the
/// segment at `index` must be a base-10 unsigned integer.
/// `/jobs/view/3847562910/` → `3847562910` with the default index of 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegmentParser {
    pub index: usize,
}

impl PathSegmentParser {
    pub const DEFAULT_INDEX: usize = 2;

    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Default for PathSegmentParser {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INDEX)
    }
}

impl JobIdParser for PathSegmentParser {
    fn parse(&self, href: &str) -> Option<JobId> {
        let path = link_path(href)?;
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        segments.get(self.index)?.parse::<JobId>().ok()
    }
}

/// Path component of an absolute or site-relative link.
fn link_path(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match Url::parse(href) {
        Ok(url) => Some(url.path().to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("https://localhost/").ok()?;
            base.join(href).ok().map(|url| url.path().to_string())
        }
        Err(_) => None,
    }
}

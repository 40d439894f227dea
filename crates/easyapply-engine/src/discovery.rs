//! Job discovery from the search results feed.
//!
//! The feed renders cards lazily while it is scrolled, so the container is
//! wheel-scrolled a fixed number of steps before the page markup is read
//! and parsed offline.

use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use easyapply_protocols::{BrowserPage, JobId, JobIdParser, Locator};

use crate::error::DiscoveryError;
use crate::settings::DiscoverySettings;

/// Scrollable list holding the result cards.
pub const RESULTS_CONTAINER: Locator = Locator::css(".scaffold-layout__list");

/// A result card.
pub const JOB_CARD: &str = "div[data-job-id]";

/// The posting link inside a card.
pub const JOB_LINK: &str = r#"a[class*="job-card-container__link"]"#;

/// One page of a search.
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
    pub position: &'a str,
    pub location: &'a str,
    /// Zero-based result offset.
    pub offset: u32,
    pub remote_only: bool,
}

/// Cards carrying a posting link, and the identifiers parsed from them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub cards: usize,
    pub ids: Vec<JobId>,
}

pub struct JobDiscovery<'a> {
    settings: &'a DiscoverySettings,
    parser: &'a dyn JobIdParser,
}

impl<'a> JobDiscovery<'a> {
    pub fn new(settings: &'a DiscoverySettings, parser: &'a dyn JobIdParser) -> Self {
        Self { settings, parser }
    }

    /// Easy Apply search sorted most-recent-first.
    pub fn search_url(&self, query: &SearchQuery<'_>) -> Result<Url, DiscoveryError> {
        let base = format!("{}/jobs/search/", self.settings.site_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)
            .map_err(|e| DiscoveryError::InvalidRequest(format!("{base}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("f_LF", "f_AL");
            if query.remote_only {
                pairs.append_pair("f_WT", "2");
            }
            pairs
                .append_pair("keywords", query.position)
                .append_pair("location", query.location)
                .append_pair("sortBy", "DD")
                .append_pair("start", &query.offset.to_string());
        }
        Ok(url)
    }

    /// Job identifiers on one results page, in page order.
    pub async fn discover<P>(
        &self,
        page: &P,
        query: &SearchQuery<'_>,
    ) -> Result<Vec<JobId>, DiscoveryError>
    where
        P: BrowserPage + ?Sized,
    {
        let url = self.search_url(query)?;
        info!(
            position = query.position,
            location = query.location,
            offset = query.offset,
            "Searching jobs"
        );

        page.navigate(url.as_str()).await?;
        tokio::time::sleep(self.settings.settle).await;

        if page
            .wait_for(&RESULTS_CONTAINER, self.settings.container_timeout)
            .await?
            .is_none()
        {
            return Err(DiscoveryError::ContainerNotFound(RESULTS_CONTAINER.to_string()));
        }

        for step in 0..self.settings.scroll_steps {
            if !page
                .scroll_container(&RESULTS_CONTAINER, self.settings.scroll_delta)
                .await?
            {
                return Err(DiscoveryError::ContainerNotFound(RESULTS_CONTAINER.to_string()));
            }
            debug!(step, "Scrolled results");
            tokio::time::sleep(self.settings.scroll_pause).await;
        }

        let html = page.content().await?;
        let extraction = extract_job_ids(&html, self.parser)?;
        if extraction.cards == 0 {
            return Err(DiscoveryError::NoJobs {
                offset: query.offset,
            });
        }

        info!(
            offset = query.offset,
            cards = extraction.cards,
            found = extraction.ids.len(),
            "Discovered jobs"
        );
        Ok(extraction.ids)
    }
}

fn selector(css: &str) -> Result<Selector, DiscoveryError> {
    Selector::parse(css).map_err(|e| DiscoveryError::InvalidRequest(format!("{css}: {e}")))
}

/// Parse result cards out of serialized page markup.
///
/// Links whose href yields no identifier are logged and skipped.
pub fn extract_job_ids(html: &str, parser: &dyn JobIdParser) -> Result<Extraction, DiscoveryError> {
    let card_selector = selector(JOB_CARD)?;
    let link_selector = selector(JOB_LINK)?;
    let document = Html::parse_document(html);

    let mut extraction = Extraction::default();
    for card in document.select(&card_selector) {
        let links: Vec<_> = card.select(&link_selector).collect();
        if links.is_empty() {
            continue;
        }
        extraction.cards += 1;
        for link in links {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            match parser.parse(href) {
                Some(id) => extraction.ids.push(id),
                None => warn!(href, "Failed to extract job id from link"),
            }
        }
    }
    Ok(extraction)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;

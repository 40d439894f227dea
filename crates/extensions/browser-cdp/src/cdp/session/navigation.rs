//! Navigation and load-state operations for CDP page session.

use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const LOAD_POLL: Duration = Duration::from_millis(100);

/// Resource count must hold still this long to count as idle.
const IDLE_QUIET: Duration = Duration::from_millis(500);
const IDLE_POLL: Duration = Duration::from_millis(250);
const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

const RESOURCE_COUNT: &str = "performance.getEntriesByType('resource').length";

impl PageSession {
    /// Navigate to URL and wait for the document to load.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(
                error.as_str().unwrap_or("Unknown error").to_string(),
            ));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_load().await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Wait for page load.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            match self.evaluate("document.readyState").await {
                Ok(state) if matches!(state.as_str(), Some("complete" | "interactive")) => {
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) if e.is_session_lost() => return Err(e),
                // Context torn down by the navigation itself
                Err(e) => debug!("readyState probe failed: {}", e),
            }

            if start.elapsed() > LOAD_TIMEOUT {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(LOAD_POLL).await;
        }
    }

    /// Wait until the document is loaded and no new resources have been
    /// fetched for a short quiet period.
    ///
    /// Gives up silently after a bounded time; pages with long-polling
    /// connections never go fully quiet.
    pub async fn wait_for_network_idle(&self) -> Result<(), CdpError> {
        self.wait_for_load().await?;

        let start = Instant::now();
        let mut last_count: Option<u64> = None;
        let mut quiet_since = Instant::now();

        loop {
            let count = match self.evaluate(RESOURCE_COUNT).await {
                Ok(value) => value.as_u64(),
                Err(e) if e.is_session_lost() => return Err(e),
                Err(_) => None,
            };

            if count.is_none() || count != last_count {
                last_count = count;
                quiet_since = Instant::now();
            } else if quiet_since.elapsed() >= IDLE_QUIET {
                return Ok(());
            }

            if start.elapsed() >= IDLE_TIMEOUT {
                debug!("Network did not settle within {:?}", IDLE_TIMEOUT);
                return Ok(());
            }

            tokio::time::sleep(IDLE_POLL).await;
        }
    }

    /// Get current URL.
    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}

//! Timing budgets and caps the engine runs with.
//!
//! The binary builds these from the TOML configuration; the engine itself
//! does not depend on the config crate.

use std::time::Duration;

/// Budgets for one application wizard run.
#[derive(Debug, Clone)]
pub struct WizardSettings {
    /// Outer loop budget. The run ends without submission once exhausted.
    pub max_iterations: u32,
    /// Main-document presence check for an action control.
    pub presence_timeout: Duration,
    /// Lookup of the control right before it is clicked.
    pub click_timeout: Duration,
    /// Main-document probe for the inline error marker.
    pub error_timeout: Duration,
    /// `label[for=..]` and `aria-labelledby` target lookups.
    pub label_timeout: Duration,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            presence_timeout: Duration::from_secs(4),
            click_timeout: Duration::from_secs(2),
            error_timeout: Duration::from_secs(4),
            label_timeout: Duration::from_millis(300),
        }
    }
}

/// Search results scrolling.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Site origin, e.g. `https://www.linkedin.com`.
    pub site_url: String,
    pub scroll_steps: u32,
    pub scroll_delta: f64,
    pub scroll_pause: Duration,
    pub container_timeout: Duration,
    /// Fixed wait after navigating to the search page.
    pub settle: Duration,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            site_url: "https://www.linkedin.com".to_string(),
            scroll_steps: 14,
            scroll_delta: 200.0,
            scroll_pause: Duration::from_secs(2),
            container_timeout: Duration::from_secs(10),
            settle: Duration::from_secs(2),
        }
    }
}

/// Outer campaign loop caps.
#[derive(Debug, Clone)]
pub struct CampaignSettings {
    pub page_size: u32,
    pub max_pages: u32,
    /// `None` means no cap on attempted jobs.
    pub max_applications: Option<u32>,
    /// Fixed wait after navigating to a posting.
    pub settle: Duration,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            page_size: 25,
            max_pages: 10,
            max_applications: None,
            settle: Duration::from_secs(2),
        }
    }
}

impl CampaignSettings {
    /// Result offset of the given zero-based page, clamped at `u32::MAX`.
    pub fn offset(&self, page: u32) -> u32 {
        page.saturating_mul(self.page_size)
    }
}

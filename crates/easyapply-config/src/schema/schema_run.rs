//! Campaign run configuration (campaign caps, discovery, wizard, pacing).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outer campaign loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Site origin; search and posting URLs are built from it.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Results per search page. Discovery offsets advance by this amount.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum number of search pages scanned per campaign.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Stop after this many jobs have been attempted. Unlimited when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_applications: Option<u32>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            max_applications: None,
        }
    }
}

fn default_site_url() -> String {
    "https://www.linkedin.com".to_string()
}

fn default_page_size() -> u32 {
    25
}

fn default_max_pages() -> u32 {
    10
}

/// Search results scrolling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_scroll_steps")]
    pub scroll_steps: u32,

    /// Pixels per wheel step.
    #[serde(default = "default_scroll_delta")]
    pub scroll_delta: f64,

    #[serde(default = "default_scroll_pause_ms")]
    pub scroll_pause_ms: u64,

    /// How long to wait for the results container to render.
    #[serde(default = "default_container_timeout_ms")]
    pub container_timeout_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scroll_steps: default_scroll_steps(),
            scroll_delta: default_scroll_delta(),
            scroll_pause_ms: default_scroll_pause_ms(),
            container_timeout_ms: default_container_timeout_ms(),
        }
    }
}

impl DiscoveryConfig {
    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn container_timeout(&self) -> Duration {
        Duration::from_millis(self.container_timeout_ms)
    }
}

fn default_scroll_steps() -> u32 {
    14
}

fn default_scroll_delta() -> f64 {
    200.0
}

fn default_scroll_pause_ms() -> u64 {
    2000
}

fn default_container_timeout_ms() -> u64 {
    10_000
}

/// Application wizard budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Main-document presence check for an action control.
    #[serde(default = "default_presence_timeout_ms")]
    pub presence_timeout_ms: u64,

    /// Lookup of the control right before it is clicked.
    #[serde(default = "default_click_timeout_ms")]
    pub click_timeout_ms: u64,

    /// Main-document probe for the inline error marker.
    #[serde(default = "default_error_timeout_ms")]
    pub error_timeout_ms: u64,

    /// `label[for=..]` lookup.
    #[serde(default = "default_label_timeout_ms")]
    pub label_timeout_ms: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            presence_timeout_ms: default_presence_timeout_ms(),
            click_timeout_ms: default_click_timeout_ms(),
            error_timeout_ms: default_error_timeout_ms(),
            label_timeout_ms: default_label_timeout_ms(),
        }
    }
}

fn default_max_iterations() -> u32 {
    15
}

fn default_presence_timeout_ms() -> u64 {
    4000
}

fn default_click_timeout_ms() -> u64 {
    2000
}

fn default_error_timeout_ms() -> u64 {
    4000
}

fn default_label_timeout_ms() -> u64 {
    300
}

/// Randomized pauses between page interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    #[serde(default = "default_min_ms")]
    pub min_ms: u64,

    #[serde(default = "default_max_ms")]
    pub max_ms: u64,

    /// Fixed wait after each navigation.
    #[serde(default = "default_navigation_settle_ms")]
    pub navigation_settle_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
            navigation_settle_ms: default_navigation_settle_ms(),
        }
    }
}

fn default_min_ms() -> u64 {
    1500
}

fn default_max_ms() -> u64 {
    2500
}

fn default_navigation_settle_ms() -> u64 {
    2000
}

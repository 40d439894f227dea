//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use easyapply_protocols::ApplicantProfile;

mod schema_run;
mod schema_services;

pub use schema_run::*;
pub use schema_services::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub account: AccountConfig,

    /// Applicant answers and search targets.
    #[serde(default)]
    pub profile: ApplicantProfile,

    #[serde(default)]
    pub campaign: CampaignConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub wizard: WizardConfig,

    #[serde(default)]
    pub pacing: PacingConfig,

    #[serde(default)]
    pub fallback: FallbackConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Browser connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Remote debugging port Chrome listens on.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    /// Persistent user data directory, kept between runs so the session
    /// cookie survives. Defaults to `~/.easyapply/browser-profile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<String>,

    /// Explicit Chrome binary. Auto-detected when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            profile_dir: None,
            chrome_path: None,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

/// Site account used by the login flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing)]
    pub password: String,
}

impl AccountConfig {
    pub fn has_credentials(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

//! Mapping from the TOML configuration to engine settings and collaborators.

use std::path::PathBuf;
use std::time::Duration;

use easyapply_browser_cdp::BrowserManagerConfig;
use easyapply_config::{BrowserConfig, Config, ConfigLoader, LoggingConfig, PacingConfig, WizardConfig};
use easyapply_engine::{CampaignSettings, DiscoverySettings, Pacer, WizardSettings};
use easyapply_fallback_openai::OpenAiFallback;
use easyapply_protocols::ApplicantProfile;

/// Get the .easyapply directory path.
pub(crate) fn easyapply_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".easyapply"))
        .unwrap_or_else(|| PathBuf::from(".easyapply"))
}

pub(crate) fn log_dir(logging: &LoggingConfig) -> PathBuf {
    match &logging.dir {
        Some(dir) => PathBuf::from(ConfigLoader::expand_path(dir)),
        None => easyapply_dir().join("logs"),
    }
}

pub(crate) fn browser_config(browser: &BrowserConfig) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: browser.debug_port,
        profile_dir: browser
            .profile_dir
            .as_deref()
            .map(|p| PathBuf::from(ConfigLoader::expand_path(p))),
        chrome_path: browser
            .chrome_path
            .as_deref()
            .map(|p| PathBuf::from(ConfigLoader::expand_path(p))),
        headless: browser.headless,
    }
}

pub(crate) fn wizard_settings(wizard: &WizardConfig) -> WizardSettings {
    WizardSettings {
        max_iterations: wizard.max_iterations,
        presence_timeout: Duration::from_millis(wizard.presence_timeout_ms),
        click_timeout: Duration::from_millis(wizard.click_timeout_ms),
        error_timeout: Duration::from_millis(wizard.error_timeout_ms),
        label_timeout: Duration::from_millis(wizard.label_timeout_ms),
    }
}

pub(crate) fn discovery_settings(config: &Config) -> DiscoverySettings {
    DiscoverySettings {
        site_url: config.campaign.site_url.clone(),
        scroll_steps: config.discovery.scroll_steps,
        scroll_delta: config.discovery.scroll_delta,
        scroll_pause: config.discovery.scroll_pause(),
        container_timeout: config.discovery.container_timeout(),
        settle: Duration::from_millis(config.pacing.navigation_settle_ms),
    }
}

pub(crate) fn campaign_settings(config: &Config) -> CampaignSettings {
    CampaignSettings {
        page_size: config.campaign.page_size,
        max_pages: config.campaign.max_pages,
        max_applications: config.campaign.max_applications,
        settle: Duration::from_millis(config.pacing.navigation_settle_ms),
    }
}

pub(crate) fn pacer(pacing: &PacingConfig) -> Pacer {
    Pacer::new(
        Duration::from_millis(pacing.min_ms),
        Duration::from_millis(pacing.max_ms),
    )
}

/// The language-model fallback, when enabled and keyed.
pub(crate) fn fallback(config: &Config) -> Option<OpenAiFallback> {
    let fallback = &config.fallback;
    if !fallback.enabled {
        return None;
    }
    let api_key = fallback.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
    Some(
        OpenAiFallback::new(api_key.to_string())
            .with_url(fallback.api_url.clone())
            .with_model(fallback.model.clone())
            .with_context(applicant_summary(&config.profile)),
    )
}

/// One-line applicant summary handed to the fallback as context.
fn applicant_summary(profile: &ApplicantProfile) -> String {
    let mut parts = vec![format!("{} years of experience", profile.years_experience)];
    if !profile.city.is_empty() || !profile.state.is_empty() {
        parts.push(format!("based in {}", profile.city_and_state()));
    }
    if !profile.positions.is_empty() {
        parts.push(format!("targeting {}", profile.positions.join(" / ")));
    }
    if profile.desired_salary > 0 {
        parts.push(format!("desired salary {}", profile.desired_salary));
    }
    parts.join("; ")
}

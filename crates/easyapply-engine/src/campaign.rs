//! The application campaign loop.
//!
//! Picks one position and one location from the profile, pages through the
//! search results and applies to every discovered job in discovery order.
//! A job that cannot be applied to is recorded and skipped; only a lost
//! browser session ends the run early with an error.

use rand::seq::SliceRandom;
use tracing::{info, warn};

use easyapply_protocols::{
    ApplicantProfile, BrowserError, BrowserPage, FallbackResolver, JobId, JobIdParser, Locator,
};

use crate::discovery::{JobDiscovery, SearchQuery};
use crate::error::{DiscoveryError, EngineError};
use crate::form::FormEngine;
use crate::pacing::Pacer;
use crate::settings::{CampaignSettings, DiscoverySettings, WizardSettings};

/// Button on a posting page that opens the application wizard.
pub const EASY_APPLY_ENTRY: Locator = Locator::xpath(r#"//*[contains(@aria-label, "Easy Apply to")]"#);

/// What happened to one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Submitted,
    /// The wizard ran out of iterations.
    NotSubmitted,
    /// The posting has no Easy Apply button.
    NoEntryPoint,
    Failed(String),
}

impl JobOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            JobOutcome::Submitted => "submitted",
            JobOutcome::NotSubmitted => "not_submitted",
            JobOutcome::NoEntryPoint => "no_entry_point",
            JobOutcome::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub job_id: JobId,
    pub outcome: JobOutcome,
}

/// Why the campaign stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Discovery found no jobs at this offset.
    EndOfResults { offset: u32 },
    PageLimit,
    ApplicationLimit,
    /// The results container never rendered.
    ContainerNotFound,
    DiscoveryFailed(String),
}

/// Summary of one campaign run.
#[derive(Debug, Clone)]
pub struct CampaignReport {
    pub position: String,
    pub location: String,
    pub pages_scanned: u32,
    /// Every identifier in discovery order, duplicates included.
    pub discovered: Vec<JobId>,
    pub jobs: Vec<JobRecord>,
    pub stop_reason: StopReason,
}

impl CampaignReport {
    pub fn submitted(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.outcome == JobOutcome::Submitted)
            .count()
    }
}

pub struct Campaign<'a> {
    profile: &'a ApplicantProfile,
    parser: &'a dyn JobIdParser,
    fallback: Option<&'a dyn FallbackResolver>,
    settings: CampaignSettings,
    discovery: DiscoverySettings,
    wizard: WizardSettings,
    pacer: Pacer,
}

impl<'a> Campaign<'a> {
    pub fn new(profile: &'a ApplicantProfile, parser: &'a dyn JobIdParser) -> Self {
        Self {
            profile,
            parser,
            fallback: None,
            settings: CampaignSettings::default(),
            discovery: DiscoverySettings::default(),
            wizard: WizardSettings::default(),
            pacer: Pacer::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: &'a dyn FallbackResolver) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_settings(mut self, settings: CampaignSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_discovery(mut self, discovery: DiscoverySettings) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_wizard(mut self, wizard: WizardSettings) -> Self {
        self.wizard = wizard;
        self
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Run one campaign on `page`.
    pub async fn run<P>(&self, page: &P) -> Result<CampaignReport, EngineError>
    where
        P: BrowserPage + ?Sized,
    {
        let (position, location) = self.choose_targets()?;
        info!(position = %position, location = %location, "Starting campaign");

        let discovery = JobDiscovery::new(&self.discovery, self.parser);
        let mut report = CampaignReport {
            position,
            location,
            pages_scanned: 0,
            discovered: Vec::new(),
            jobs: Vec::new(),
            stop_reason: StopReason::PageLimit,
        };
        let mut cursor = 0;

        let stop_reason = 'pages: loop {
            if report.pages_scanned >= self.settings.max_pages {
                break StopReason::PageLimit;
            }
            if self.cap_reached(report.jobs.len()) {
                break StopReason::ApplicationLimit;
            }

            let query = SearchQuery {
                position: &report.position,
                location: &report.location,
                offset: self.settings.offset(report.pages_scanned),
                remote_only: self.profile.remote_only,
            };
            match discovery.discover(page, &query).await {
                Ok(ids) => {
                    report.pages_scanned += 1;
                    report.discovered.extend(ids);
                }
                Err(DiscoveryError::NoJobs { offset }) => {
                    info!(offset, "No more results");
                    break StopReason::EndOfResults { offset };
                }
                Err(DiscoveryError::ContainerNotFound(container)) => {
                    warn!(container = %container, "Results container not found, stopping");
                    break StopReason::ContainerNotFound;
                }
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    warn!(error = %e, "Discovery failed, stopping");
                    break StopReason::DiscoveryFailed(e.to_string());
                }
            }

            while cursor < report.discovered.len() {
                if self.cap_reached(report.jobs.len()) {
                    break 'pages StopReason::ApplicationLimit;
                }
                let job_id = report.discovered[cursor];
                cursor += 1;

                let outcome = self.apply(page, job_id).await?;
                match &outcome {
                    JobOutcome::Failed(reason) => {
                        warn!(job_id, outcome = outcome.name(), reason = %reason, "Job failed")
                    }
                    _ => info!(job_id, outcome = outcome.name(), "Job processed"),
                }
                report.jobs.push(JobRecord { job_id, outcome });
            }
        };
        report.stop_reason = stop_reason;

        info!(
            pages = report.pages_scanned,
            attempted = report.jobs.len(),
            submitted = report.submitted(),
            stop = ?report.stop_reason,
            "Campaign finished"
        );
        Ok(report)
    }

    fn cap_reached(&self, attempted: usize) -> bool {
        self.settings
            .max_applications
            .is_some_and(|max| attempted >= max as usize)
    }

    fn choose_targets(&self) -> Result<(String, String), EngineError> {
        let mut rng = rand::thread_rng();
        let position = self
            .profile
            .positions
            .choose(&mut rng)
            .ok_or(EngineError::EmptyProfile("positions"))?;
        let location = self
            .profile
            .locations
            .choose(&mut rng)
            .ok_or(EngineError::EmptyProfile("locations"))?;
        Ok((position.clone(), location.clone()))
    }

    /// Open the posting, enter the wizard and run it.
    async fn apply<P>(&self, page: &P, job_id: JobId) -> Result<JobOutcome, BrowserError>
    where
        P: BrowserPage + ?Sized,
    {
        info!(job_id, "Applying to job");

        let entered = match self.open_wizard(page, job_id).await {
            Ok(entered) => entered,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => return Ok(JobOutcome::Failed(e.to_string())),
        };
        if !entered {
            return Ok(JobOutcome::NoEntryPoint);
        }

        let engine = FormEngine::new(&self.wizard, self.profile, self.fallback, self.pacer);
        match engine.run(page).await {
            Ok(outcome) if outcome.submitted => Ok(JobOutcome::Submitted),
            Ok(_) => Ok(JobOutcome::NotSubmitted),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => Ok(JobOutcome::Failed(e.to_string())),
        }
    }

    /// `false` when the posting has no entry point.
    async fn open_wizard<P>(&self, page: &P, job_id: JobId) -> Result<bool, BrowserError>
    where
        P: BrowserPage + ?Sized,
    {
        let url = format!(
            "{}/jobs/view/{}",
            self.discovery.site_url.trim_end_matches('/'),
            job_id
        );
        page.navigate(&url).await?;
        tokio::time::sleep(self.settings.settle).await;
        page.wait_for_idle().await?;

        let entries = page.find_all(&EASY_APPLY_ENTRY).await?;
        let Some(entry) = entries.first() else {
            return Ok(false);
        };
        entry.click().await?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "campaign_tests.rs"]
mod tests;

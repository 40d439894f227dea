//! EasyApply - automated Easy Apply job application runner
//!
//! Main entry point for the EasyApply CLI.

mod adapters;
mod cli;

use std::path::Path;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use easyapply_browser_cdp::{BrowserManager, CdpPage};
use easyapply_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use easyapply_engine::{Campaign, CampaignReport, JobOutcome, LoginFlow, LoginOutcome};
use easyapply_protocols::{JobIdParser, PathSegmentParser};

use crate::adapters::{
    browser_config, campaign_settings, discovery_settings, fallback, log_dir, pacer, wizard_settings,
};
use crate::cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.easyapply/logs/ (or `logging.dir`) with daily
/// rotation, keeping 30 files.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = log_dir(logging);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("easyapply")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive for the program duration
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let default_level = logging.level.as_deref().unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer (human-readable text format with colors)
        .with(fmt::layer().with_target(true).with_ansi(true))
        // File layer (text format without colors)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Run {
        skip_login: false,
        max_applications: None,
        headless: false,
    });

    // Pure parsing needs neither config nor logging
    if let Commands::JobId { href } = &command {
        return print_job_id(href);
    }

    let mut config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    match command {
        Commands::Run {
            skip_login,
            max_applications,
            headless,
        } => {
            if headless {
                config.browser.headless = true;
            }
            if max_applications.is_some() {
                config.campaign.max_applications = max_applications;
            }
            run_campaign(&config, skip_login).await
        }
        Commands::Login => run_login(&config).await,
        Commands::Validate => validate(&config, cli.config.as_deref()),
        Commands::JobId { .. } => Ok(()),
    }
}

fn print_job_id(href: &str) -> Result<(), Box<dyn std::error::Error>> {
    match PathSegmentParser::default().parse(href) {
        Some(id) => {
            println!("{}", id);
            Ok(())
        }
        None => Err(format!("no job id in {:?}", href).into()),
    }
}

fn validate(config: &Config, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config);
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "default locations".to_string());

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!("Configuration from {} is valid", source);
        Ok(())
    } else {
        Err(format!("configuration from {} has {} error(s)", source, result.errors.len()).into())
    }
}

/// Refuse to start on errors; log warnings.
fn check_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let warnings = ConfigValidator::validate(config).into_result()?;
    for warning in warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    Ok(())
}

async fn sign_in(config: &Config, page: &CdpPage) -> Result<(), Box<dyn std::error::Error>> {
    let account = &config.account;
    if !account.has_credentials() {
        return Err("account.email and account.password are required to sign in".into());
    }

    let outcome = LoginFlow::new(config.campaign.site_url.clone())
        .with_settle(std::time::Duration::from_millis(config.pacing.navigation_settle_ms))
        .login(page, &account.email, &account.password)
        .await?;

    match outcome {
        LoginOutcome::SignedIn => Ok(()),
        LoginOutcome::Rejected => Err("login was not confirmed; check the credentials or solve the challenge in the browser".into()),
    }
}

async fn run_login(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    check_config(config)?;

    let manager = BrowserManager::new(browser_config(&config.browser));
    let result = async {
        let page = manager.open_page().await?;
        sign_in(config, &page).await
    }
    .await;
    manager.shutdown_chrome().await;

    result?;
    println!("Signed in as {}", config.account.email);
    Ok(())
}

async fn run_campaign(config: &Config, skip_login: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting EasyApply v{}", env!("CARGO_PKG_VERSION"));
    check_config(config)?;

    let parser = PathSegmentParser::default();
    let fallback = fallback(config);

    let mut campaign = Campaign::new(&config.profile, &parser)
        .with_settings(campaign_settings(config))
        .with_discovery(discovery_settings(config))
        .with_wizard(wizard_settings(&config.wizard))
        .with_pacer(pacer(&config.pacing));
    if let Some(fallback) = &fallback {
        campaign = campaign.with_fallback(fallback);
    }

    let manager = BrowserManager::new(browser_config(&config.browser));
    let result = async {
        let page = manager.open_page().await?;
        if skip_login {
            info!("Skipping login, relying on the browser profile session");
        } else {
            sign_in(config, &page).await?;
        }

        let _applying = manager.begin_applying();
        let report = campaign.run(&page).await?;
        Ok::<_, Box<dyn std::error::Error>>(report)
    }
    .await;
    manager.shutdown_chrome().await;

    match result {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            error!("Campaign aborted: {}", e);
            Err(e)
        }
    }
}

fn print_report(report: &CampaignReport) {
    println!(
        "Campaign \"{}\" in \"{}\": {} page(s), {} job(s) discovered, {} submitted",
        report.position,
        report.location,
        report.pages_scanned,
        report.discovered.len(),
        report.submitted()
    );
    for job in &report.jobs {
        match &job.outcome {
            JobOutcome::Failed(reason) => println!("  {}  failed: {}", job.job_id, reason),
            outcome => println!("  {}  {}", job.job_id, outcome.name()),
        }
    }
    println!("Stopped: {:?}", report.stop_reason);
}

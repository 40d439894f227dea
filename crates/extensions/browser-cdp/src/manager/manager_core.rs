//! BrowserManager core: struct definition, Chrome management, page access.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{ApplyingGuard, BrowserManagerConfig, ManagerError};
use crate::cdp::CdpClient;
use crate::page::CdpPage;

const STARTUP_ATTEMPTS: u32 = 30;
const STARTUP_POLL: Duration = Duration::from_millis(200);

/// Manages the Chrome process, the CDP connection and the working tab.
///
/// - Reuses a Chrome already listening on the debug port, otherwise launches one
/// - Uses a persistent profile so the site login survives between runs
/// - Lazily connects on first use
pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
    page: RwLock<Option<CdpPage>>,
    /// Chrome process handle (if we launched it).
    chrome_process: RwLock<Option<Child>>,
    applying: Arc<AtomicBool>,
}

impl BrowserManager {
    /// Create a new browser manager. Nothing is launched or connected yet.
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            page: RwLock::new(None),
            chrome_process: RwLock::new(None),
            applying: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(|p| PathBuf::from(*p)).find(|p| p.exists())
    }

    /// Configured Chrome path, or the first one found on the host.
    pub fn chrome_executable(&self) -> Option<PathBuf> {
        match &self.config.chrome_path {
            Some(path) => Some(path.clone()),
            None => Self::find_chrome(),
        }
    }

    /// Check if Chrome is already running on the debug port.
    async fn is_chrome_running(&self) -> bool {
        reqwest::get(&format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    /// Launch Chrome with remote debugging enabled.
    async fn launch_chrome(&self) -> Result<Child, ManagerError> {
        let chrome_path = self.chrome_executable().ok_or(ManagerError::ChromeNotFound)?;
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--metrics-recording-only")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| ManagerError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to the browser, launching it if necessary.
    pub async fn connect(&self) -> Result<(), ManagerError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if !self.is_chrome_running().await {
            info!("Chrome not running on port {}, launching...", self.config.debug_port);

            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let mut started = false;
            for _ in 0..STARTUP_ATTEMPTS {
                tokio::time::sleep(STARTUP_POLL).await;
                if self.is_chrome_running().await {
                    started = true;
                    break;
                }
            }

            if !started {
                return Err(ManagerError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        } else {
            info!("Chrome already running on port {}", self.config.debug_port);
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        *self.client.write().await = Some(Arc::new(client));

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(())
    }

    /// Ensure the browser is connected before use.
    pub async fn ensure_connected(&self) -> Result<(), ManagerError> {
        let stale = matches!(self.client.read().await.as_ref(), Some(client) if client.is_closed());
        if stale {
            warn!("CDP connection lost, reconnecting");
            self.close().await;
        }
        self.connect().await
    }

    /// The working tab, opened on first use.
    pub async fn open_page(&self) -> Result<CdpPage, ManagerError> {
        self.ensure_connected().await?;

        if let Some(page) = self.page.read().await.as_ref() {
            return Ok(page.clone());
        }

        let client = self
            .client
            .read()
            .await
            .clone()
            .ok_or(ManagerError::Browser(easyapply_protocols::BrowserError::NotConnected))?;
        let session = client.new_page(None).await?;
        debug!("Opened page {}", session.target_id());

        let page = CdpPage::new(Arc::new(session));
        *self.page.write().await = Some(page.clone());
        Ok(page)
    }

    /// Whether an application is currently being filled in.
    pub fn is_applying(&self) -> bool {
        self.applying.load(Ordering::SeqCst)
    }

    /// Mark an application as in progress until the guard is dropped.
    pub fn begin_applying(&self) -> ApplyingGuard {
        self.applying.store(true, Ordering::SeqCst);
        ApplyingGuard {
            flag: self.applying.clone(),
        }
    }

    /// Drop the tab and the CDP connection. Chrome itself keeps running.
    pub async fn close(&self) {
        self.applying.store(false, Ordering::SeqCst);

        if let Some(page) = self.page.write().await.take() {
            let target_id = page.session().target_id().to_string();
            let client = self.client.read().await.clone();
            if let Some(client) = client {
                if let Err(e) = client.close_page(&target_id).await {
                    debug!("Failed to close page {}: {}", target_id, e);
                }
            }
        }

        let _ = self.client.write().await.take();
        info!("Browser connection closed");
    }

    /// Close the connection and kill Chrome if we launched it.
    pub async fn shutdown_chrome(&self) {
        self.close().await;
        if let Some(mut child) = self.chrome_process.write().await.take() {
            info!("Shutting down Chrome...");
            let _ = child.kill().await;
        }
    }
}

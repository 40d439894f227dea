//! Account sign-in.

use std::time::Duration;

use tracing::{info, warn};

use easyapply_protocols::{BrowserPage, Key, Locator};

use crate::error::EngineError;

pub const USERNAME_INPUT: Locator = Locator::css("#username");
pub const PASSWORD_INPUT: Locator = Locator::css("#password");
pub const SIGN_IN_BUTTON: Locator = Locator::css(".btn__primary--large");
/// Present only once the session is signed in.
pub const SIGNED_IN_MARKER: Locator = Locator::css("#caret-small");

/// Result of a sign-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn,
    /// The signed-in marker never appeared, e.g. wrong credentials or a
    /// verification challenge.
    Rejected,
}

/// Fills and submits the site's login form.
pub struct LoginFlow {
    site_url: String,
    settle: Duration,
    confirm_timeout: Duration,
    field_timeout: Duration,
}

impl LoginFlow {
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            settle: Duration::from_secs(2),
            confirm_timeout: Duration::from_secs(15),
            field_timeout: Duration::from_secs(10),
        }
    }

    /// Fixed wait after each step of the form.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// How long to wait for the signed-in marker.
    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    fn login_url(&self) -> String {
        format!(
            "{}/login?trk=guest_homepage-basic_nav-header-signin",
            self.site_url.trim_end_matches('/')
        )
    }

    /// Sign in with `email` and `password`.
    ///
    /// A form that is not there is an error; a form that does not lead to a
    /// signed-in page is [`LoginOutcome::Rejected`].
    pub async fn login<P>(
        &self,
        page: &P,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, EngineError>
    where
        P: BrowserPage + ?Sized,
    {
        info!(email, "Signing in");

        page.navigate(&self.site_url).await?;
        tokio::time::sleep(Duration::from_millis(300)).await;
        page.navigate(&self.login_url()).await?;

        let username = page
            .wait_for(&USERNAME_INPUT, self.field_timeout)
            .await?
            .ok_or_else(|| EngineError::Login("username field not found".to_string()))?;
        username.clear_and_type(email).await?;
        page.press_key(Key::Tab).await?;
        page.wait_for_idle().await?;
        tokio::time::sleep(self.settle).await;

        let password_field = page
            .wait_for(&PASSWORD_INPUT, self.field_timeout)
            .await?
            .ok_or_else(|| EngineError::Login("password field not found".to_string()))?;
        password_field.clear_and_type(password).await?;
        page.wait_for_idle().await?;
        tokio::time::sleep(self.settle).await;

        let button = page
            .wait_for(&SIGN_IN_BUTTON, self.field_timeout)
            .await?
            .ok_or_else(|| EngineError::Login("sign-in button not found".to_string()))?;
        button.click().await?;
        page.wait_for_idle().await?;
        tokio::time::sleep(self.settle).await;

        if page
            .wait_for(&SIGNED_IN_MARKER, self.confirm_timeout)
            .await?
            .is_some()
        {
            info!("Signed in");
            Ok(LoginOutcome::SignedIn)
        } else {
            warn!("Signed-in marker not found, login rejected");
            Ok(LoginOutcome::Rejected)
        }
    }
}

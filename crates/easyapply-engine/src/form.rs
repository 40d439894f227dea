//! The application wizard loop.
//!
//! The wizard's controls change identity between steps, so at most one
//! state-changing action is taken before the DOM is read again. Each
//! iteration:
//!
//! 1. fills fields flagged by inline errors;
//! 2. walks [`WizardAction::PRIORITY`], attempting an action only when it
//!    is actionable and no inline error is showing;
//! 3. stops the iteration after a successful advance and the whole run
//!    after a successful submit;
//! 4. re-runs the error pass after every other candidate.
//!
//! Exhausting the iteration budget is not an error; the caller sees
//! `submitted == false`.

use tracing::{debug, info};

use easyapply_protocols::{ApplicantProfile, BrowserError, FallbackResolver, Scope};

use crate::detector::ErrorDetector;
use crate::driver::{StepDriver, WizardAction};
use crate::fill::FieldFiller;
use crate::pacing::Pacer;
use crate::settings::WizardSettings;

/// Result of one wizard run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOutcome {
    pub submitted: bool,
    /// Outer iterations started.
    pub iterations: u32,
}

/// Runs the wizard for one application.
pub struct FormEngine<'a> {
    settings: &'a WizardSettings,
    filler: FieldFiller<'a>,
    detector: ErrorDetector,
    driver: StepDriver,
    pacer: Pacer,
}

impl<'a> FormEngine<'a> {
    pub fn new(
        settings: &'a WizardSettings,
        profile: &'a ApplicantProfile,
        fallback: Option<&'a dyn FallbackResolver>,
        pacer: Pacer,
    ) -> Self {
        Self {
            settings,
            filler: FieldFiller::new(profile, fallback, settings.label_timeout),
            detector: ErrorDetector::new(settings.error_timeout),
            driver: StepDriver::new(settings.presence_timeout, settings.click_timeout),
            pacer,
        }
    }

    /// Drive the wizard currently open in `scope`.
    ///
    /// Pauses before starting and again before returning, whatever the
    /// outcome. Only fatal session errors are returned.
    pub async fn run<S>(&self, scope: &S) -> Result<FormOutcome, BrowserError>
    where
        S: Scope + ?Sized,
    {
        self.pacer.pause().await;
        let result = self.drive(scope).await;
        self.pacer.pause().await;
        result
    }

    async fn drive<S>(&self, scope: &S) -> Result<FormOutcome, BrowserError>
    where
        S: Scope + ?Sized,
    {
        let mut outcome = FormOutcome {
            submitted: false,
            iterations: 0,
        };

        while outcome.iterations < self.settings.max_iterations && !outcome.submitted {
            outcome.iterations += 1;
            debug!(iteration = outcome.iterations, "Wizard iteration");

            self.filler.handle_inline_errors(scope, &self.detector).await?;

            for action in WizardAction::PRIORITY {
                if self.try_action(scope, action).await? {
                    match action {
                        WizardAction::Submit => {
                            info!("Application submitted");
                            outcome.submitted = true;
                            break;
                        }
                        WizardAction::Advance => break,
                        _ => {}
                    }
                }
                self.filler.handle_inline_errors(scope, &self.detector).await?;
            }
        }

        if !outcome.submitted {
            info!(
                iterations = outcome.iterations,
                "Wizard budget exhausted without submission"
            );
        }
        Ok(outcome)
    }

    /// Attempt `action` if it is actionable and no error is showing.
    async fn try_action<S>(&self, scope: &S, action: WizardAction) -> Result<bool, BrowserError>
    where
        S: Scope + ?Sized,
    {
        let Some(target) = self.driver.locate(scope, action).await? else {
            return Ok(false);
        };
        if self.detector.has_errors(scope).await? {
            debug!(%action, "Inline errors showing, not attempting");
            return Ok(false);
        }
        let done = self.driver.perform(scope, action, target).await?;
        debug!(%action, done, "Wizard action attempted");
        Ok(done)
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;

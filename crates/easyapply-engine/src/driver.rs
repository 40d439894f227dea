//! Wizard step actions.

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use easyapply_protocols::{BrowserError, Element, ElementHandle, Key, Locator, Scope, ScopeHandle};

use crate::probe::{absent_unless_fatal, empty_unless_fatal};

/// One state-changing control in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Advance,
    Review,
    FollowCompany,
    Submit,
}

impl WizardAction {
    /// Order in which actions are tried on every iteration.
    pub const PRIORITY: [WizardAction; 4] = [
        WizardAction::Advance,
        WizardAction::Review,
        WizardAction::FollowCompany,
        WizardAction::Submit,
    ];

    pub const fn locator(self) -> Locator {
        match self {
            WizardAction::Advance => Locator::css("button[aria-label='Continue to next step']"),
            WizardAction::Review => Locator::css("button[aria-label='Review your application']"),
            WizardAction::FollowCompany => Locator::css("label[for='follow-company-checkbox']"),
            WizardAction::Submit => Locator::css("button[aria-label='Submit application']"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WizardAction::Advance => "advance",
            WizardAction::Review => "review",
            WizardAction::FollowCompany => "follow_company",
            WizardAction::Submit => "submit",
        }
    }
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an actionable control was found.
pub enum ActionTarget {
    /// In the main document; re-queried right before clicking.
    Main,
    /// Inside an embedded document, reachable only by keyboard.
    Embedded {
        scope: ScopeHandle,
        element: ElementHandle,
    },
}

/// Finds and performs wizard actions.
#[derive(Debug, Clone, Copy)]
pub struct StepDriver {
    presence_timeout: Duration,
    click_timeout: Duration,
}

impl StepDriver {
    pub fn new(presence_timeout: Duration, click_timeout: Duration) -> Self {
        Self {
            presence_timeout,
            click_timeout,
        }
    }

    /// Where `action`'s control is, if it is present anywhere.
    pub async fn locate<S>(
        &self,
        scope: &S,
        action: WizardAction,
    ) -> Result<Option<ActionTarget>, BrowserError>
    where
        S: Scope + ?Sized,
    {
        let locator = action.locator();
        let in_main = absent_unless_fatal(
            scope.wait_for(&locator, self.presence_timeout).await,
            action.name(),
        )?;
        if in_main.is_some() {
            return Ok(Some(ActionTarget::Main));
        }

        for embedded in empty_unless_fatal(scope.embedded_scopes().await, "embedded scopes")? {
            if let Some(element) =
                absent_unless_fatal(embedded.find_one(&locator).await, action.name())?
            {
                return Ok(Some(ActionTarget::Embedded {
                    scope: embedded,
                    element,
                }));
            }
        }
        Ok(None)
    }

    /// Perform `action` on `target`. `Ok(false)` means the attempt did not
    /// go through; only fatal errors are returned.
    pub async fn perform<S>(
        &self,
        scope: &S,
        action: WizardAction,
        target: ActionTarget,
    ) -> Result<bool, BrowserError>
    where
        S: Scope + ?Sized,
    {
        let attempt = match target {
            ActionTarget::Main => {
                let element = absent_unless_fatal(
                    scope.wait_for(&action.locator(), self.click_timeout).await,
                    action.name(),
                )?;
                match element {
                    Some(element) => element.click().await.map(|()| true),
                    None => {
                        debug!(%action, "Control disappeared before click");
                        Ok(false)
                    }
                }
            }
            ActionTarget::Embedded { scope: frame, element } => {
                confirm_with_keyboard(&*frame, &*element).await.map(|()| true)
            }
        };

        match attempt {
            Ok(done) => Ok(done),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(%action, error = %e, "Wizard action failed");
                Ok(false)
            }
        }
    }
}

async fn confirm_with_keyboard(
    scope: &dyn Scope,
    element: &dyn Element,
) -> Result<(), BrowserError> {
    element.scroll_into_view().await?;
    element.focus().await?;
    scope.press_key(Key::Enter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{new_log, FakeElement, FakeScope};

    fn driver() -> StepDriver {
        StepDriver::new(Duration::from_secs(4), Duration::from_secs(2))
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            WizardAction::PRIORITY,
            [
                WizardAction::Advance,
                WizardAction::Review,
                WizardAction::FollowCompany,
                WizardAction::Submit
            ]
        );
        assert_eq!(
            WizardAction::Submit.locator().query,
            "button[aria-label='Submit application']"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_main_document_click() {
        let main = FakeScope::new("main", &new_log());
        main.add(&WizardAction::Advance.locator().query, FakeElement::new("next"));

        let target = driver().locate(&*main, WizardAction::Advance).await.unwrap();
        assert!(matches!(target, Some(ActionTarget::Main)));

        let done = driver()
            .perform(&*main, WizardAction::Advance, target.unwrap())
            .await
            .unwrap();
        assert!(done);
        assert_eq!(main.log_snapshot(), vec!["click:next"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_embedded_uses_keyboard() {
        let log = new_log();
        let main = FakeScope::new("main", &log);
        let frame = FakeScope::new("frame", &log);
        frame.add(&WizardAction::Submit.locator().query, FakeElement::new("submit"));
        main.embed(frame);

        let target = driver()
            .locate(&*main, WizardAction::Submit)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(target, ActionTarget::Embedded { .. }));

        assert!(driver().perform(&*main, WizardAction::Submit, target).await.unwrap());
        assert_eq!(
            main.log_snapshot(),
            vec!["scroll:submit", "focus:submit", "press:frame:Enter"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_everywhere() {
        let main = FakeScope::new("main", &new_log());
        main.embed(FakeScope::new("frame", &new_log()));
        assert!(driver()
            .locate(&*main, WizardAction::Review)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_failure_is_not_success() {
        let main = FakeScope::new("main", &new_log());
        main.add(
            &WizardAction::Advance.locator().query,
            FakeElement::new("next").failing_click(|| BrowserError::ActionFailed("covered".into())),
        );

        let done = driver()
            .perform(&*main, WizardAction::Advance, ActionTarget::Main)
            .await
            .unwrap();
        assert!(!done);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_click_failure_propagates() {
        let main = FakeScope::new("main", &new_log());
        main.add(
            &WizardAction::Advance.locator().query,
            FakeElement::new("next").failing_click(|| BrowserError::NotConnected),
        );

        let err = driver()
            .perform(&*main, WizardAction::Advance, ActionTarget::Main)
            .await
            .unwrap_err();
        assert!(err.is_fatal());
    }
}

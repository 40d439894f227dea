//! Filling required-and-empty fields.

use std::time::Duration;

use tracing::{debug, info, warn};

use easyapply_protocols::{ApplicantProfile, BrowserError, Element, FallbackResolver, Locator, Scope};

use crate::detector::ErrorDetector;
use crate::label::best_label;
use crate::probe::empty_unless_fatal;
use crate::resolver::resolve_value;

/// Auto-generated ids of the single-line text questions in the wizard.
pub const FORM_INPUTS: Locator = Locator::css(
    r#"[id^="single-line-text-form-component-formElement-urn-li-jobs-applyformcommon-easyApplyFormElement-"]"#,
);

/// Answers required fields from the applicant profile.
pub struct FieldFiller<'a> {
    profile: &'a ApplicantProfile,
    fallback: Option<&'a dyn FallbackResolver>,
    label_timeout: Duration,
}

impl<'a> FieldFiller<'a> {
    pub fn new(
        profile: &'a ApplicantProfile,
        fallback: Option<&'a dyn FallbackResolver>,
        label_timeout: Duration,
    ) -> Self {
        Self {
            profile,
            fallback,
            label_timeout,
        }
    }

    /// Type a resolved value into every required, empty form input in
    /// `scope`. Returns how many fields were filled.
    ///
    /// A field that cannot be typed into is logged and skipped; only fatal
    /// session errors abort the pass.
    pub async fn fill_invalids<S>(&self, scope: &S) -> Result<usize, BrowserError>
    where
        S: Scope + ?Sized,
    {
        let inputs = empty_unless_fatal(scope.find_all(&FORM_INPUTS).await, "form inputs")?;
        let mut filled = 0;

        for input in inputs {
            match needs_value(&*input).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    debug!(error = %e, "Could not inspect input, skipping");
                    continue;
                }
            }

            let label = best_label(scope, &*input, self.label_timeout).await;
            let input_type = match input.attribute("type").await {
                Ok(t) => t.unwrap_or_default(),
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => String::new(),
            };
            let value = resolve_value(&label, &input_type, self.profile, self.fallback).await;

            match input.clear_and_type(&value).await {
                Ok(()) => {
                    info!(label = %label, value = %value, "Filled required field");
                    filled += 1;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => warn!(label = %label, error = %e, "Failed to fill field, skipping"),
            }
        }

        Ok(filled)
    }

    /// Fill pass over every place showing an inline error.
    ///
    /// Embedded modals are filled through their encapsulated sub-tree; an
    /// embedded document without one is left alone.
    pub async fn handle_inline_errors<S>(
        &self,
        scope: &S,
        detector: &ErrorDetector,
    ) -> Result<(), BrowserError>
    where
        S: Scope + ?Sized,
    {
        if !detector.has_errors(scope).await? {
            return Ok(());
        }

        let found = detector.locate(scope).await?;
        if found.main {
            self.fill_invalids(scope).await?;
        }
        for root in &found.modal_roots {
            self.fill_invalids(&**root).await?;
        }
        if found.embedded > 0 {
            debug!(
                count = found.embedded,
                "Inline errors in embedded documents without a modal sub-tree"
            );
        }
        Ok(())
    }
}

/// Required and currently blank.
async fn needs_value(input: &dyn Element) -> Result<bool, BrowserError> {
    let value = input.attribute("value").await?.unwrap_or_default();
    if !value.trim().is_empty() {
        return Ok(false);
    }
    is_required(input).await
}

async fn is_required(input: &dyn Element) -> Result<bool, BrowserError> {
    if input
        .attribute("aria-required")
        .await?
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    {
        return Ok(true);
    }
    if input.attribute("required").await?.is_some() {
        return Ok(true);
    }
    Ok(input
        .attribute("class")
        .await?
        .is_some_and(|c| c.to_lowercase().contains("required")))
}

#[cfg(test)]
#[path = "fill_tests.rs"]
mod tests;

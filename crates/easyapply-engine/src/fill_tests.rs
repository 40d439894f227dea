use super::*;

use std::sync::Arc;

use crate::detector::{ERROR_MARKER, MODAL_HOST};
use crate::fake::{new_log, FakeElement, FakeScope};

const INPUT_PREFIX: &str =
    "single-line-text-form-component-formElement-urn-li-jobs-applyformcommon-easyApplyFormElement-";

fn profile() -> ApplicantProfile {
    ApplicantProfile {
        phone_number: "555-0100".to_string(),
        years_experience: 7,
        city: "Austin".to_string(),
        state: "TX".to_string(),
        ..Default::default()
    }
}

fn question(scope: &Arc<FakeScope>, suffix: &str, label: &str) -> FakeElement {
    let id = format!("{INPUT_PREFIX}{suffix}");
    scope.add(&Locator::label_for(&id).query, FakeElement::new("label").text(label));
    FakeElement::new(suffix).attr("id", &id)
}

fn filler(profile: &ApplicantProfile) -> FieldFiller<'_> {
    FieldFiller::new(profile, None, Duration::from_millis(300))
}

#[tokio::test(start_paused = true)]
async fn test_fills_required_empty_inputs() {
    let p = profile();
    let scope = FakeScope::new("form", &new_log());
    let phone = question(&scope, "phone", "Mobile phone number").attr("aria-required", "true");
    let phone = scope.add(&FORM_INPUTS.query, phone);
    let city = question(&scope, "city", "City").attr("required", "");
    let city = scope.add(&FORM_INPUTS.query, city);
    let years = question(&scope, "years", "How many years?")
        .attr("class", "fb-dash-form-element__required")
        .attr("type", "number");
    let years = scope.add(&FORM_INPUTS.query, years);

    let filled = filler(&p).fill_invalids(&*scope).await.unwrap();

    assert_eq!(filled, 3);
    assert_eq!(phone.value().as_deref(), Some("555-0100"));
    assert_eq!(city.value().as_deref(), Some("Austin, TX"));
    assert_eq!(years.value().as_deref(), Some("7"));
}

#[tokio::test(start_paused = true)]
async fn test_skips_filled_and_optional_inputs() {
    let p = profile();
    let scope = FakeScope::new("form", &new_log());
    let prefilled = question(&scope, "a", "Phone")
        .attr("aria-required", "true")
        .attr("value", " 555-9999 ");
    let prefilled = scope.add(&FORM_INPUTS.query, prefilled);
    let optional = question(&scope, "b", "Phone").attr("aria-required", "false");
    let optional = scope.add(&FORM_INPUTS.query, optional);

    let filled = filler(&p).fill_invalids(&*scope).await.unwrap();

    assert_eq!(filled, 0);
    assert_eq!(prefilled.value().as_deref(), Some(" 555-9999 "));
    assert_eq!(optional.value(), None);
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_value_counts_as_empty() {
    let p = profile();
    let scope = FakeScope::new("form", &new_log());
    let input = question(&scope, "a", "State")
        .attr("required", "")
        .attr("value", "   ");
    let input = scope.add(&FORM_INPUTS.query, input);

    filler(&p).fill_invalids(&*scope).await.unwrap();
    assert_eq!(input.value().as_deref(), Some("TX"));
}

#[tokio::test(start_paused = true)]
async fn test_type_failure_is_skipped() {
    let p = profile();
    let scope = FakeScope::new("form", &new_log());
    let broken = question(&scope, "a", "Phone")
        .attr("required", "")
        .failing_type(|| BrowserError::ActionFailed("detached".into()));
    scope.add(&FORM_INPUTS.query, broken);
    let city = question(&scope, "b", "City").attr("required", "");
    let city = scope.add(&FORM_INPUTS.query, city);

    let filled = filler(&p).fill_invalids(&*scope).await.unwrap();

    assert_eq!(filled, 1);
    assert_eq!(city.value().as_deref(), Some("Austin, TX"));
}

#[tokio::test(start_paused = true)]
async fn test_fatal_type_failure_propagates() {
    let p = profile();
    let scope = FakeScope::new("form", &new_log());
    let broken = question(&scope, "a", "Phone")
        .attr("required", "")
        .failing_type(|| BrowserError::SessionClosed);
    scope.add(&FORM_INPUTS.query, broken);

    let err = filler(&p).fill_invalids(&*scope).await.unwrap_err();
    assert!(matches!(err, BrowserError::SessionClosed));
}

#[tokio::test(start_paused = true)]
async fn test_handle_inline_errors_fills_modal_shadow_root() {
    let p = profile();
    let log = new_log();
    let main = FakeScope::new("main", &log);
    let frame = FakeScope::new("frame", &log);
    let shadow = FakeScope::new("shadow", &log);

    shadow.add(&ERROR_MARKER.query, FakeElement::new("icon"));
    let phone = question(&shadow, "phone", "Phone").attr("required", "");
    let phone = shadow.add(&FORM_INPUTS.query, phone);
    frame.add(&MODAL_HOST.query, FakeElement::new("modal").shadow(shadow));
    main.embed(frame);

    let detector = ErrorDetector::new(Duration::from_secs(4));
    filler(&p)
        .handle_inline_errors(&*main, &detector)
        .await
        .unwrap();

    assert_eq!(phone.value().as_deref(), Some("555-0100"));
}

#[tokio::test(start_paused = true)]
async fn test_handle_inline_errors_fills_main_document() {
    let p = profile();
    let main = FakeScope::new("main", &new_log());
    main.add(&ERROR_MARKER.query, FakeElement::new("icon"));
    let phone = question(&main, "phone", "Phone").attr("required", "");
    let phone = main.add(&FORM_INPUTS.query, phone);

    let detector = ErrorDetector::new(Duration::from_secs(4));
    filler(&p)
        .handle_inline_errors(&*main, &detector)
        .await
        .unwrap();

    assert_eq!(phone.value().as_deref(), Some("555-0100"));
}

#[tokio::test(start_paused = true)]
async fn test_handle_inline_errors_without_errors_touches_nothing() {
    let p = profile();
    let main = FakeScope::new("main", &new_log());
    let phone = question(&main, "phone", "Phone").attr("required", "");
    let phone = main.add(&FORM_INPUTS.query, phone);

    let detector = ErrorDetector::new(Duration::from_secs(4));
    filler(&p)
        .handle_inline_errors(&*main, &detector)
        .await
        .unwrap();

    assert_eq!(phone.value(), None);
}

//! Field value resolution.
//!
//! Maps a form control's label and input type to the text typed into it.
//! Keyword rules are checked first, most specific cue first; an injected
//! fallback is consulted only when none match, and every path ends in a
//! non-empty numeric default so a required field is never left blank.

use tracing::{debug, warn};

use easyapply_protocols::{ApplicantProfile, FallbackResolver};

const PHONE_KEYWORDS: &[&str] = &["phone", "mobile", "telephone", "contact"];
const LOCATION_KEYWORDS: &[&str] = &["city", "location", "reside"];
const SALARY_KEYWORDS: &[&str] = &["salary", "wage", "income", "compensation"];
const PROFILE_KEYWORDS: &[&str] = &["linkedin", "linked-in", "linked in"];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

/// Keyword rules only. `None` means no rule classified the field.
pub fn heuristic_value(label: &str, input_type: &str, profile: &ApplicantProfile) -> Option<String> {
    let label = label.trim().to_lowercase();
    let input_type = input_type.trim().to_lowercase();

    if contains_any(&label, PHONE_KEYWORDS) {
        return Some(profile.phone_number.clone());
    }
    if contains_any(&label, LOCATION_KEYWORDS) {
        return Some(profile.city_and_state());
    }
    if label.contains("have you ever worked") {
        return Some("No".to_string());
    }
    if label.contains("state") {
        return Some(profile.state.clone());
    }
    if contains_any(&label, SALARY_KEYWORDS) {
        return Some(profile.desired_salary.to_string());
    }
    if label.contains("experience") && label.contains("year") {
        return Some(profile.years_experience.to_string());
    }
    if contains_any(&label, PROFILE_KEYWORDS) {
        return Some(profile.profile_url.clone());
    }
    if input_type == "number" {
        return Some(profile.years_experience.to_string());
    }
    None
}

/// Resolve the value for one field. Never fails.
pub async fn resolve_value(
    label: &str,
    input_type: &str,
    profile: &ApplicantProfile,
    fallback: Option<&dyn FallbackResolver>,
) -> String {
    if let Some(value) = heuristic_value(label, input_type, profile) {
        return value;
    }

    if let Some(fallback) = fallback {
        match fallback.answer(label, input_type).await {
            Ok(answer) if !answer.trim().is_empty() => return answer.trim().to_string(),
            Ok(_) => debug!(label, "Fallback returned an empty answer"),
            Err(e) => warn!(label, error = %e, "Fallback resolver failed"),
        }
    }

    profile.years_experience.to_string()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

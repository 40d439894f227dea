//! Applicant profile.

use serde::{Deserialize, Serialize};

/// Read-only applicant data the engine answers form questions from.
///
/// At least one position and one location should be present for discovery
/// to be meaningful; the engine reports an empty list as an error rather than
/// enforcing it here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    #[serde(default)]
    pub phone_number: String,

    #[serde(default)]
    pub positions: Vec<String>,

    #[serde(default)]
    pub locations: Vec<String>,

    #[serde(default)]
    pub remote_only: bool,

    #[serde(default)]
    pub profile_url: String,

    #[serde(default)]
    pub years_experience: u32,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub desired_salary: u64,
}

impl ApplicantProfile {
    /// `"{city}, {state}"`.
    pub fn city_and_state(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

//! # EasyApply Engine
//!
//! Drives "Easy Apply" job applications through any browser backend that
//! implements the [`easyapply_protocols`] capability traits.
//!
//! Leaf-first:
//! - [`label`] finds the best human-readable label for a form control
//! - [`resolver`] maps a label and input type to an answer from the profile
//! - [`detector`] reports inline validation errors across nested documents
//! - [`fill`] fills required-and-empty inputs and recovers from errors
//! - [`driver`] locates and performs one wizard action
//! - [`form`] runs the bounded wizard loop for one application
//! - [`discovery`] collects job ids from a search results page
//! - [`campaign`] ties discovery and the form engine together
//! - [`login`] signs in before a campaign

pub mod campaign;
pub mod detector;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod fill;
pub mod form;
pub mod label;
pub mod login;
pub mod pacing;
pub mod resolver;
pub mod settings;

mod probe;

#[cfg(test)]
pub(crate) mod fake;

pub use campaign::{Campaign, CampaignReport, JobOutcome, JobRecord, StopReason};
pub use discovery::{JobDiscovery, SearchQuery};
pub use error::{DiscoveryError, EngineError};
pub use form::{FormEngine, FormOutcome};
pub use login::{LoginFlow, LoginOutcome};
pub use pacing::Pacer;
pub use resolver::resolve_value;
pub use settings::{CampaignSettings, DiscoverySettings, WizardSettings};

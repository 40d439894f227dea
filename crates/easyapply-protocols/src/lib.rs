//! # EasyApply Protocols
//!
//! Capability definitions (traits) consumed by the EasyApply engine.
//! Contains only interfaces and plain data - no browser implementation.
//!
//! ## Core Traits
//!
//! - [`Scope`] - A queryable DOM region (document, iframe document, shadow root)
//! - [`Element`] - A single live element inside a scope
//! - [`BrowserPage`] - The main document of the controlled page plus navigation
//! - [`FallbackResolver`] - External decision source for unclassified form fields
//! - [`JobIdParser`] - Extracts a posting identifier from a result link

pub mod error;
pub mod fallback;
pub mod job;
pub mod locator;
pub mod profile;
pub mod scope;

pub use error::{BrowserError, FallbackError};
pub use fallback::FallbackResolver;
pub use job::{JobId, JobIdParser, PathSegmentParser};
pub use locator::{Key, Locator, LocatorKind};
pub use profile::ApplicantProfile;
pub use scope::{BrowserPage, Element, ElementHandle, Scope, ScopeHandle, DEFAULT_POLL_INTERVAL};

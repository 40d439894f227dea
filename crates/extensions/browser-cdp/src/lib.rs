//! Browser control for EasyApply.
//!
//! Drives Chrome via the Chrome DevTools Protocol (CDP) and exposes the page
//! through the capability traits of `easyapply-protocols`. Pure Rust, no
//! Node.js or WebDriver in between.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  Rust Backend   │ ◄──────────────► │   Chrome/Edge    │
//! │  (this crate)   │       CDP        │ (launched by us) │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! ## Setup
//!
//! [`BrowserManager`] launches Chrome with remote debugging and a persistent
//! profile directory, so a signed-in session survives between runs. An
//! already running instance on the debug port is reused:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222 --user-data-dir=~/.easyapply/browser-profile
//! ```
//!
//! ## Scopes
//!
//! - [`CdpPage`] - the top document of a tab; implements `BrowserPage`
//! - [`CdpScope`] - any other search root: a same-origin iframe's
//!   `contentDocument` or an element's `shadowRoot`
//! - [`CdpElement`] - a live element handle (a Runtime remote object)

pub mod cdp;
pub mod manager;
mod page;
mod scope;
mod scripts;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use manager::{ApplyingGuard, BrowserManager, BrowserManagerConfig};
pub use page::CdpPage;
pub use scope::{CdpElement, CdpScope};

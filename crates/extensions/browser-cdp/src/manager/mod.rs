//! Chrome lifecycle: locate, launch, connect, open the working tab, shut
//! down. Also tracks whether an application is in progress.

mod manager_core;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{ApplyingGuard, BrowserManagerConfig, ManagerError};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

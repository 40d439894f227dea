//! OpenAI-compatible fallback resolver for EasyApply.
//!
//! Answers form questions the keyword heuristics could not classify by
//! asking a chat-completions endpoint for the bare value to enter.

mod api;
mod resolver;

pub use resolver::{DEFAULT_API_URL, DEFAULT_MODEL, OpenAiFallback};

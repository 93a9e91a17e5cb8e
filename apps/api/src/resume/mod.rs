//! Resume storage, sanitization, and AI analysis.

pub mod handlers;
pub mod prompts;
pub mod sanitize;

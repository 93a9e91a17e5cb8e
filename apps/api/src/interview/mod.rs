//! Interview simulation: question generation and per-answer evaluation.

pub mod handlers;
pub mod prompts;

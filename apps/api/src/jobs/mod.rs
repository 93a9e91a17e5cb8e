//! Job-role matching and job-application tracking.

pub mod handlers;
pub mod prompts;

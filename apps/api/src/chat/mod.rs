//! Profile-aware chat assistant with a short rolling history.

pub mod handlers;
pub mod prompts;
pub mod service;

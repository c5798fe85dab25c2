//! Account registration and login.

pub mod handlers;
pub mod store;

//! User profiles: wholesale replace-on-update storage and prompt renderings.

pub mod context;
pub mod handlers;
pub mod store;

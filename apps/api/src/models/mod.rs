pub mod chat;
pub mod cv;
pub mod job;
pub mod profile;
pub mod user;

//! Job postings: page scraping, AI analysis and storage.

pub mod analysis;
pub mod handlers;
pub mod prompts;
pub mod scraper;
pub mod store;

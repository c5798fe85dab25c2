//! Job/skill matching: keyword-table posting parser, match scoring, extraction merge
//! and market analysis.

pub mod handlers;
pub mod market;
pub mod merge;
pub mod parser;
pub mod prompts;
pub mod scoring;
pub mod skills;

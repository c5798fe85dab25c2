// CV generation: tailored summaries, item rewriting, ATS assembly, translation and
// career advice. All model calls go through the provider gateway.

pub mod assembler;
pub mod descriptions;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod summaries;
pub mod translation;

// Generation: model-backed drafting for the wizard.
// Implements: summary, experience bullets, skill suggestions, resume
// optimization, job-match analysis and cover letters.
// All model calls go through llm_client via the gateway; nothing here talks HTTP to the model.

pub mod gateway;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;

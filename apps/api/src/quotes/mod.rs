// Quote generation domain.
// Implements: board state machine, topic validation, fetch orchestration,
// prompt template, HTTP handlers.
// All Gemini calls go through llm_client — no direct provider calls here.

pub mod board;
pub mod fetcher;
pub mod handlers;
pub mod prompts;

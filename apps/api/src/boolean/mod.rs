// Boolean search-string generation.
// Implements: prompt composition, the initial/refined generation protocol, session capture.
// All backend calls go through llm_client::TextBackend — no direct HTTP calls here.

pub mod composer;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod session;

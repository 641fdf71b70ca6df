// Cover letters: generation, conversational revision, and the offline
// template/canned fallbacks they degrade to.
// All remote calls go through llm_client — no direct HTTP calls here.

pub mod extract;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod reviser;
pub mod template;

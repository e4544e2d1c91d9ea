// Mock-interview engine.
// Question generation, conversational turns and answer scoring over a chat-completion model.
// All model calls go through llm_client; every operation degrades to static content.

pub mod defaults;
pub mod handlers;
pub mod orchestrator;
pub mod parsing;
pub mod prompts;
pub mod types;

// Content generation: OpenAI-backed title/body/meta/tag operations and
// the complete-blog composition pipeline.
// All LLM calls go through llm_client; no direct OpenAI calls here.

pub mod composer;
pub mod content;
pub mod handlers;
pub mod prompts;

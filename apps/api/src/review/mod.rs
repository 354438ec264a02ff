// Contract review pipeline.
// Implements: prompt evaluation loop, pacing policy, upload handler.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod pacing;

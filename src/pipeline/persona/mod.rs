//! Persona pipeline: fact extraction, then a persona rewrite for the
//! selected reading level.

pub mod llm;
pub mod orchestrator;
pub mod prompt;

pub use llm::{ClaudeClient, LlmClient, LlmError};
pub use orchestrator::{PersonaPipeline, PipelineError, TranslationOutcome};
pub use prompt::PersonaPrompts;

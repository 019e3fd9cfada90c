use serde::Serialize;
use thiserror::Error;

use super::llm::{LlmClient, LlmError};
use super::prompt::{
    fact_extraction_prompt, persona_rewrite_prompt, PersonaPrompts, FACT_TOKEN_BUDGET,
    PERSONA_TOKEN_BUDGET,
};
use crate::pipeline::quality::{generate_fallback, repair, score, ReadingLevelMode, ValidationResult};
use crate::pipeline::safety::SanitizedText;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("No persona prompt configured for mode {0}")]
    MissingPersona(ReadingLevelMode),
}

/// Everything produced for one translation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOutcome {
    pub original_text: String,
    pub extracted_facts: String,
    pub translation: String,
    pub mode: ReadingLevelMode,
    /// Score of the unrepaired rewrite.
    pub quality: ValidationResult,
    /// A repair pass ran on the rewrite.
    pub repaired: bool,
    /// The persona rewrite was skipped and a canned reply used instead.
    pub fallback_used: bool,
}

/// Two sequential model calls, fact extraction then persona rewrite,
/// followed by scoring and an optional repair pass.
///
/// Holds only shared references; one pipeline value per request is cheap.
pub struct PersonaPipeline<'a> {
    llm: &'a dyn LlmClient,
    prompts: &'a PersonaPrompts,
}

impl<'a> PersonaPipeline<'a> {
    pub fn new(llm: &'a dyn LlmClient, prompts: &'a PersonaPrompts) -> Self {
        Self { llm, prompts }
    }

    /// First call: neutral bulleted facts from the source text.
    pub async fn extract_facts(
        &self,
        text: &SanitizedText,
        mode: ReadingLevelMode,
    ) -> Result<String, PipelineError> {
        let prompt = fact_extraction_prompt(text.as_str(), mode);
        let facts = self.llm.complete(&prompt, FACT_TOKEN_BUDGET).await?;
        tracing::debug!(mode = %mode, facts_len = facts.len(), "Facts extracted");
        Ok(facts)
    }

    /// Second call: the persona explains the facts for the mode's readers.
    pub async fn rewrite(
        &self,
        facts: &str,
        mode: ReadingLevelMode,
    ) -> Result<String, PipelineError> {
        let persona = self
            .prompts
            .get(mode)
            .ok_or(PipelineError::MissingPersona(mode))?;
        let prompt = persona_rewrite_prompt(persona, facts);
        Ok(self.llm.complete(&prompt, PERSONA_TOKEN_BUDGET).await?)
    }

    /// Full request: extract, rewrite, score, repair when confidence is low.
    pub async fn run(
        &self,
        text: &SanitizedText,
        mode: ReadingLevelMode,
    ) -> Result<TranslationOutcome, PipelineError> {
        let extracted_facts = self.extract_facts(text, mode).await?;

        let rewritten = match self.rewrite(&extracted_facts, mode).await {
            Ok(rewritten) => rewritten,
            Err(PipelineError::MissingPersona(mode)) => {
                tracing::error!(mode = %mode, "Persona prompt missing; returning fallback reply");
                let translation = generate_fallback(text.as_str(), mode);
                let quality = score(&translation, mode);
                return Ok(TranslationOutcome {
                    original_text: text.as_str().to_string(),
                    extracted_facts,
                    translation,
                    mode,
                    quality,
                    repaired: false,
                    fallback_used: true,
                });
            }
            Err(e) => return Err(e),
        };

        let quality = score(&rewritten, mode);
        let (translation, repaired) = if quality.needs_repair() {
            tracing::warn!(
                mode = %mode,
                confidence = quality.confidence,
                issues = ?quality.issues,
                "Low-quality response detected"
            );
            (repair(&rewritten, &quality, mode), true)
        } else {
            (rewritten, false)
        };

        tracing::info!(
            mode = %mode,
            confidence = quality.confidence,
            repaired,
            "Translation complete"
        );

        Ok(TranslationOutcome {
            original_text: text.as_str().to_string(),
            extracted_facts,
            translation,
            mode,
            quality,
            repaired,
            fallback_used: false,
        })
    }
}

use std::collections::HashMap;
use std::path::Path;

use crate::pipeline::quality::ReadingLevelMode;

/// Token budget for the fact-extraction call.
pub const FACT_TOKEN_BUDGET: u32 = 1_000;
/// Token budget for the persona rewrite call.
pub const PERSONA_TOKEN_BUDGET: u32 = 2_000;

const FACTS_START: &str = "--- START OF FACTS TO EXPLAIN ---";
const FACTS_END: &str = "--- END OF FACTS TO EXPLAIN ---";

/// Persona prompt file for each mode, relative to the prompts directory.
pub fn prompt_file_name(mode: ReadingLevelMode) -> &'static str {
    match mode {
        ReadingLevelMode::EarlyElementary => "prompt_aichan_8yo.txt",
        ReadingLevelMode::LateElementary => "prompt_aichan_4-6yo.txt",
        ReadingLevelMode::English => "prompt_aichan_english.txt",
    }
}

/// Persona prompts, loaded once at start-up and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct PersonaPrompts {
    prompts: HashMap<ReadingLevelMode, String>,
}

impl PersonaPrompts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every mode's prompt from `dir`. Unreadable files leave that
    /// mode without a prompt.
    pub fn load_from_dir(dir: &Path) -> Self {
        let mut prompts = HashMap::new();
        for mode in ReadingLevelMode::ALL {
            let path = dir.join(prompt_file_name(mode));
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    tracing::info!(mode = %mode, path = %path.display(), "Persona prompt loaded");
                    prompts.insert(mode, text);
                }
                Err(e) => {
                    tracing::warn!(
                        mode = %mode,
                        path = %path.display(),
                        error = %e,
                        "Persona prompt unavailable; mode will use fallback replies"
                    );
                }
            }
        }
        Self { prompts }
    }

    pub fn with_prompt(mut self, mode: ReadingLevelMode, prompt: impl Into<String>) -> Self {
        self.prompts.insert(mode, prompt.into());
        self
    }

    pub fn get(&self, mode: ReadingLevelMode) -> Option<&str> {
        self.prompts.get(&mode).map(String::as_str)
    }
}

/// Neutral extraction prompt for the first model call.
pub fn fact_extraction_prompt(text: &str, mode: ReadingLevelMode) -> String {
    let presentation = if mode.is_english() {
        "Present the facts in English, translating any Japanese content accurately."
    } else {
        "Do not add any interpretation, explanation, or personality. Present the facts in Japanese."
    };
    format!(
        "Act as a neutral data extractor. Read the following Japanese text and extract its core \
         factual statements into a simple, objective, bulleted list. {presentation}\n\nTEXT: {text}"
    )
}

/// Persona prompt followed by the delimited facts for the second call.
pub fn persona_rewrite_prompt(persona: &str, facts: &str) -> String {
    format!("{persona}\n\n{FACTS_START}\n{facts}\n{FACTS_END}")
}

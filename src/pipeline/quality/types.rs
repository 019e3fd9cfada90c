use serde::{Deserialize, Serialize};

/// Starting score before any rubric check subtracts from it.
pub const FULL_CONFIDENCE: i32 = 100;

/// Callers repair a response when its confidence is strictly below this.
pub const REPAIR_THRESHOLD: i32 = 80;

/// Target audience for the rewritten explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReadingLevelMode {
    /// Grades 1–3.
    #[default]
    #[serde(rename = "1-3")]
    EarlyElementary,
    /// Grades 4–6.
    #[serde(rename = "4-6")]
    LateElementary,
    /// English-speaking readers.
    #[serde(rename = "english")]
    English,
}

impl ReadingLevelMode {
    pub const ALL: [ReadingLevelMode; 3] = [
        ReadingLevelMode::EarlyElementary,
        ReadingLevelMode::LateElementary,
        ReadingLevelMode::English,
    ];

    /// Wire label used by the browser client.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyElementary => "1-3",
            Self::LateElementary => "4-6",
            Self::English => "english",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Self::English)
    }
}

impl std::fmt::Display for ReadingLevelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one rewritten response.
///
/// `confidence` starts at [`FULL_CONFIDENCE`] and only goes down; it is not
/// clamped, so it can go below zero. `is_valid` is cleared only by the
/// minimum-length check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub confidence: i32,
    pub issues: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            confidence: FULL_CONFIDENCE,
            issues: Vec::new(),
        }
    }

    /// Whether the caller should attempt a repair pass.
    pub fn needs_repair(&self) -> bool {
        self.confidence < REPAIR_THRESHOLD
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

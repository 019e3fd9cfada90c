use serde::Serialize;
use thiserror::Error;

/// Maximum accepted input length, in UTF-16 code units.
pub const MAX_INPUT_LENGTH: usize = 10_000;

/// Minimum input length after trimming, in UTF-16 code units.
pub const MIN_INPUT_LENGTH: usize = 3;

/// Text that passed the input gates and had its markup neutralised.
///
/// Only constructed by [`super::sanitize::sanitize_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedText(String);

impl SanitizedText {
    pub(super) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for SanitizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which family of prompt-injection pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionCategory {
    /// "ignore previous instructions", "forget previous context".
    InstructionOverride,
    /// Bare role labels such as `system:`.
    RoleLabel,
    /// Role labels wrapped in `###`, `---`, `[...]` or `<|...|>`.
    DelimitedRoleLabel,
    /// The literal word "jailbreak".
    Jailbreak,
    /// "roleplay as", "pretend to be", "pretend you are".
    RolePlay,
}

impl InjectionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InstructionOverride => "instruction_override",
            Self::RoleLabel => "role_label",
            Self::DelimitedRoleLabel => "delimited_role_label",
            Self::Jailbreak => "jailbreak",
            Self::RolePlay => "role_play",
        }
    }
}

/// Why submitted text was refused before reaching the model.
///
/// Every variant is a user-recoverable validation failure; none is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    #[error("Invalid input: text field missing, empty or not a string")]
    InvalidInput,

    #[error("Text too long: {length} > {MAX_INPUT_LENGTH}")]
    TextTooLong { length: usize },

    #[error("Text too short: fewer than {MIN_INPUT_LENGTH} characters after trimming")]
    TextTooShort,

    #[error("Potentially harmful content detected ({})", category.as_str())]
    SuspiciousContent { category: InjectionCategory },

    #[error("Text contains only symbols")]
    SymbolOnlyContent,

    #[error("Spam detected: repeated character run")]
    SpamDetected,
}

impl InputRejection {
    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::TextTooLong { .. } => "TEXT_TOO_LONG",
            Self::TextTooShort => "TEXT_TOO_SHORT",
            Self::SuspiciousContent { .. } => "SUSPICIOUS_CONTENT",
            Self::SymbolOnlyContent => "SYMBOL_ONLY_CONTENT",
            Self::SpamDetected => "SPAM_DETECTED",
        }
    }

    /// Message shown to the person who submitted the text.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidInput => "有効なテキストを入力してください",
            Self::TextTooLong { .. } => "テキストが長すぎます（10,000文字以内）",
            Self::TextTooShort => "テキストが短すぎます（3文字以上）",
            Self::SuspiciousContent { .. } => {
                "不適切な内容が検出されました。通常のテキストを入力してください。"
            }
            Self::SymbolOnlyContent => "意味のあるテキストを入力してください",
            Self::SpamDetected => "同じ文字の繰り返しは処理できません",
        }
    }
}

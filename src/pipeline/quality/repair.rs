//! Bounded local repair of low-confidence responses.
//!
//! A repair is one deterministic pass over the text. It never re-scores,
//! never retries and never calls the model again.

use super::kanji::complex_kanji;
use super::types::{ReadingLevelMode, ValidationResult, REPAIR_THRESHOLD};

/// Complex kanji considered per repair pass.
pub const REPAIR_KANJI_LIMIT: usize = 5;

/// Kanji compounds with a reading an early-elementary reader can follow.
pub const KANA_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("調査", "しらべること"),
    ("確認", "たしかめること"),
    ("説明", "せつめい"),
    ("理解", "りかい"),
    ("重要", "たいせつ"),
    ("問題", "もんだい"),
    ("解決", "かいけつ"),
    ("状況", "じょうきょう"),
    ("方法", "ほうほう"),
    ("結果", "けっか"),
];

/// How a mode's responses get repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStrategy {
    /// Swap known compounds containing complex kanji for their kana reading.
    KanjiToKana,
    /// No repair exists for this mode; text passes through unchanged.
    Unsupported,
}

impl RepairStrategy {
    pub fn for_mode(mode: ReadingLevelMode) -> Self {
        match mode {
            ReadingLevelMode::EarlyElementary => Self::KanjiToKana,
            ReadingLevelMode::LateElementary | ReadingLevelMode::English => Self::Unsupported,
        }
    }
}

/// Attempt one repair pass on `text`.
///
/// Returns the input unchanged when `validation.confidence` is above the
/// repair threshold. The result is not re-scored; `validation` stays as is.
pub fn repair(text: &str, validation: &ValidationResult, mode: ReadingLevelMode) -> String {
    if validation.confidence > REPAIR_THRESHOLD {
        return text.to_string();
    }

    match RepairStrategy::for_mode(mode) {
        RepairStrategy::KanjiToKana => substitute_kana(text),
        RepairStrategy::Unsupported => text.to_string(),
    }
}

/// For each of the first few distinct complex kanji, replace every
/// occurrence of each table compound containing it.
fn substitute_kana(text: &str) -> String {
    let mut repaired = text.to_string();
    let mut replaced = 0usize;

    for kanji in complex_kanji(text).into_iter().take(REPAIR_KANJI_LIMIT) {
        for &(compound, reading) in KANA_SUBSTITUTIONS {
            if compound.contains(kanji) && repaired.contains(compound) {
                repaired = repaired.replace(compound, reading);
                replaced += 1;
            }
        }
    }

    tracing::debug!(replaced, "Kana substitution pass complete");
    repaired
}

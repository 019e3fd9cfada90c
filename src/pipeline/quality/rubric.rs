//! Per-mode scoring rubrics.
//!
//! Each mode owns an ordered table of checks. A check returns the issue
//! text when the response fails it; the validator applies the penalty.
//! Table order only affects the order of reported issues.

use super::kanji::complex_kanji;
use super::types::ReadingLevelMode;
use crate::text::utf16_len;

/// Responses shorter than this (UTF-16 units) are invalid.
pub const MIN_RESPONSE_LENGTH: usize = 50;
/// Responses longer than this (UTF-16 units) are penalised.
pub const MAX_RESPONSE_LENGTH: usize = 5_000;
/// Complex kanji listed in the issue text.
pub const COMPLEX_KANJI_REPORT_LIMIT: usize = 3;

/// Self-references expected from the persona in Japanese modes.
pub const JAPANESE_PERSONA_TERMS: &[&str] = &["あいちゃん", "わたし"];
/// Persona name and role word expected in English mode.
pub const ENGLISH_PERSONA_TERMS: &[&str] = &["Ai-chan", "detective"];

const LATE_ELEMENTARY_STRUCTURE_MARKERS: &[&str] = &["#", "**", "。"];
const ENGLISH_STRUCTURE_MARKERS: &[&str] = &["**", "Mystery", "!"];

/// One row of a rubric table.
pub struct RubricCheck {
    pub name: &'static str,
    pub penalty: i32,
    /// Failing this check marks the response invalid.
    pub invalidates: bool,
    evaluate: fn(&str, ReadingLevelMode) -> Option<String>,
}

impl RubricCheck {
    /// Issue text if `text` fails this check.
    pub fn evaluate(&self, text: &str, mode: ReadingLevelMode) -> Option<String> {
        (self.evaluate)(text, mode)
    }
}

const MIN_LENGTH: RubricCheck = RubricCheck {
    name: "min_length",
    penalty: 30,
    invalidates: true,
    evaluate: check_min_length,
};

const MAX_LENGTH: RubricCheck = RubricCheck {
    name: "max_length",
    penalty: 10,
    invalidates: false,
    evaluate: check_max_length,
};

const JAPANESE_PERSONA: RubricCheck = RubricCheck {
    name: "persona",
    penalty: 40,
    invalidates: false,
    evaluate: check_japanese_persona,
};

const ENGLISH_PERSONA: RubricCheck = RubricCheck {
    name: "persona",
    penalty: 40,
    invalidates: false,
    evaluate: check_english_persona,
};

const KANJI_COMPLEXITY: RubricCheck = RubricCheck {
    name: "kanji_complexity",
    penalty: 20,
    invalidates: false,
    evaluate: check_kanji_complexity,
};

const LATE_ELEMENTARY_STRUCTURE: RubricCheck = RubricCheck {
    name: "structure",
    penalty: 15,
    invalidates: false,
    evaluate: check_late_elementary_structure,
};

const ENGLISH_STRUCTURE: RubricCheck = RubricCheck {
    name: "structure",
    penalty: 15,
    invalidates: false,
    evaluate: check_english_structure,
};

static EARLY_ELEMENTARY_RUBRIC: [RubricCheck; 4] =
    [MIN_LENGTH, MAX_LENGTH, JAPANESE_PERSONA, KANJI_COMPLEXITY];
static LATE_ELEMENTARY_RUBRIC: [RubricCheck; 4] =
    [MIN_LENGTH, MAX_LENGTH, JAPANESE_PERSONA, LATE_ELEMENTARY_STRUCTURE];
static ENGLISH_RUBRIC: [RubricCheck; 4] =
    [MIN_LENGTH, MAX_LENGTH, ENGLISH_PERSONA, ENGLISH_STRUCTURE];

/// The ordered rubric for `mode`.
pub fn rubric_for(mode: ReadingLevelMode) -> &'static [RubricCheck] {
    match mode {
        ReadingLevelMode::EarlyElementary => &EARLY_ELEMENTARY_RUBRIC,
        ReadingLevelMode::LateElementary => &LATE_ELEMENTARY_RUBRIC,
        ReadingLevelMode::English => &ENGLISH_RUBRIC,
    }
}

fn check_min_length(text: &str, mode: ReadingLevelMode) -> Option<String> {
    (utf16_len(text) < MIN_RESPONSE_LENGTH).then(|| {
        localized(mode, "レスポンスが短すぎます", "Response too short")
    })
}

fn check_max_length(text: &str, mode: ReadingLevelMode) -> Option<String> {
    (utf16_len(text) > MAX_RESPONSE_LENGTH).then(|| {
        localized(mode, "レスポンスが長すぎます", "Response too long")
    })
}

fn check_japanese_persona(text: &str, _mode: ReadingLevelMode) -> Option<String> {
    (!contains_any(text, JAPANESE_PERSONA_TERMS)).then(|| "あいちゃんペルソナが不十分".to_string())
}

fn check_english_persona(text: &str, _mode: ReadingLevelMode) -> Option<String> {
    (!contains_any(text, ENGLISH_PERSONA_TERMS))
        .then(|| "English Ai-chan persona insufficient".to_string())
}

fn check_kanji_complexity(text: &str, _mode: ReadingLevelMode) -> Option<String> {
    let found = complex_kanji(text);
    if found.is_empty() {
        return None;
    }
    let listed: Vec<String> = found
        .iter()
        .take(COMPLEX_KANJI_REPORT_LIMIT)
        .map(char::to_string)
        .collect();
    Some(format!("1-3年生に難しい漢字: {}", listed.join(", ")))
}

fn check_late_elementary_structure(text: &str, _mode: ReadingLevelMode) -> Option<String> {
    (!contains_any(text, LATE_ELEMENTARY_STRUCTURE_MARKERS))
        .then(|| "4-6年生用の構造化が不十分".to_string())
}

fn check_english_structure(text: &str, _mode: ReadingLevelMode) -> Option<String> {
    (!contains_any(text, ENGLISH_STRUCTURE_MARKERS))
        .then(|| "English mode structure insufficient".to_string())
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn localized(mode: ReadingLevelMode, japanese: &str, english: &str) -> String {
    if mode.is_english() {
        english.to_string()
    } else {
        japanese.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rubric_starts_with_length_checks() {
        for mode in ReadingLevelMode::ALL {
            let rubric = rubric_for(mode);
            assert_eq!(rubric[0].name, "min_length");
            assert_eq!(rubric[1].name, "max_length");
            assert_eq!(rubric[2].name, "persona");
        }
    }

    #[test]
    fn only_min_length_invalidates() {
        for mode in ReadingLevelMode::ALL {
            for check in rubric_for(mode) {
                assert_eq!(check.invalidates, check.name == "min_length");
            }
        }
    }

    #[test]
    fn complexity_only_for_early_elementary() {
        let has = |mode| rubric_for(mode).iter().any(|c| c.name == "kanji_complexity");
        assert!(has(ReadingLevelMode::EarlyElementary));
        assert!(!has(ReadingLevelMode::LateElementary));
        assert!(!has(ReadingLevelMode::English));
    }

    #[test]
    fn complexity_lists_first_three() {
        let issue = check_kanji_complexity("調査と確認と説明", ReadingLevelMode::EarlyElementary)
            .unwrap();
        assert_eq!(issue, "1-3年生に難しい漢字: 調, 査, 確");
    }

    #[test]
    fn length_issue_language_follows_mode() {
        assert_eq!(
            check_min_length("", ReadingLevelMode::English).unwrap(),
            "Response too short"
        );
        assert_eq!(
            check_min_length("", ReadingLevelMode::LateElementary).unwrap(),
            "レスポンスが短すぎます"
        );
    }

    #[test]
    fn english_structure_markers() {
        assert!(check_english_structure("A Mystery to solve", ReadingLevelMode::English).is_none());
        assert!(check_english_structure("wow!", ReadingLevelMode::English).is_none());
        assert!(check_english_structure("plain text.", ReadingLevelMode::English).is_some());
    }
}

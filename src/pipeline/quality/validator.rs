use super::rubric::rubric_for;
use super::types::{ReadingLevelMode, ValidationResult};

/// Score a persona-rewritten response against the rubric for `mode`.
///
/// Pure and deterministic: every failed check subtracts its penalty and
/// appends one issue, in rubric order.
pub fn score(text: &str, mode: ReadingLevelMode) -> ValidationResult {
    let mut result = ValidationResult::new();

    for check in rubric_for(mode) {
        if let Some(issue) = check.evaluate(text, mode) {
            result.confidence -= check.penalty;
            if check.invalidates {
                result.is_valid = false;
            }
            result.issues.push(issue);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::utf16_len;

    const GOOD_EARLY: &str = "こんにちは！あいちゃんだよ！きょうは 山に いった 先生の おはなしを するね。\
        みんなで 本を 読んで、たのしい 一日 だったよ。わたしも いっしょに いきたいな！";

    /// Pad `text` with `fill` until it reaches exactly `len` UTF-16 units.
    fn padded(text: &str, fill: char, len: usize) -> String {
        let mut out = text.to_string();
        while utf16_len(&out) < len {
            out.push(fill);
        }
        out
    }

    #[test]
    fn good_early_response_scores_full() {
        let v = score(GOOD_EARLY, ReadingLevelMode::EarlyElementary);
        assert!(v.is_valid);
        assert_eq!(v.confidence, 100);
        assert!(v.issues.is_empty(), "unexpected issues: {:?}", v.issues);
    }

    #[test]
    fn empty_response_is_invalid() {
        for mode in ReadingLevelMode::ALL {
            let v = score("", mode);
            assert!(!v.is_valid);
            assert!(v.confidence <= 70);
        }
        let v = score("", ReadingLevelMode::EarlyElementary);
        assert_eq!(v.issues[0], "レスポンスが短すぎます");
        // Short and missing the persona.
        assert_eq!(v.confidence, 30);
    }

    #[test]
    fn complex_kanji_lowers_early_confidence() {
        let text = padded("あいちゃんだよ。今日は調査をしたよ。", 'よ', 60);
        let v = score(&text, ReadingLevelMode::EarlyElementary);
        assert!(v.confidence <= 80);
        assert_eq!(v.confidence, 80);
        assert!(v.issues.iter().any(|i| i.starts_with("1-3年生に難しい漢字: 調, 査")));
        assert!(v.is_valid);
    }

    #[test]
    fn late_elementary_ignores_kanji_complexity() {
        let text = padded("あいちゃんです。今回の調査結果を説明します。", 'す', 60);
        let v = score(&text, ReadingLevelMode::LateElementary);
        assert_eq!(v.confidence, 100);
    }

    #[test]
    fn late_elementary_missing_structure_scores_85() {
        // 60 units, persona present, no heading, bold or full stop.
        let text = padded("わたしが しらべたよ", 'ね', 60);
        assert_eq!(utf16_len(&text), 60);
        let v = score(&text, ReadingLevelMode::LateElementary);
        assert_eq!(v.confidence, 85);
        assert_eq!(v.issues, vec!["4-6年生用の構造化が不十分".to_string()]);
        assert!(!v.needs_repair());
    }

    #[test]
    fn missing_persona_costs_forty() {
        let text = padded("これは ふつうの せつめい です。", 'よ', 60);
        let v = score(&text, ReadingLevelMode::LateElementary);
        assert_eq!(v.confidence, 60);
        assert_eq!(v.issues, vec!["あいちゃんペルソナが不十分".to_string()]);
        assert!(v.needs_repair());
    }

    #[test]
    fn english_persona_and_structure() {
        let good = "Hi! I'm Ai-chan, your detective friend. Let's look at this **Mystery** together!";
        assert_eq!(score(good, ReadingLevelMode::English).confidence, 100);

        let bad = "This text explains what the sign says about the park rules and opening hours.";
        let v = score(bad, ReadingLevelMode::English);
        assert_eq!(v.confidence, 45);
        assert_eq!(
            v.issues,
            vec![
                "English Ai-chan persona insufficient".to_string(),
                "English mode structure insufficient".to_string(),
            ]
        );
    }

    #[test]
    fn overlong_response_penalised_but_valid() {
        let text = padded("あいちゃんだよ。", 'あ', 5_001);
        let v = score(&text, ReadingLevelMode::EarlyElementary);
        assert!(v.is_valid);
        assert_eq!(v.confidence, 90);
        assert_eq!(v.issues, vec!["レスポンスが長すぎます".to_string()]);
    }

    #[test]
    fn penalties_accumulate() {
        // Short, no persona, hard kanji: 100 - 30 - 40 - 20.
        let v = score("難解", ReadingLevelMode::EarlyElementary);
        assert_eq!(v.confidence, 10);
        assert_eq!(v.issues.len(), 3);
    }

    #[test]
    fn scoring_is_deterministic() {
        let a = score(GOOD_EARLY, ReadingLevelMode::LateElementary);
        let b = score(GOOD_EARLY, ReadingLevelMode::LateElementary);
        assert_eq!(a, b);
    }
}

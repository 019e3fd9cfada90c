//! Canned responses for when the persona rewrite cannot run at all.

use super::types::ReadingLevelMode;
use crate::text::excerpt_utf16;

/// Quoted excerpt lengths, in UTF-16 code units.
const EARLY_EXCERPT_UNITS: usize = 50;
const LATE_EXCERPT_UNITS: usize = 100;

/// Canned persona reply quoting the start of `original_text`.
///
/// Only the two Japanese modes have their own template; English mode
/// gets the early-elementary one.
pub fn generate_fallback(original_text: &str, mode: ReadingLevelMode) -> String {
    match mode {
        ReadingLevelMode::LateElementary => late_elementary(original_text),
        ReadingLevelMode::EarlyElementary | ReadingLevelMode::English => {
            early_elementary(original_text)
        }
    }
}

fn early_elementary(original_text: &str) -> String {
    format!(
        "こんにちは！あいちゃんだよ！\n\n\
         むずかしいおはなしを見つけたね！でも、ちょっと よくわからなくて、もう一度 きいてもいいかな？\n\n\
         「{}...」\n\n\
         について、もっと かんたんに きいてくれると、あいちゃんも もっと よく わかるよ！\n\n\
         もっと知りたいことはある？",
        excerpt_utf16(original_text, EARLY_EXCERPT_UNITS)
    )
}

fn late_elementary(original_text: &str) -> String {
    format!(
        "こんにちは！あいちゃんです🔍\n\n\
         今回の内容を調査してみたんですが、少し複雑で、もう少し詳しい情報が必要みたいです。\n\n\
         **調査対象:**\n\
         {}...\n\n\
         **あいちゃんからのお願い:**\n\
         この内容について、もう少し具体的に教えてもらえると、もっと詳しく調査できるよ！\n\n\
         もっと詳しく知りたいことはある？",
        excerpt_utf16(original_text, LATE_EXCERPT_UNITS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::quality::validator::score;

    #[test]
    fn early_template_quotes_first_fifty_chars() {
        let original = "あ".repeat(80);
        let out = generate_fallback(&original, ReadingLevelMode::EarlyElementary);
        assert!(out.contains(&format!("「{}...」", "あ".repeat(50))));
        assert!(!out.contains(&"あ".repeat(51)));
    }

    #[test]
    fn late_template_quotes_first_hundred_chars() {
        let original = "い".repeat(150);
        let out = generate_fallback(&original, ReadingLevelMode::LateElementary);
        assert!(out.contains(&format!("{}...", "い".repeat(100))));
        assert!(out.contains("**調査対象:**"));
    }

    #[test]
    fn excerpt_is_measured_in_utf16_units() {
        // 30 emoji are 60 units; only 25 fit in the early excerpt.
        let original = "😀".repeat(30);
        let out = generate_fallback(&original, ReadingLevelMode::EarlyElementary);
        assert!(out.contains(&format!("「{}...」", "😀".repeat(25))));
        assert!(!out.contains(&"😀".repeat(26)));
    }

    #[test]
    fn english_uses_early_template() {
        let a = generate_fallback("テスト", ReadingLevelMode::English);
        let b = generate_fallback("テスト", ReadingLevelMode::EarlyElementary);
        assert_eq!(a, b);
    }

    #[test]
    fn short_original_quoted_whole() {
        let out = generate_fallback("短い", ReadingLevelMode::EarlyElementary);
        assert!(out.contains("「短い...」"));
    }

    #[test]
    fn fallbacks_carry_the_persona() {
        for mode in [ReadingLevelMode::EarlyElementary, ReadingLevelMode::LateElementary] {
            let out = generate_fallback("テキスト", mode);
            let v = score(&out, mode);
            assert!(v.is_valid);
            assert!(!v.issues.iter().any(|i| i.contains("ペルソナ")));
        }
    }
}

use std::sync::LazyLock;

use regex::Regex;

use super::types::InputRejection;

/// A run of this many identical characters is treated as spam.
pub const SPAM_RUN_LENGTH: usize = 11;

/// Text made only of characters that are neither ASCII word characters
/// nor Hiragana, Katakana or kanji.
static SYMBOL_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^A-Za-z0-9_\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FAF}]+$").unwrap()
});

/// Reject text with no meaningful characters or with repeated-character spam.
///
/// Runs on already-sanitized text, so escaped entities such as `&lt;`
/// count as word characters.
pub fn check_content_quality(text: &str) -> Result<(), InputRejection> {
    if SYMBOL_ONLY.is_match(text.trim()) {
        return Err(InputRejection::SymbolOnlyContent);
    }

    if longest_run(text) >= SPAM_RUN_LENGTH {
        return Err(InputRejection::SpamDetected);
    }

    Ok(())
}

/// Length of the longest run of one repeated character. Line terminators
/// never form a run.
fn longest_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            prev = None;
            current = 0;
            continue;
        }
        if prev == Some(c) {
            current += 1;
        } else {
            prev = Some(c);
            current = 1;
        }
        longest = longest.max(current);
    }
    longest
}

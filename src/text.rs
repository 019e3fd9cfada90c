//! Text measurement helpers shared by the safety gates and the quality rubric.
//!
//! Lengths are measured in UTF-16 code units so that limits line up with
//! what the browser client counts before submitting.

/// First code point of the CJK unified ideograph block treated as kanji.
pub const KANJI_START: u32 = 0x4E00;
/// Last code point (inclusive) treated as kanji.
pub const KANJI_END: u32 = 0x9FAF;

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Whether `c` lies in the CJK unified ideograph range U+4E00–U+9FAF.
pub fn is_kanji(c: char) -> bool {
    (KANJI_START..=KANJI_END).contains(&(c as u32))
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Longest prefix of `text` spanning at most `max_units` UTF-16 code units.
/// A surrogate pair that would straddle the limit is dropped whole.
pub fn excerpt_utf16(text: &str, max_units: usize) -> &str {
    let mut units = 0;
    for (idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max_units {
            return &text[..idx];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_len_counts_code_units() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("あいう"), 3);
        // Astral-plane characters take two code units.
        assert_eq!(utf16_len("😀"), 2);
    }

    #[test]
    fn kanji_range_boundaries() {
        assert!(is_kanji('\u{4E00}'));
        assert!(is_kanji('\u{9FAF}'));
        assert!(!is_kanji('\u{9FB0}'));
        assert!(is_kanji('調'));
        assert!(!is_kanji('あ'));
        assert!(!is_kanji('a'));
    }

    #[test]
    fn utf16_excerpt_counts_code_units() {
        assert_eq!(excerpt_utf16("こんにちは", 2), "こん");
        assert_eq!(excerpt_utf16("short", 100), "short");
        // Each emoji is two units; the third would cross the limit.
        assert_eq!(excerpt_utf16("😀😀😀", 5), "😀😀");
        assert_eq!(excerpt_utf16("a😀", 2), "a");
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("こんにちは", 2), "こん");
        assert_eq!(excerpt("short", 100), "short");
        assert_eq!(excerpt("", 5), "");
    }
}

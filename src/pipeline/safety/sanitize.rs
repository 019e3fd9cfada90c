use std::sync::LazyLock;

use regex::Regex;

use super::types::{
    InjectionCategory, InputRejection, SanitizedText, MAX_INPUT_LENGTH, MIN_INPUT_LENGTH,
};
use crate::text::{excerpt, utf16_len};

/// Characters of a rejected payload kept in the audit log.
const AUDIT_EXCERPT_CHARS: usize = 100;

/// A compiled injection pattern with the family it belongs to.
struct InjectionPattern {
    regex: Regex,
    category: InjectionCategory,
}

fn pattern(re: &str, category: InjectionCategory) -> InjectionPattern {
    InjectionPattern {
        regex: Regex::new(re).unwrap(),
        category,
    }
}

static INJECTION_PATTERNS: LazyLock<Vec<InjectionPattern>> = LazyLock::new(|| {
    use InjectionCategory::*;
    vec![
        pattern(r"(?i)ignore\s+(?:all\s+)?previous\s+instructions?", InstructionOverride),
        pattern(r"(?i)forget\s+(?:all\s+)?previous\s+(?:instructions?|context)", InstructionOverride),
        pattern(r"(?i)system\s*:", RoleLabel),
        pattern(r"(?i)assistant\s*:", RoleLabel),
        pattern(r"(?i)human\s*:", RoleLabel),
        pattern(r"(?i)###\s*(?:system|assistant|human)", DelimitedRoleLabel),
        pattern(r"(?i)---\s*(?:system|assistant|human)", DelimitedRoleLabel),
        pattern(r"(?i)\[(?:system|assistant|human)\]", DelimitedRoleLabel),
        pattern(r"(?i)<\|(?:system|assistant|human)\|>", DelimitedRoleLabel),
        pattern(r"(?i)jailbreak", Jailbreak),
        pattern(r"(?i)roleplay\s+as", RolePlay),
        pattern(r"(?i)pretend\s+(?:to\s+be|you\s+are)", RolePlay),
    ]
});

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Validate raw submitted text and neutralise its markup.
///
/// Checks run in a fixed order and the first failure wins: presence,
/// length ceiling, length floor, injection scan. Text that passes is
/// HTML-escaped and stripped of anything still shaped like a tag.
pub fn sanitize_input(raw: Option<&str>) -> Result<SanitizedText, InputRejection> {
    let text = match raw {
        Some(t) if !t.is_empty() => t,
        _ => return Err(InputRejection::InvalidInput),
    };

    let length = utf16_len(text);
    if length > MAX_INPUT_LENGTH {
        return Err(InputRejection::TextTooLong { length });
    }

    if utf16_len(text.trim()) < MIN_INPUT_LENGTH {
        return Err(InputRejection::TextTooShort);
    }

    if let Some(category) = detect_injection(text) {
        tracing::warn!(
            category = category.as_str(),
            excerpt = excerpt(text, AUDIT_EXCERPT_CHARS),
            "Prompt injection attempt rejected"
        );
        return Err(InputRejection::SuspiciousContent { category });
    }

    let escaped = escape_html(text);
    let stripped = TAG_PATTERN.replace_all(&escaped, "").into_owned();
    Ok(SanitizedText::new(stripped))
}

/// First injection family matching `text`, if any.
pub fn detect_injection(text: &str) -> Option<InjectionCategory> {
    INJECTION_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(text))
        .map(|p| p.category)
}

/// Encode `&`, `<`, `>`, `"` and `'` as HTML entities.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

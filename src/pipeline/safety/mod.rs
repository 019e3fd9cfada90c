//! Input safety gates: everything submitted text must pass before any
//! model call is made.

pub mod content;
pub mod sanitize;
pub mod types;

pub use types::{InjectionCategory, InputRejection, SanitizedText};

/// Run the full input gate: sanitization, then content quality on the
/// sanitized text.
pub fn screen_input(raw: Option<&str>) -> Result<SanitizedText, InputRejection> {
    let sanitized = sanitize::sanitize_input(raw)?;
    content::check_content_quality(sanitized.as_str())?;
    Ok(sanitized)
}

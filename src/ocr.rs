//! OCR collaborator contract.
//!
//! Recognition itself happens in the browser; the server only sees the
//! text and the engine's confidence.

use serde::{Deserialize, Serialize};

/// OCR confidence below this proceeds with a warning.
pub const LOW_CONFIDENCE_THRESHOLD: f32 = 20.0;

/// Text and confidence (0–100) reported by the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrReading {
    pub text: String,
    pub confidence: f32,
}

/// What to do with an OCR reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrAssessment {
    /// Nothing was recognised.
    Empty,
    /// Usable, but the engine was unsure.
    LowConfidence,
    Ok,
}

impl OcrReading {
    pub fn assess(&self) -> OcrAssessment {
        if self.text.trim().is_empty() {
            return OcrAssessment::Empty;
        }
        if self.confidence < LOW_CONFIDENCE_THRESHOLD {
            tracing::warn!(confidence = self.confidence, "Low OCR confidence; proceeding");
            return OcrAssessment::LowConfidence;
        }
        OcrAssessment::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(text: &str, confidence: f32) -> OcrReading {
        OcrReading {
            text: text.into(),
            confidence,
        }
    }

    #[test]
    fn low_confidence_still_usable() {
        let r = reading("きけん", 5.0);
        assert_eq!(r.assess(), OcrAssessment::LowConfidence);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(reading("文字", 20.0).assess(), OcrAssessment::Ok);
        assert_eq!(reading("文字", 19.9).assess(), OcrAssessment::LowConfidence);
    }

    #[test]
    fn blank_text_is_empty() {
        let r = reading("  \n ", 95.0);
        assert_eq!(r.assess(), OcrAssessment::Empty);
    }

    #[test]
    fn reading_deserializes() {
        let r: OcrReading = serde_json::from_str(r#"{"text":"あ","confidence":87.5}"#).unwrap();
        assert_eq!(r, reading("あ", 87.5));
    }
}

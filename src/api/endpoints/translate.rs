//! Translation endpoints.
//!
//! - `POST /api/extract-facts` — first model call only
//! - `POST /api/translate-persona` — second model call only, from supplied facts
//! - `POST /api/translate` — full pipeline, mode from the body (default `1-3`)
//! - `POST /api/translate-4-6` — full pipeline, upper elementary
//! - `POST /api/translate-english` — full pipeline, English
//!
//! Submitted text passes both safety gates before any model call. Clients
//! that read the text with OCR may send the engine's `ocrConfidence`; a low
//! value is logged and echoed back but never blocks the request.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::ocr::{OcrAssessment, OcrReading};
use crate::pipeline::quality::{ReadingLevelMode, ValidationResult};
use crate::pipeline::safety::{screen_input, InputRejection, SanitizedText};

/// Request body shared by all translation routes. Fields stay untyped so a
/// non-string value is reported as invalid input rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct TextRequest {
    pub text: Option<Value>,
    pub facts: Option<Value>,
    pub mode: Option<ReadingLevelMode>,
    #[serde(rename = "ocrConfidence")]
    pub ocr_confidence: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactsResponse {
    pub success: bool,
    pub facts: String,
    pub original_text: String,
}

#[derive(Debug, Serialize)]
pub struct PersonaResponse {
    pub success: bool,
    pub translation: String,
    pub facts: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub success: bool,
    pub original_text: String,
    pub extracted_facts: String,
    pub translation: String,
    pub processing_steps: u8,
    pub age_mode: ReadingLevelMode,
    pub quality: ValidationResult,
    pub repaired: bool,
    pub fallback_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrAssessment>,
}

fn decode(payload: Result<Json<TextRequest>, JsonRejection>) -> Result<TextRequest, ApiError> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(ApiError::PayloadTooLarge)
        }
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Request body rejected");
            Err(InputRejection::InvalidInput.into())
        }
    }
}

/// Run a body field through both safety gates. Anything but a string is
/// invalid input.
fn screen_field(value: Option<&Value>) -> Result<SanitizedText, ApiError> {
    Ok(screen_input(value.and_then(Value::as_str))?)
}

/// Assessment of the OCR reading behind `text`, when the client sent one.
fn assess_ocr(text: &SanitizedText, confidence: Option<f32>) -> Option<OcrAssessment> {
    confidence.map(|confidence| {
        OcrReading {
            text: text.as_str().to_string(),
            confidence,
        }
        .assess()
    })
}

/// `POST /api/extract-facts` — neutral fact list for `text`.
pub async fn extract_facts(
    State(ctx): State<ApiContext>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<FactsResponse>, ApiError> {
    let req = decode(payload)?;
    let text = screen_field(req.text.as_ref())?;
    let mode = req.mode.unwrap_or_default();

    let facts = ctx.pipeline().extract_facts(&text, mode).await?;

    Ok(Json(FactsResponse {
        success: true,
        facts,
        original_text: text.into_inner(),
    }))
}

/// `POST /api/translate-persona` — persona rewrite of caller-supplied facts.
pub async fn translate_persona(
    State(ctx): State<ApiContext>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<PersonaResponse>, ApiError> {
    let req = decode(payload)?;
    let facts = screen_field(req.facts.as_ref())?;
    let mode = req.mode.unwrap_or_default();

    let translation = ctx.pipeline().rewrite(facts.as_str(), mode).await?;

    Ok(Json(PersonaResponse {
        success: true,
        translation,
        facts: facts.into_inner(),
    }))
}

/// `POST /api/translate` — full pipeline; `mode` defaults to `1-3`.
pub async fn translate(
    State(ctx): State<ApiContext>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let req = decode(payload)?;
    let mode = req.mode.unwrap_or_default();
    run_translation(&ctx, req, mode).await
}

/// `POST /api/translate-4-6`
pub async fn translate_4_6(
    State(ctx): State<ApiContext>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    run_translation(&ctx, decode(payload)?, ReadingLevelMode::LateElementary).await
}

/// `POST /api/translate-english`
pub async fn translate_english(
    State(ctx): State<ApiContext>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    run_translation(&ctx, decode(payload)?, ReadingLevelMode::English).await
}

async fn run_translation(
    ctx: &ApiContext,
    req: TextRequest,
    mode: ReadingLevelMode,
) -> Result<Json<TranslateResponse>, ApiError> {
    let text = screen_field(req.text.as_ref())?;
    let ocr = assess_ocr(&text, req.ocr_confidence);
    let outcome = ctx.pipeline().run(&text, mode).await?;

    Ok(Json(TranslateResponse {
        success: true,
        original_text: outcome.original_text,
        extracted_facts: outcome.extracted_facts,
        translation: outcome.translation,
        processing_steps: 2,
        age_mode: outcome.mode,
        quality: outcome.quality,
        repaired: outcome.repaired,
        fallback_used: outcome.fallback_used,
        ocr,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_string_field_is_invalid_input() {
        let err = screen_field(Some(&json!(42))).unwrap_err();
        assert!(matches!(err, ApiError::Rejected(InputRejection::InvalidInput)));
    }

    #[test]
    fn missing_field_is_invalid_input() {
        let err = screen_field(None).unwrap_err();
        assert!(matches!(err, ApiError::Rejected(InputRejection::InvalidInput)));
    }

    #[test]
    fn string_field_is_screened() {
        let text = screen_field(Some(&json!("こんにちは"))).unwrap();
        assert_eq!(text.as_str(), "こんにちは");
    }

    #[test]
    fn mode_decodes_from_wire_name() {
        let req: TextRequest = serde_json::from_value(json!({"text": "abc", "mode": "4-6"})).unwrap();
        assert_eq!(req.mode, Some(ReadingLevelMode::LateElementary));
    }

    #[test]
    fn translate_response_uses_camel_case() {
        let response = TranslateResponse {
            success: true,
            original_text: "a".into(),
            extracted_facts: "b".into(),
            translation: "c".into(),
            processing_steps: 2,
            age_mode: ReadingLevelMode::English,
            quality: ValidationResult::default(),
            repaired: false,
            fallback_used: false,
            ocr: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["processingSteps"], 2);
        assert_eq!(json["ageMode"], "english");
        assert_eq!(json["quality"]["isValid"], true);
        assert_eq!(json["fallbackUsed"], false);
        assert!(json.get("ocr").is_none());
    }

    #[test]
    fn ocr_confidence_is_assessed_when_sent() {
        let text = screen_field(Some(&json!("きけん"))).unwrap();
        assert_eq!(assess_ocr(&text, None), None);
        assert_eq!(assess_ocr(&text, Some(12.0)), Some(OcrAssessment::LowConfidence));
        assert_eq!(assess_ocr(&text, Some(88.0)), Some(OcrAssessment::Ok));
    }

    #[test]
    fn ocr_confidence_decodes_from_camel_case() {
        let req: TextRequest =
            serde_json::from_value(json!({"text": "abc", "ocrConfidence": 15.5})).unwrap();
        assert_eq!(req.ocr_confidence, Some(15.5));
    }
}

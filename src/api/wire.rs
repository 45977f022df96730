//! JSON bodies exchanged with the generation service.

use serde::{Deserialize, Serialize};

use crate::podcast::Script;

/// `POST /translate` request body.
#[derive(Debug, Serialize)]
pub struct TranslateBody<'a> {
    pub script: &'a Script,
    pub target_language: &'a str,
}

/// `POST /text-to-speech` request body.
#[derive(Debug, Serialize)]
pub struct SpeechBody<'a> {
    pub script: &'a Script,
    pub language: &'a str,
}

/// `POST /generate-podcast` success body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub script: Script,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub original_script: Option<Script>,
}

/// `POST /translate` success body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslateResponse {
    pub translated_script: Script,
    #[serde(default)]
    pub language: Option<String>,
}

/// `POST /text-to-speech` success body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeechResponse {
    pub audio_file: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Extract a human-readable message from an error response body.
///
/// `{"detail": "..."}` bodies are unwrapped to the detail text; any other
/// non-empty body is returned as-is.  A blank detail yields `None`.
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed)
    {
        match map.get("detail").or_else(|| map.get("error")) {
            Some(serde_json::Value::String(detail)) => {
                let detail = detail.trim();
                return (!detail.is_empty()).then(|| detail.to_string());
            }
            Some(serde_json::Value::Null) | None => {}
            Some(other) => return Some(other.to_string()),
        }
    }

    Some(trimmed.to_string())
}

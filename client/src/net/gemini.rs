//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper for `POST {base}/models/{model}:generateContent`.
//! Request building and response parsing are pure for testability; only the
//! browser build performs the actual fetch.

#[cfg(test)]
#[path = "gemini_test.rs"]
mod gemini_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::config::ModelConfig;
use super::model::{ChatHandle, ChatModel, ModelError};
use crate::state::sessions::Role;

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: ModelConfig,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    #[cfg(feature = "csr")]
    async fn post(&self, api_key: &str, body: &ApiRequest<'_>) -> Result<String, ModelError> {
        let response = gloo_net::http::Request::post(&self.config.generate_url())
            .header("x-goog-api-key", api_key)
            .json(body)
            .map_err(|e| ModelError::ApiRequest(e.to_string()))?
            .send()
            .await
            .map_err(|e| ModelError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ModelError::ApiRequest(e.to_string()))?;

        if !response.ok() {
            return Err(ModelError::ApiResponse { status, body: error_message(&text) });
        }
        Ok(text)
    }

    #[cfg(not(feature = "csr"))]
    #[allow(clippy::unused_async)]
    async fn post(&self, _api_key: &str, _body: &ApiRequest<'_>) -> Result<String, ModelError> {
        Err(ModelError::Unavailable)
    }
}

#[async_trait(?Send)]
impl ChatModel for GeminiClient {
    async fn send_message(&self, handle: &mut ChatHandle, text: &str) -> Result<String, ModelError> {
        let api_key = self.config.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;
        let body = build_request(handle, text);
        let raw = self.post(api_key, &body).await?;
        let reply = parse_response(&raw)?;
        handle.record_exchange(text, &reply);
        Ok(reply)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: SystemInstruction<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: Role,
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[cfg(any(feature = "csr", test))]
#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[cfg(any(feature = "csr", test))]
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

// =============================================================================
// BUILDING / PARSING
// =============================================================================

/// History plus the new user turn.
fn build_request<'a>(handle: &'a ChatHandle, text: &'a str) -> ApiRequest<'a> {
    let mut contents: Vec<Content<'a>> = handle
        .history
        .iter()
        .map(|turn| Content { role: turn.role, parts: [TextPart { text: &turn.text }] })
        .collect();
    contents.push(Content { role: Role::User, parts: [TextPart { text }] });
    ApiRequest { contents, system_instruction: SystemInstruction { parts: [TextPart { text: &handle.system_instruction }] } }
}

/// Text of the first candidate, parts concatenated.
fn parse_response(json: &str) -> Result<String, ModelError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| ModelError::ApiParse(e.to_string()))?;
    let text: String = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ModelError::EmptyReply);
    }
    Ok(text)
}

#[cfg(any(feature = "csr", test))]
/// `STATUS: message` from a Google error envelope, else the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if envelope.error.status.is_empty() => envelope.error.message,
        Ok(envelope) => format!("{}: {}", envelope.error.status, envelope.error.message),
        Err(_) => body.to_owned(),
    }
}

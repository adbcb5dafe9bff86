//! Client for the generative backend (OpenAI-compatible chat completions).
//!
//! The contract with the rest of the app: every call either fails with a
//! typed transport/configuration error, or yields a well-shaped
//! `GenerationResult`, even when the model ignores its instructions and
//! returns prose instead of JSON.

use crate::models::generation::GenerationResult;
use crate::services::prompt_builder::Prompt;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation backend API key is not set")]
    MissingApiKey,
    #[error("Backend returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Backend returned no completion")]
    EmptyCompletion,
}

/// Whether the model honored the structured-output contract. Both branches
/// carry a complete `GenerationResult`; the tag exists so callers can log or
/// test the difference without re-parsing anything.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Parsed(GenerationResult),
    Fallback(GenerationResult),
}

impl ModelOutput {
    pub fn result(&self) -> &GenerationResult {
        match self {
            ModelOutput::Parsed(r) | ModelOutput::Fallback(r) => r,
        }
    }

    pub fn into_result(self) -> GenerationResult {
        match self {
            ModelOutput::Parsed(r) | ModelOutput::Fallback(r) => r,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ModelOutput::Fallback(_))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GenerationClient {
    /// A missing API key is not fatal here: the process stays up, and each
    /// generation request fails with a configuration error instead.
    pub fn from_env() -> Self {
        Self::with_config(
            env::var("OPENAI_API_KEY").ok(),
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        )
    }

    pub fn with_config(api_key: Option<String>, base_url: String, model: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            api_key,
            base_url,
            model,
        }
    }

    /// One call per request, no internal retries. Transport and status
    /// failures are errors; a malformed model reply is not, it degrades to
    /// the fallback wrapper.
    pub async fn generate(&self, prompt: &Prompt) -> Result<ModelOutput, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.instructions,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.payload,
                },
            ],
            response_format: ResponseFormat { kind: "json_object" },
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Generation backend returned {}: {}", status, body);
            return Err(GenerationError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(GenerationError::EmptyCompletion)?;

        Ok(parse_model_output(&content))
    }
}

/// Strict parse of the model's text into the output contract, with the
/// raw-text wrapper as the fallback. This function cannot fail: whatever the
/// model produced, the caller gets a complete result.
pub fn parse_model_output(raw: &str) -> ModelOutput {
    let candidate = strip_markdown_fence(raw.trim());

    match serde_json::from_str::<GenerationResult>(candidate) {
        Ok(result) => ModelOutput::Parsed(result),
        Err(_) => ModelOutput::Fallback(GenerationResult::fallback_from_raw(raw)),
    }
}

// Models occasionally wrap the JSON object in a ```json fence despite being
// told not to; strip one balanced fence before the strict parse.
fn strip_markdown_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    match rest.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_JSON: &str = r#"{
        "coverLetter": "Dear team, I build billing pipelines.",
        "subjectLine": "Application: Backend Engineer",
        "keywordsUsed": ["Go", "distributed systems"],
        "notesForUser": {"personalizationHook": "Mention the billing pipeline", "optionalPS": ""},
        "meta": {"language": "en", "targetRole": "Backend Engineer", "approxWordCount": 7}
    }"#;

    #[test]
    fn valid_json_parses_strictly() {
        let output = parse_model_output(VALID_JSON);
        assert!(!output.is_fallback());
        let result = output.result();
        assert_eq!(result.subject_line, "Application: Backend Engineer");
        assert_eq!(result.keywords_used, vec!["Go", "distributed systems"]);
        assert_eq!(result.meta.approx_word_count, 7);
    }

    #[test]
    fn fenced_json_still_parses() {
        let fenced = format!("```json\n{}\n```", VALID_JSON);
        let output = parse_model_output(&fenced);
        assert!(!output.is_fallback());
    }

    #[test]
    fn prose_degrades_to_the_fallback_wrapper() {
        let raw = "Dear hiring manager, I would love to join your team.";
        let output = parse_model_output(raw);

        assert!(output.is_fallback());
        let result = output.into_result();
        assert_eq!(result.cover_letter, raw);
        assert!(result.keywords_used.is_empty());
        assert!(result.subject_line.is_empty());
        assert!(result.notes_for_user.personalization_hook.is_empty());
        assert_eq!(result.meta.language, "unknown");
        assert_eq!(
            result.meta.approx_word_count,
            raw.split_whitespace().count() as u32
        );
    }

    #[test]
    fn json_missing_required_fields_falls_back() {
        let partial = r#"{"coverLetter": "Just the letter"}"#;
        let output = parse_model_output(partial);
        assert!(output.is_fallback());
        // The fallback keeps the raw text, not the partial field
        assert_eq!(output.result().cover_letter, partial);
    }

    #[test]
    fn unterminated_fence_is_left_alone() {
        assert_eq!(strip_markdown_fence("```json\n{\"a\": 1}"), "```json\n{\"a\": 1}");
    }

    #[tokio::test]
    async fn missing_api_key_fails_the_request_not_the_process() {
        let client = GenerationClient::with_config(
            None,
            "http://127.0.0.1:9".to_string(),
            "test-model".to_string(),
        );
        let prompt = Prompt {
            instructions: "irrelevant".to_string(),
            payload: "{}".to_string(),
        };
        let result = client.generate(&prompt).await;
        assert!(matches!(result, Err(GenerationError::MissingApiKey)));
    }
}

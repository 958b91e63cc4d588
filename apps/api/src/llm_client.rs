//! Gemini client — the single point of entry for all `generateContent` calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Gemini API directly.
//! All provider interactions MUST go through this module.
//!
//! The API key travels in the `x-goog-api-key` request header only — never in
//! the URL, where it would leak into access and proxy logs.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response contained no candidate text")]
    MissingText,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts `candidates[0].content.parts[0].text`, the only field this
    /// service reads. `None` when any step of the path is absent; an empty
    /// string at the path is a present value, not an absence.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single Gemini client used by the service.
/// One attempt per call — failed requests are never retried here; the caller
/// turns each failure into exactly one user-facing notice.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url,
            timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Makes a single `generateContent` call and returns the first candidate's
    /// text. The text may be empty — deciding what an empty reply means is the
    /// caller's job.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiRequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Provider errors carry {"error": {"message": ...}}; anything else
            // becomes a message-less API error.
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|e| e.error.message)
                .ok();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Read the body as text first so a malformed success body surfaces as
        // a Parse error, distinct from transport failures.
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_send_error(e))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        let text = parsed.first_text().ok_or(LlmError::MissingText)?;

        debug!(chars = text.len(), "Gemini call succeeded");

        Ok(text.to_string())
    }

    fn classify_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            LlmError::Http(e)
        }
    }
}

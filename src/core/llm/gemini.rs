//! Gemini Client (API key-based)
//!
//! Single-shot `generateContent` calls against Google's Generative
//! Language API. No retries, no streaming — the UI holds exactly one
//! request in flight and waits for the full completion.

use std::time::Duration;

use reqwest::Client;

use super::error::{GenerationError, Result};

/// Model used when the config does not override it.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Substring Google returns in the body when the key is bad. Matched
/// case-insensitively.
const INVALID_KEY_MARKER: &str = "api key not valid";

/// Gemini API client bound to one key and one model.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        // Trim at construction so header and validation agree
        Ok(Self {
            api_key: api_key.into().trim().to_string(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Point the client at a different endpoint (tests use a local mock
    /// server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the normalized completion text.
    ///
    /// Fails with [`GenerationError::MissingCredential`] before any I/O
    /// when the key is empty, and [`GenerationError::CredentialRejected`]
    /// when the service rejects it.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(GenerationError::MissingCredential);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        log::debug!("Requesting generation from {} ({} byte prompt)", self.model, prompt.len());

        let resp = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), text));
        }

        let json: serde_json::Value = resp.json().await?;

        let content = json["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .and_then(|parts| parts.first())
            .and_then(|p| p["text"].as_str())
            .ok_or_else(|| GenerationError::InvalidResponse("Missing candidate text".to_string()))?;

        Ok(strip_code_fences(content))
    }
}

/// Decide whether an API failure means the key was rejected.
fn classify_failure(status: u16, message: String) -> GenerationError {
    if message.to_lowercase().contains(INVALID_KEY_MARKER) || status == 401 || status == 403 {
        GenerationError::CredentialRejected(message)
    } else {
        GenerationError::Api { status, message }
    }
}

/// Trim the completion and remove a surrounding fenced code block.
///
/// Models frequently wrap script output in ```` ```lang ... ``` ````
/// despite instructions; display only the interior. Text without a
/// leading fence is returned trimmed and otherwise untouched.
pub(crate) fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    // Drop the opening fence line (fence plus optional language tag)
    let interior = match trimmed.find('\n') {
        Some(pos) => &trimmed[pos + 1..],
        None => return String::new(), // a bare fence and nothing else
    };

    // Drop the closing fence if present
    let interior = match interior.rfind("```") {
        Some(pos) => &interior[..pos],
        None => interior,
    };

    interior.trim().to_string()
}

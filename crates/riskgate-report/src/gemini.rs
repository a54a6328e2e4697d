//! Gemini summarizer

use crate::error::ReportError;
use crate::prompt;
use crate::service::Summarizer;
use async_trait::async_trait;
use riskgate_events::Session;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub struct GeminiSummarizer {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiSummarizer {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(&self, prompt: String) -> Result<String, ReportError> {
        if self.config.api_key.is_empty() {
            return Err(ReportError::MissingApiKey);
        }

        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ReportError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::Upstream { status: status.as_u16(), body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ReportError::InvalidResponse(e.to_string()))?;

        tracing::debug!("Gemini {} responded", self.config.model);
        Ok(candidate_text(&body))
    }
}

/// Concatenated text parts of the first candidate; empty when absent
pub(crate) fn candidate_text(body: &Value) -> String {
    body.pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn summarize(&self, sessions: &[Session]) -> Result<String, ReportError> {
        self.generate(prompt::briefing_prompt(sessions)).await
    }

    async fn analyze_session(&self, session: &Session) -> Result<String, ReportError> {
        self.generate(prompt::session_prompt(session)).await
    }
}

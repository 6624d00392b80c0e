//! Google Gemini provider.
//!
//! Key resolution order: explicit config value, then `GEMINI_API_KEY`, then
//! `GOOGLE_API_KEY`. The base URL is overridable so tests can point the
//! provider at a local mock server.

use crate::config::Config;
use crate::error::LlmError;
use crate::providers::http_client::build_collaborator_client;
use crate::providers::traits::Provider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    api_key: Option<String>,
    model: String,
    temperature: f64,
    base_url: String,
    client: Client,
}

// ─── Wire types ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ─── Provider ───────────────────────────────────────────────────────────────

impl GeminiProvider {
    pub fn new(config: &Config) -> Self {
        let resolved_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            model: config.model.clone(),
            temperature: config.temperature,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: build_collaborator_client(config.api_timeout_secs),
        }
    }

    /// Redirect API calls, used by tests against a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(
        &self,
        system_prompt: Option<&str>,
        message: &str,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: message.to_string(),
                }],
            }],
            system_instruction: system_prompt.map(|sys| Content {
                role: None,
                parts: vec![Part {
                    text: sys.to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: 8192,
            },
        }
    }

    fn model_name(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }

    fn extract_text(result: &GenerateContentResponse) -> Result<String, LlmError> {
        let text = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_ref())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyReply {
                provider: "gemini".into(),
            });
        }

        Ok(text)
    }

    async fn call_api(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| LlmError::Auth {
            provider: "gemini".into(),
        })?;

        let url = format!(
            "{}/{}:generateContent?key={api_key}",
            self.base_url,
            self.model_name()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Request {
                provider: "gemini".into(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Request {
                provider: "gemini".into(),
                message: format!("HTTP {status}: {error_text}"),
            });
        }

        let result: GenerateContentResponse =
            response.json().await.map_err(|e| LlmError::Request {
                provider: "gemini".into(),
                message: e.to_string(),
            })?;

        if let Some(err) = result.error.as_ref() {
            return Err(LlmError::Request {
                provider: "gemini".into(),
                message: err.message.clone(),
            });
        }

        Ok(result)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(
        &self,
        system_prompt: Option<&str>,
        message: &str,
    ) -> anyhow::Result<String> {
        let request = self.build_request(system_prompt, message);
        let result = self.call_api(&request).await?;
        Ok(Self::extract_text(&result)?)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::entities::app_errors::CoreError,
    vision::ports::{ImagePayload, LlmClient},
};

#[derive(Debug, Clone)]
pub struct GeminiLlmClient {
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: String,
}

impl GeminiLlmClient {
    /// The timeout covers the whole call; a timed-out request surfaces as an
    /// invocation error and feeds the model fallback strategy.
    pub fn new(api_key: String, request_timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| CoreError::ExternalServiceError(format!("HTTP client error: {e}")))?;
        Ok(Self { api_key, client })
    }

    async fn call_gemini_api(
        &self,
        model: &str,
        request: GeminiRequest,
    ) -> Result<String, CoreError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl LlmClient for GeminiLlmClient {
    async fn generate_with_image(
        &self,
        model: String,
        prompt: String,
        image: ImagePayload,
    ) -> Result<String, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image.data);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: base64_image,
                        },
                    },
                ],
            }],
        };

        self.call_gemini_api(&model, request).await
    }

    async fn generate_with_text(&self, model: String, prompt: String) -> Result<String, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text { text: prompt }],
            }],
        };

        self.call_gemini_api(&model, request).await
    }
}

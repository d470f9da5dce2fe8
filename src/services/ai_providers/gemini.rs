use std::sync::Arc;
use reqwest::Client;
use crate::config::constants::{DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MODEL, GEMINI_API_BASE};
use crate::enums::gemini_error::GeminiError;
use crate::services::rate_limiter::ApiRateLimiter;
use crate::structs::ai::gemini::gemini_content::GeminiContent;
use crate::structs::ai::gemini::gemini_generation_config::GeminiGenerationConfig;
use crate::structs::ai::gemini::gemini_part::GeminiPart;
use crate::structs::ai::gemini::gemini_request::GeminiRequest;

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    max_input_tokens: u64,
    rate_limiter: Arc<ApiRateLimiter>,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
            client: Client::new(),
            model: DEFAULT_MODEL.to_string(),
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
            rate_limiter: Arc::new(ApiRateLimiter::new()),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_token_budget(mut self, max_input_tokens: u64) -> Self {
        self.max_input_tokens = max_input_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(1.0),
                top_p: Some(0.95),
                top_k: Some(40),
                max_output_tokens: Some(8192),
                candidate_count: Some(1),
            }),
        }
    }

    async fn post_request(
        &self,
        url: &str,
        request_body: &GeminiRequest,
    ) -> Result<reqwest::Response, GeminiError> {
        self.client
            .post(url)
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await
            .map_err(|e| GeminiError::NetworkError(e.to_string()))
    }

    async fn fail_from_status(response: reqwest::Response) -> GeminiError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status.as_u16() {
            400 => GeminiError::ApiError(format!("Bad request: {}", error_text)),
            401 => GeminiError::AuthenticationError(error_text),
            403 => GeminiError::ApiError(format!("Forbidden: {}", error_text)),
            429 => GeminiError::ApiError(format!("Rate limit exceeded: {}", error_text)),
            _ => GeminiError::ApiError(format!("HTTP {}: {}", status, error_text)),
        }
    }

    /// Count prompt tokens via the countTokens endpoint.
    pub async fn count_tokens(&self, prompt: &str) -> Result<u64, GeminiError> {
        self.rate_limiter.acquire().await;

        let url = format!(
            "{}/models/{}:countTokens?key={}",
            self.base_url, self.model, self.api_key
        );
        let request_body = self.request_body(prompt);

        let response = self.post_request(&url, &request_body).await?;
        if !response.status().is_success() {
            return Err(Self::fail_from_status(response).await);
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GeminiError::SerializationError(e.to_string()))?;

        Ok(json
            .get("totalTokens")
            .and_then(|t| t.as_u64())
            .unwrap_or(0))
    }

    /// Send a prompt with pre-flight token counting: errors above the
    /// input budget, warns when the prompt approaches it.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let token_count = self.count_tokens(prompt).await?;
        log::info!("📏 Prompt size: {} tokens", token_count);

        if token_count > self.max_input_tokens {
            return Err(GeminiError::PromptTooLarge {
                tokens: token_count,
                budget: self.max_input_tokens,
            });
        }

        if token_count * 10 > self.max_input_tokens * 9 {
            log::warn!(
                "⚠️ Prompt is {} tokens, approaching the {} token limit",
                token_count,
                self.max_input_tokens
            );
        }

        self.rate_limiter.acquire().await;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request_body = self.request_body(prompt);

        let response = self.post_request(&url, &request_body).await?;
        if !response.status().is_success() {
            return Err(Self::fail_from_status(response).await);
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GeminiError::SerializationError(e.to_string()))?;

        // Extract the first candidate's text
        let content = json
            .get("candidates")
            .and_then(|candidates| candidates.as_array())
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
            .and_then(|parts| parts.first())
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| GeminiError::SerializationError("No content in response".to_string()))?;

        Ok(content.to_string())
    }
}

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GeminiError {
    #[error("Gemini API Error: {0}")]
    ApiError(String),
    #[error("Network Error: {0}")]
    NetworkError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    #[error("Authentication Error: {0}")]
    AuthenticationError(String),
    #[error("Prompt too large: {tokens} tokens exceeds the {budget} token budget. Reduce input size.")]
    PromptTooLarge { tokens: u64, budget: u64 },
}

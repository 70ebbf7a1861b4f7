use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("LLM API error: {0}")]
    ExternalServiceError(String),

    /// Both the primary and the fallback model invocation failed. Carries
    /// both underlying messages so the caller sees the full picture.
    #[error("primary model failed: {primary} | fallback model failed: {fallback}")]
    AllModelsFailed { primary: String, fallback: String },

    #[error("internal server error")]
    InternalServerError,
}

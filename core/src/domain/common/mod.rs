use std::path::PathBuf;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct ForkcastConfig {
    pub llm: LlmConfig,
    pub annotator: AnnotatorConfig,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub gemini_api_key: String,
    /// Quality-first model, tried before the fallback.
    pub primary_model: String,
    /// Faster/lighter model used for the single retry.
    pub fallback_model: String,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AnnotatorConfig {
    /// TTF used for box labels. When absent (or unreadable) the annotator
    /// falls back to a built-in fixed-size bitmap font.
    pub font_path: Option<PathBuf>,
}

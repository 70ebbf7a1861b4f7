use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    vision::entities::{AnalyzeImageInput, ImageAnalysis},
};

/// Image bytes plus the MIME type forwarded to the upstream model.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Client for the upstream "generate content" capability. The model name is
/// per call so the invocation strategy can pick primary vs fallback.
#[cfg_attr(test, mockall::automock)]
pub trait LlmClient: Send + Sync {
    fn generate_with_image(
        &self,
        model: String,
        prompt: String,
        image: ImagePayload,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        model: String,
        prompt: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for the detection/annotation pipeline.
#[cfg_attr(test, mockall::automock)]
pub trait VisionService: Send + Sync {
    fn analyze_image(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = Result<ImageAnalysis, CoreError>> + Send;
}

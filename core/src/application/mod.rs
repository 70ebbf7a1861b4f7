use std::time::Duration;

use crate::{
    domain::{
        common::{services::Service, ForkcastConfig},
        vision::annotator::Annotator,
    },
    infrastructure::llm::GeminiLlmClient,
};

pub type ForkcastService = Service<GeminiLlmClient>;

/// Wires the production service: Gemini client plus the annotator, configured
/// from the process environment.
pub fn create_service(config: ForkcastConfig) -> Result<ForkcastService, anyhow::Error> {
    let llm_client = GeminiLlmClient::new(
        config.llm.gemini_api_key.clone(),
        Duration::from_secs(config.llm.request_timeout_secs),
    )?;
    let annotator = Annotator::new(&config.annotator);

    Ok(Service::new(llm_client, config.llm, annotator))
}

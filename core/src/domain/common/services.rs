use crate::domain::{
    common::LlmConfig,
    vision::{annotator::Annotator, ports::LlmClient},
};

/// Aggregate service carrying the upstream client and request-independent
/// collaborators. Domain service traits are implemented on this type in the
/// per-domain `services.rs` files.
#[derive(Clone)]
pub struct Service<L>
where
    L: LlmClient,
{
    pub(crate) llm_client: L,
    pub(crate) llm_config: LlmConfig,
    pub(crate) annotator: Annotator,
}

impl<L> Service<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: L, llm_config: LlmConfig, annotator: Annotator) -> Self {
        Self {
            llm_client,
            llm_config,
            annotator,
        }
    }
}

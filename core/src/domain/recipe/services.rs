use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    recipe::{
        entities::{GenerateRecipesInput, RecipeOutcome},
        parser, prompt,
        ports::RecipeService,
    },
    vision::ports::LlmClient,
};

impl<L> RecipeService for Service<L>
where
    L: LlmClient,
{
    async fn generate_recipes(
        &self,
        input: GenerateRecipesInput,
    ) -> Result<RecipeOutcome, CoreError> {
        let prompt = prompt::recipe_prompt(&input.ingredients, &input.preferences, input.mode);

        let primary = &self.llm_config.primary_model;
        let fallback = &self.llm_config.fallback_model;

        // Same quality-first strategy as the vision path, but only a raised
        // error triggers the retry: a reply we cannot decode is a successful
        // invocation and comes back to the caller as the envelope.
        let reply = match self
            .llm_client
            .generate_with_text(primary.clone(), prompt.clone())
            .await
        {
            Ok(reply) => reply,
            Err(primary_err) => {
                tracing::warn!("model {primary} failed: {primary_err}, retrying with {fallback}");
                self.llm_client
                    .generate_with_text(fallback.clone(), prompt)
                    .await
                    .map_err(|fallback_err| CoreError::AllModelsFailed {
                        primary: primary_err.to_string(),
                        fallback: fallback_err.to_string(),
                    })?
            }
        };

        Ok(parser::parse_recipe_reply(&reply, input.mode))
    }
}

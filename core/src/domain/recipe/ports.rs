use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::entities::{GenerateRecipesInput, RecipeOutcome},
};

/// Service trait for recipe synthesis.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    fn generate_recipes(
        &self,
        input: GenerateRecipesInput,
    ) -> impl Future<Output = Result<RecipeOutcome, CoreError>> + Send;
}

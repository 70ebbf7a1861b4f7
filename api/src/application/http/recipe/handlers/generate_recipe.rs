use axum::extract::State;

use crate::application::http::{
    recipe::validators::GenerateRecipeRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};
use forkcast_core::domain::recipe::{
    entities::{GenerateRecipesInput, RecipeMode, RecipeOutcome},
    ports::RecipeService,
};

#[utoipa::path(
    post,
    path = "/generate-recipe",
    tag = "recipe",
    summary = "Generate a single recipe",
    description = "Synthesizes one recipe from the ingredient list and dietary preferences",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "A recipe, or a parse-failure envelope carrying the raw model reply")
    ),
)]
pub async fn generate_recipe(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateRecipeRequest>,
) -> Result<Response<RecipeOutcome>, ApiError> {
    let outcome = state
        .service
        .generate_recipes(GenerateRecipesInput {
            ingredients: payload.ingredients,
            preferences: payload.preferences.unwrap_or_default(),
            mode: RecipeMode::Single,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(outcome))
}

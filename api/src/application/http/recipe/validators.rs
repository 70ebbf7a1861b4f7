use forkcast_core::domain::recipe::entities::RecipePreferences;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct GenerateRecipeRequest {
    /// May be empty; the upstream model decides what to do with no
    /// ingredients.
    #[validate(length(max = 100, message = "at most 100 ingredients"))]
    pub ingredients: Vec<String>,
    pub preferences: Option<RecipePreferences>,
}

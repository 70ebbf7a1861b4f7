use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSet {
    pub recipes: Vec<Recipe>,
}

/// User dietary preferences. Every field is optional; absence means "no
/// constraint". Wire names are camelCase to match the frontend payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipePreferences {
    pub allergies: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub meal_type: Option<String>,
    pub cuisine_types: Vec<String>,
    pub prep_time: Option<String>,
    pub cooking_methods: Vec<String>,
    pub preferred_ingredients: Vec<String>,
    pub avoid_ingredients: Vec<String>,
}

/// How many recipes the prompt demands and the reply is decoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeMode {
    Single,
    /// Exactly three recipes, wrapped in `{"recipes": [...]}`.
    Trio,
}

/// Result of a synthesis call. `Unparsed` is the parse-failure envelope: the
/// model answered, but not with the demanded JSON; the raw text is kept
/// verbatim for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RecipeOutcome {
    Single(Recipe),
    Set(RecipeSet),
    Unparsed { error: String, raw_response: String },
}

#[derive(Debug, Clone)]
pub struct GenerateRecipesInput {
    pub ingredients: Vec<String>,
    pub preferences: RecipePreferences,
    pub mode: RecipeMode,
}

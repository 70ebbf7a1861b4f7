use crate::domain::recipe::entities::{RecipeMode, RecipePreferences};

const SINGLE_SCHEMA: &str = r#"Respond with a single JSON object with exactly these fields: "title" (string), "ingredients" (array of strings), "instructions" (array of strings), "prep_time" (string), "cook_time" (string), "servings" (integer). Return only the JSON object with no surrounding prose."#;

const TRIO_SCHEMA: &str = r#"Respond with a JSON object of the form {"recipes": [...]} containing exactly 3 recipes. Each recipe must have exactly these fields: "title" (string), "ingredients" (array of strings), "instructions" (array of strings), "prep_time" (string), "cook_time" (string), "servings" (integer). Return only the JSON object with no surrounding prose."#;

/// Builds the deterministic synthesis instruction: task template naming the
/// ingredients, one clause per populated preference field, then the exact
/// output schema for the requested mode.
pub fn recipe_prompt(
    ingredients: &[String],
    preferences: &RecipePreferences,
    mode: RecipeMode,
) -> String {
    let mut sections = vec![match mode {
        RecipeMode::Single => format!(
            "Create a recipe using these ingredients: {}.",
            ingredients.join(", ")
        ),
        RecipeMode::Trio => format!(
            "Create 3 different recipes using these ingredients: {}.",
            ingredients.join(", ")
        ),
    }];

    push_list_clause(
        &mut sections,
        &preferences.allergies,
        "Strictly exclude anything containing these allergens",
    );
    push_list_clause(
        &mut sections,
        &preferences.dietary_restrictions,
        "The recipe must comply with these dietary restrictions",
    );
    if let Some(meal_type) = populated(&preferences.meal_type) {
        sections.push(format!("This should be a {meal_type} recipe."));
    }
    push_list_clause(
        &mut sections,
        &preferences.cuisine_types,
        "Prefer these cuisine styles",
    );
    if let Some(prep_time) = populated(&preferences.prep_time) {
        sections.push(format!("Preparation time should be around {prep_time}."));
    }
    push_list_clause(
        &mut sections,
        &preferences.cooking_methods,
        "Use these cooking methods where possible",
    );
    push_list_clause(
        &mut sections,
        &preferences.preferred_ingredients,
        "Try to also incorporate these ingredients",
    );
    push_list_clause(
        &mut sections,
        &preferences.avoid_ingredients,
        "Avoid using these ingredients",
    );

    sections.push(
        match mode {
            RecipeMode::Single => SINGLE_SCHEMA,
            RecipeMode::Trio => TRIO_SCHEMA,
        }
        .to_string(),
    );

    sections.join(" ")
}

fn push_list_clause(sections: &mut Vec<String>, values: &[String], clause: &str) {
    if !values.is_empty() {
        sections.push(format!("{clause}: {}.", values.join(", ")));
    }
}

fn populated(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_ingredients_and_allergens() {
        let preferences = RecipePreferences {
            allergies: vec!["peanuts".into()],
            ..Default::default()
        };
        let prompt = recipe_prompt(
            &["chicken".into(), "rice".into()],
            &preferences,
            RecipeMode::Single,
        );
        assert!(prompt.contains("chicken, rice"));
        assert!(prompt.contains("Strictly exclude anything containing these allergens: peanuts."));
        assert!(prompt.contains("no surrounding prose"));
    }

    #[test]
    fn empty_preferences_add_no_clauses() {
        let prompt = recipe_prompt(
            &["tofu".into()],
            &RecipePreferences::default(),
            RecipeMode::Single,
        );
        assert!(!prompt.contains("allergens"));
        assert!(!prompt.contains("dietary restrictions"));
        assert!(!prompt.contains("cuisine"));
    }

    #[test]
    fn trio_mode_demands_three_recipes() {
        let prompt = recipe_prompt(&["egg".into()], &RecipePreferences::default(), RecipeMode::Trio);
        assert!(prompt.contains("3 different recipes"));
        assert!(prompt.contains(r#"{"recipes": [...]}"#));
    }

    #[test]
    fn every_populated_preference_contributes_a_clause() {
        let preferences = RecipePreferences {
            allergies: vec!["shellfish".into()],
            dietary_restrictions: vec!["vegetarian".into()],
            meal_type: Some("dinner".into()),
            cuisine_types: vec!["thai".into()],
            prep_time: Some("30 minutes".into()),
            cooking_methods: vec!["stir-fry".into()],
            preferred_ingredients: vec!["basil".into()],
            avoid_ingredients: vec!["cilantro".into()],
        };
        let prompt = recipe_prompt(&["noodles".into()], &preferences, RecipeMode::Single);
        for needle in [
            "shellfish",
            "vegetarian",
            "dinner recipe",
            "thai",
            "30 minutes",
            "stir-fry",
            "basil",
            "cilantro",
        ] {
            assert!(prompt.contains(needle), "missing clause for {needle}");
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let preferences = RecipePreferences {
            cuisine_types: vec!["italian".into(), "greek".into()],
            ..Default::default()
        };
        let a = recipe_prompt(&["pasta".into()], &preferences, RecipeMode::Trio);
        let b = recipe_prompt(&["pasta".into()], &preferences, RecipeMode::Trio);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_ingredient_list_is_passed_through() {
        let prompt = recipe_prompt(&[], &RecipePreferences::default(), RecipeMode::Single);
        assert!(prompt.starts_with("Create a recipe using these ingredients: ."));
    }
}

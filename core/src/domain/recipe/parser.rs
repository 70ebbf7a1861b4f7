use crate::domain::recipe::entities::{Recipe, RecipeMode, RecipeOutcome, RecipeSet};

/// Locates the outermost brace-delimited span: first `{` to last `}`.
fn json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Decodes a model reply into the requested recipe shape. A reply that
/// cannot be interpreted yields the parse-failure envelope with the original
/// text verbatim; this function never errors.
pub fn parse_recipe_reply(raw: &str, mode: RecipeMode) -> RecipeOutcome {
    let Some(span) = json_span(raw) else {
        tracing::warn!("recipe reply contains no JSON object");
        return unparsed(raw, "no JSON object found in model response");
    };

    match mode {
        RecipeMode::Single => match serde_json::from_str::<Recipe>(span) {
            Ok(recipe) => RecipeOutcome::Single(recipe),
            Err(err) => {
                tracing::warn!("failed to decode recipe: {err}");
                unparsed(raw, &format!("failed to parse recipe JSON: {err}"))
            }
        },
        RecipeMode::Trio => match serde_json::from_str::<RecipeSet>(span) {
            Ok(set) => RecipeOutcome::Set(set),
            Err(err) => {
                tracing::warn!("failed to decode recipe set: {err}");
                unparsed(raw, &format!("failed to parse recipes JSON: {err}"))
            }
        },
    }
}

fn unparsed(raw: &str, error: &str) -> RecipeOutcome {
    RecipeOutcome::Unparsed {
        error: error.to_string(),
        raw_response: raw.to_string(),
    }
}

/// Base instruction for the detection call. Demands the flat name-to-box JSON
/// shape the parser handles first; the looser shapes exist because models do
/// not always comply.
const DETECTION_PROMPT: &str = "\
You have to identify different types of food in the image. \
Detect every distinct food item visible and report its location. \
Return a JSON object mapping each food item name to its bounding box as \
[ymin, xmin, ymax, xmax], with coordinates normalized between 0 and 1. \
Example: {\"apple\": [0.1, 0.2, 0.4, 0.5], \"rice\": [0.5, 0.1, 0.9, 0.6]}. \
Return only the JSON object with no surrounding prose.";

/// Builds the detection prompt, appending any caller-supplied instructions.
pub fn detection_prompt(custom_prompt: Option<&str>) -> String {
    match custom_prompt {
        Some(extra) if !extra.trim().is_empty() => {
            format!("{DETECTION_PROMPT}\n\nAdditional instructions: {extra}")
        }
        _ => DETECTION_PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_prompt_is_appended() {
        let prompt = detection_prompt(Some("focus on desserts"));
        assert!(prompt.starts_with("You have to identify"));
        assert!(prompt.ends_with("Additional instructions: focus on desserts"));
    }

    #[test]
    fn blank_custom_prompt_leaves_the_base_prompt_alone() {
        assert_eq!(detection_prompt(None), detection_prompt(Some("   ")));
    }
}

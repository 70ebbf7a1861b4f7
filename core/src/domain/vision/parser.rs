use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::vision::entities::{BoundingBox, DetectedItem, ParsedDetections};

/// Matches `"<name>": [n1, n2, n3, n4]` anywhere in the raw text. Last-ditch
/// strategy for replies that are JSON-ish but not valid JSON.
static NAME_BOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""([^"]+)"\s*:\s*\[\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*\]"#,
    )
    .expect("name/box regex is valid")
});

/// Outcome of a single parse strategy. `NotApplicable` hands over to the next
/// strategy in the cascade; `Parsed` wins even when the item list is empty.
#[derive(Debug, Clone, PartialEq)]
enum StrategyOutcome {
    Parsed(Vec<DetectedItem>),
    NotApplicable,
}

/// Parses a raw model reply into detections. Strategies run in order, first
/// success wins: strict JSON with an `items` list, strict JSON flat
/// name-to-box map, then regex extraction. Never fails; an uninterpretable
/// reply is a legitimate "nothing detected" result.
pub fn parse_detections(raw: &str) -> ParsedDetections {
    let text = strip_code_fence(raw.trim());

    let items = match serde_json::from_str::<Value>(text) {
        Ok(value) => match parse_items_object(&value) {
            StrategyOutcome::Parsed(items) => items,
            StrategyOutcome::NotApplicable => match parse_flat_map(&value) {
                StrategyOutcome::Parsed(items) => items,
                StrategyOutcome::NotApplicable => Vec::new(),
            },
        },
        Err(err) => {
            tracing::debug!("reply is not valid JSON ({err}), trying regex extraction");
            match parse_with_regex(text) {
                StrategyOutcome::Parsed(items) => items,
                StrategyOutcome::NotApplicable => Vec::new(),
            }
        }
    };

    let names = dedup_names(&items);
    ParsedDetections { items, names }
}

/// Strips a surrounding triple-backtick fence, with an optional `json`
/// language tag, from an already-trimmed string.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text
        .strip_prefix("```")
        .and_then(|t| t.strip_suffix("```"))
    else {
        return text;
    };
    inner
        .trim_start_matches("json")
        .trim_start_matches(['\r', '\n'])
        .trim()
}

/// Strategy: `{"items": [{"name": ..., "box": [..]}]}`. Entries missing
/// either field are skipped without aborting the parse.
fn parse_items_object(value: &Value) -> StrategyOutcome {
    let Some(entries) = value.get("items").and_then(Value::as_array) else {
        return StrategyOutcome::NotApplicable;
    };

    let items = entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name").and_then(Value::as_str)?;
            let bbox = entry.get("box").and_then(as_bounding_box)?;
            Some(DetectedItem {
                name: name.to_string(),
                bbox,
            })
        })
        .collect();
    StrategyOutcome::Parsed(items)
}

/// Strategy: flat map of item name to a 4-number list. Values of any other
/// shape are not name/box pairs and are skipped.
fn parse_flat_map(value: &Value) -> StrategyOutcome {
    let Some(map) = value.as_object() else {
        return StrategyOutcome::NotApplicable;
    };

    let items = map
        .iter()
        .filter_map(|(name, value)| {
            let bbox = as_bounding_box(value)?;
            Some(DetectedItem {
                name: name.clone(),
                bbox,
            })
        })
        .collect();
    StrategyOutcome::Parsed(items)
}

fn parse_with_regex(text: &str) -> StrategyOutcome {
    let items: Vec<DetectedItem> = NAME_BOX_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let mut coords = [0.0f32; 4];
            for (slot, group) in coords.iter_mut().zip(2..=5) {
                *slot = caps.get(group)?.as_str().parse().ok()?;
            }
            Some(DetectedItem {
                name: caps[1].to_string(),
                bbox: BoundingBox(coords),
            })
        })
        .collect();

    if items.is_empty() {
        StrategyOutcome::NotApplicable
    } else {
        StrategyOutcome::Parsed(items)
    }
}

fn as_bounding_box(value: &Value) -> Option<BoundingBox> {
    let list = value.as_array()?;
    if list.len() != 4 {
        return None;
    }
    let mut coords = [0.0f32; 4];
    for (slot, value) in coords.iter_mut().zip(list) {
        *slot = value.as_f64()? as f32;
    }
    Some(BoundingBox(coords))
}

/// Distinct names in first-seen order. Every box is kept on the item list, so
/// a name that appears with several boxes is reported once.
fn dedup_names(items: &[DetectedItem]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for item in items {
        if !names.iter().any(|name| name == &item.name) {
            names.push(item.name.clone());
        }
    }
    names
}

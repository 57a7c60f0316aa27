//! Parsing of model responses.
//!
//! Recipe responses arrive as JSON (possibly wrapped in markdown code
//! fences); pairing responses are either freeform markdown or a structured
//! drink card, decided by the output format the caller requested.

use serde::Deserialize;

use crate::ai::{GenError, OutputFormat};
use crate::prompt::{ORIGIN_HEADING, REFUSAL_SENTENCE};

/// A generated recipe. `dish_name` is English and used only for image
/// lookup; `content` is the localized markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub dish_name: String,
    pub content: String,
}

/// Outcome of a recipe generation: a recipe, or the model's fixed apology
/// when the input was not food.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeOutcome {
    Recipe(Recipe),
    Refusal(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeReply {
    dish_name: String,
    recipe: String,
}

/// The structured pairing record. Field meaning shifts with the mode:
/// for wine `kind`/`origin`/`accents` are type/region/grapes, for a
/// cocktail they are description/glass/garnish.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkCard {
    pub name: String,
    pub kind: String,
    pub origin: String,
    pub accents: String,
    pub serving_tip: String,
}

/// A pairing result: freeform markdown or a structured card. The variant
/// is fixed by the requested response format, never guessed from the
/// payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingAnswer {
    Freeform(String),
    Structured(DrinkCard),
}

/// Strip an optional markdown code fence (```json ... ```) around a
/// response body.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Interpret a recipe-flow response.
///
/// The refusal is detected by substring match on the fixed apology
/// sentence; a model that phrases its refusal differently will fall
/// through to JSON parsing and surface a parse error instead.
pub fn recipe_outcome(text: &str) -> Result<RecipeOutcome, GenError> {
    if text.contains(REFUSAL_SENTENCE) {
        return Ok(RecipeOutcome::Refusal(REFUSAL_SENTENCE.to_string()));
    }

    let stripped = strip_code_fences(text);
    let reply: RecipeReply =
        serde_json::from_str(stripped).map_err(|e| GenError::Parse(e.to_string()))?;

    Ok(RecipeOutcome::Recipe(Recipe {
        dish_name: reply.dish_name,
        content: reply.recipe,
    }))
}

/// Interpret a pairing-flow response according to the format that was
/// requested from the gateway.
pub fn pairing_answer(text: &str, format: OutputFormat) -> Result<PairingAnswer, GenError> {
    match format {
        OutputFormat::Text => Ok(PairingAnswer::Freeform(text.to_string())),
        OutputFormat::Json => {
            let stripped = strip_code_fences(text);
            let card: DrinkCard =
                serde_json::from_str(stripped).map_err(|e| GenError::Parse(e.to_string()))?;
            Ok(PairingAnswer::Structured(card))
        }
    }
}

/// Split a recipe body at the `### Dish Origin` heading.
///
/// Returns the body and, when the delimiter is present, the origin text
/// without the heading line.
pub fn split_origin(content: &str) -> (&str, Option<&str>) {
    match content.find(ORIGIN_HEADING) {
        Some(idx) => {
            let body = content[..idx].trim_end();
            let origin = content[idx + ORIGIN_HEADING.len()..].trim();
            (body, Some(origin))
        }
        None => (content, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_plain_text() {
        assert_eq!(strip_code_fences("  hello  "), "hello");
    }

    #[test]
    fn test_strip_fences_json_block() {
        let text = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_bare_block() {
        let text = "```\n{\"a\":1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\":1}");
    }

    #[test]
    fn test_recipe_outcome_valid_json() {
        let text = r###"{"dishName": "Shakshuka", "recipe": "## שקשוקה\nטעים מאוד"}"###;
        let outcome = recipe_outcome(text).unwrap();
        match outcome {
            RecipeOutcome::Recipe(recipe) => {
                assert_eq!(recipe.dish_name, "Shakshuka");
                assert!(recipe.content.contains("שקשוקה"));
            }
            RecipeOutcome::Refusal(_) => panic!("expected a recipe"),
        }
    }

    #[test]
    fn test_recipe_outcome_fenced_json() {
        let text = "```json\n{\"dishName\": \"Pasta\", \"recipe\": \"boil it\"}\n```";
        assert!(matches!(
            recipe_outcome(text).unwrap(),
            RecipeOutcome::Recipe(_)
        ));
    }

    #[test]
    fn test_recipe_outcome_refusal_sentence() {
        let outcome = recipe_outcome(REFUSAL_SENTENCE).unwrap();
        assert_eq!(outcome, RecipeOutcome::Refusal(REFUSAL_SENTENCE.to_string()));
    }

    #[test]
    fn test_recipe_outcome_refusal_embedded_in_noise() {
        let text = format!("Note: {}", REFUSAL_SENTENCE);
        assert!(matches!(
            recipe_outcome(&text).unwrap(),
            RecipeOutcome::Refusal(_)
        ));
    }

    #[test]
    fn test_recipe_outcome_malformed_json() {
        let err = recipe_outcome("{\"dishName\": \"Pasta\"").unwrap_err();
        assert!(matches!(err, GenError::Parse(_)));
    }

    #[test]
    fn test_pairing_freeform_passthrough() {
        let answer = pairing_answer("a lovely **Chianti**", OutputFormat::Text).unwrap();
        assert_eq!(
            answer,
            PairingAnswer::Freeform("a lovely **Chianti**".to_string())
        );
    }

    #[test]
    fn test_pairing_structured_card() {
        let text = r#"{"name": "Barolo", "kind": "אדום", "origin": "Piedmont",
                       "accents": "Nebbiolo", "servingTip": "Decant for an hour"}"#;
        let answer = pairing_answer(text, OutputFormat::Json).unwrap();
        match answer {
            PairingAnswer::Structured(card) => {
                assert_eq!(card.name, "Barolo");
                assert_eq!(card.serving_tip, "Decant for an hour");
            }
            PairingAnswer::Freeform(_) => panic!("expected a structured card"),
        }
    }

    #[test]
    fn test_pairing_structured_rejects_freeform_payload() {
        let err = pairing_answer("just drink water", OutputFormat::Json).unwrap_err();
        assert!(matches!(err, GenError::Parse(_)));
    }

    #[test]
    fn test_split_origin_present() {
        let content = "## Pasta\nCook it well.\n\n### Dish Origin\nBorn in Naples.";
        let (body, origin) = split_origin(content);
        assert_eq!(body, "## Pasta\nCook it well.");
        assert_eq!(origin, Some("Born in Naples."));
    }

    #[test]
    fn test_split_origin_absent() {
        let content = "## Pasta\nCook it well.";
        let (body, origin) = split_origin(content);
        assert_eq!(body, content);
        assert_eq!(origin, None);
    }
}

//! Prompt assembly for the recipe and pairing flows.
//!
//! Prompts are plain instruction strings built by interpolation; user input
//! is embedded as-is, with no sanitization or length limiting.

use crate::ai::OutputFormat;
use crate::persona::{Chef, Language};

/// The one apology sentence the model is instructed to emit verbatim when
/// the input is not recognizable as food ingredients. Refusal detection
/// matches on this exact string (see `parse::recipe_outcome`).
pub const REFUSAL_SENTENCE: &str =
    "מצטער, אני לא מזהה כאן מצרכי מזון אמיתיים, אז אין לי מתכון להציע הפעם.";

/// Delimiter of the closing subsection every recipe body must end with.
pub const ORIGIN_HEADING: &str = "### Dish Origin";

/// Which drink the bartender should suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingMode {
    #[default]
    Wine,
    Cocktail,
}

impl PairingMode {
    pub fn noun(&self) -> &'static str {
        match self {
            PairingMode::Wine => "wine",
            PairingMode::Cocktail => "cocktail",
        }
    }
}

/// What the pairing should be matched against: a finished dish, or manual
/// preferences when no recipe exists yet.
#[derive(Debug, Clone)]
pub enum PairingContext {
    Dish(String),
    Preferences {
        wine_type: Option<String>,
        wine_style: Option<String>,
        notes: String,
    },
}

/// Build the recipe-generation prompt.
///
/// The variation counter is embedded so repeated requests with the same
/// ingredients yield different dishes; it is the only anti-repetition
/// mechanism.
pub fn build_recipe_prompt(
    chef: &Chef,
    ingredients: &str,
    language: Language,
    variation: u32,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are a master chef specializing in {} ({}).\n",
        chef.title, chef.title_he
    ));
    prompt.push_str(&format!(
        "Create one complete recipe using these ingredients: {}\n",
        ingredients.trim()
    ));
    prompt.push_str(&format!(
        "This is variation #{} for these ingredients - suggest a different dish than any earlier variation.\n\n",
        variation
    ));

    prompt.push_str(&format!(
        "Write the recipe strictly in {}. Do not mix languages.\n",
        language.as_str()
    ));
    prompt.push_str(
        "If the ingredient list is not recognizable as food ingredients, \
         reply with exactly the following sentence and nothing else, with no markdown:\n",
    );
    prompt.push_str(REFUSAL_SENTENCE);
    prompt.push_str("\n\n");

    prompt.push_str("Otherwise output ONLY a JSON object with exactly two fields:\n");
    prompt.push_str("- \"dishName\": the dish name in English, suitable for an image search\n");
    prompt.push_str(&format!(
        "- \"recipe\": the full recipe in {} as markdown (title, ingredients, numbered steps), \
         ending with a final \"{}\" section about where the dish comes from\n",
        language.as_str(),
        ORIGIN_HEADING
    ));

    prompt
}

/// Build the wine/cocktail pairing prompt.
///
/// When `format` is [`OutputFormat::Json`] the prompt requests the fixed
/// drink-card shape; otherwise it asks for short freeform markdown.
pub fn build_pairing_prompt(
    mode: PairingMode,
    context: &PairingContext,
    language: Language,
    format: OutputFormat,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are an expert sommelier and bartender. Suggest one {} pairing.\n",
        mode.noun()
    ));

    match context {
        PairingContext::Dish(recipe) => {
            prompt.push_str("Pair it with this dish:\n");
            prompt.push_str(recipe);
            prompt.push('\n');
        }
        PairingContext::Preferences {
            wine_type,
            wine_style,
            notes,
        } => {
            prompt.push_str("There is no dish yet; match these preferences:\n");
            if let Some(wine_type) = wine_type {
                prompt.push_str(&format!("- preferred type: {}\n", wine_type));
            }
            if let Some(wine_style) = wine_style {
                prompt.push_str(&format!("- preferred style: {}\n", wine_style));
            }
            if !notes.trim().is_empty() {
                prompt.push_str(&format!("- notes: {}\n", notes.trim()));
            }
        }
    }

    prompt.push_str(&format!(
        "\nAnswer strictly in {}. Do not mix languages.\n",
        language.as_str()
    ));

    match format {
        OutputFormat::Json => {
            prompt.push_str(
                "Output ONLY a JSON object with exactly these fields: \
                 \"name\", \"kind\", \"origin\", \"accents\", \"servingTip\".\n",
            );
            match mode {
                PairingMode::Wine => prompt.push_str(
                    "For wine: \"kind\" is the wine type, \"origin\" the region, \
                     \"accents\" the grape varieties.\n",
                ),
                PairingMode::Cocktail => prompt.push_str(
                    "For a cocktail: \"kind\" is a one-line description, \"origin\" the \
                     glass to serve in, \"accents\" the garnish.\n",
                ),
            }
        }
        OutputFormat::Text => {
            prompt.push_str("Answer in a few short markdown paragraphs, no JSON.\n");
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::CHEFS;

    #[test]
    fn test_recipe_prompt_embeds_selections() {
        let prompt = build_recipe_prompt(&CHEFS[0], "eggs, flour", Language::Hebrew, 1);
        assert!(prompt.contains("Italian Cuisine"));
        assert!(prompt.contains("eggs, flour"));
        assert!(prompt.contains("variation #1"));
        assert!(prompt.contains("strictly in Hebrew"));
    }

    #[test]
    fn test_recipe_prompt_carries_refusal_instruction() {
        let prompt = build_recipe_prompt(&CHEFS[1], "rocks and sand", Language::English, 3);
        assert!(prompt.contains(REFUSAL_SENTENCE));
        assert!(prompt.contains("no markdown"));
    }

    #[test]
    fn test_recipe_prompt_requests_two_field_json() {
        let prompt = build_recipe_prompt(&CHEFS[2], "tofu", Language::English, 1);
        assert!(prompt.contains("\"dishName\""));
        assert!(prompt.contains("\"recipe\""));
        assert!(prompt.contains(ORIGIN_HEADING));
    }

    #[test]
    fn test_variation_counter_changes_prompt() {
        let first = build_recipe_prompt(&CHEFS[0], "eggs", Language::Hebrew, 1);
        let second = build_recipe_prompt(&CHEFS[0], "eggs", Language::Hebrew, 2);
        assert_ne!(first, second);
        assert!(second.contains("variation #2"));
    }

    #[test]
    fn test_pairing_prompt_with_dish_context() {
        let context = PairingContext::Dish("Shakshuka with feta".to_string());
        let prompt =
            build_pairing_prompt(PairingMode::Wine, &context, Language::Hebrew, OutputFormat::Text);
        assert!(prompt.contains("Shakshuka with feta"));
        assert!(prompt.contains("wine"));
        assert!(prompt.contains("no JSON"));
    }

    #[test]
    fn test_pairing_prompt_structured_requests_card_fields() {
        let context = PairingContext::Preferences {
            wine_type: Some("אדום".to_string()),
            wine_style: Some("עשיר ומלא".to_string()),
            notes: String::new(),
        };
        let prompt =
            build_pairing_prompt(PairingMode::Wine, &context, Language::Hebrew, OutputFormat::Json);
        assert!(prompt.contains("\"servingTip\""));
        assert!(prompt.contains("אדום"));
        assert!(prompt.contains("עשיר ומלא"));
    }

    #[test]
    fn test_cocktail_prompt_describes_glass_and_garnish() {
        let context = PairingContext::Preferences {
            wine_type: None,
            wine_style: None,
            notes: "something sour".to_string(),
        };
        let prompt = build_pairing_prompt(
            PairingMode::Cocktail,
            &context,
            Language::English,
            OutputFormat::Json,
        );
        assert!(prompt.contains("cocktail"));
        assert!(prompt.contains("glass"));
        assert!(prompt.contains("garnish"));
        assert!(prompt.contains("something sour"));
    }
}

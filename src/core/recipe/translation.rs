//! Translation payload shaping
//!
//! The translator gets one flat object: the full UI copy plus the natural
//! language fields of the recipe. Identifiers and rating numbers never leave
//! the process. On the way back each entity pulls only its own declared
//! fields out of the response.

use crate::shared::translatable::{TranslatableValue, TranslationPayload};
use crate::shared::types::Recipe;
use crate::shared::ui_text::UiText;

/// Recipe keys that are sent for translation.
pub const RECIPE_TRANSLATABLE_KEYS: &[&str] = &[
    "recipeName",
    "description",
    "ingredients",
    "instructions",
    "prepTime",
    "cookTime",
    "totalTime",
    "servings",
];

/// Flat translator request for the UI copy and, when present, a recipe.
pub fn build_translation_payload(recipe: Option<&Recipe>, ui_text: &UiText) -> TranslationPayload {
    let mut payload = TranslationPayload::new();
    ui_text.write_payload(&mut payload);
    if let Some(recipe) = recipe {
        write_recipe_payload(recipe, &mut payload);
    }
    payload
}

fn write_recipe_payload(recipe: &Recipe, payload: &mut TranslationPayload) {
    payload.insert("recipeName".to_string(), recipe.recipe_name.to_value());
    payload.insert("description".to_string(), recipe.description.to_value());
    payload.insert("ingredients".to_string(), recipe.ingredients.to_value());
    payload.insert("instructions".to_string(), recipe.instructions.to_value());

    let optional = [
        ("prepTime", &recipe.prep_time),
        ("cookTime", &recipe.cook_time),
        ("totalTime", &recipe.total_time),
        ("servings", &recipe.servings),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            payload.insert(key.to_string(), value.to_value());
        }
    }
}

/// Recipe with its translatable fields replaced from `response`.
///
/// Only keys the original recipe actually carries are considered; absent or
/// mistyped keys keep the original text. `id` and rating fields are copied
/// from the original untouched.
pub fn merge_translated_recipe(original: &Recipe, response: &TranslationPayload) -> Recipe {
    let pick_optional = |key: &str, current: &Option<String>| -> Option<String> {
        current
            .as_ref()
            .map(|value| String::pick(response, key).unwrap_or_else(|| value.clone()))
    };

    Recipe {
        recipe_name: String::pick(response, "recipeName")
            .unwrap_or_else(|| original.recipe_name.clone()),
        description: String::pick(response, "description")
            .unwrap_or_else(|| original.description.clone()),
        ingredients: Vec::<String>::pick(response, "ingredients")
            .unwrap_or_else(|| original.ingredients.clone()),
        instructions: Vec::<String>::pick(response, "instructions")
            .unwrap_or_else(|| original.instructions.clone()),
        prep_time: pick_optional("prepTime", &original.prep_time),
        cook_time: pick_optional("cookTime", &original.cook_time),
        total_time: pick_optional("totalTime", &original.total_time),
        servings: pick_optional("servings", &original.servings),
        ..original.clone()
    }
}

impl Recipe {
    pub fn merge_translated(&self, response: &TranslationPayload) -> Recipe {
        merge_translated_recipe(self, response)
    }
}

/// Splits a translator response back into UI copy and recipe.
pub fn split_translation(
    source_ui: &UiText,
    original: Option<&Recipe>,
    response: &TranslationPayload,
) -> (UiText, Option<Recipe>) {
    let ui_text = source_ui.merge_translated(response);
    let recipe = original.map(|recipe| recipe.merge_translated(response));
    (ui_text, recipe)
}
